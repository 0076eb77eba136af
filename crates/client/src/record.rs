//! Decoded resource records with a flat, string-oriented view of the
//! type-specific data.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hickory_proto::dnssec::rdata::DNSSECRData;
use hickory_proto::dnssec::PublicKey;
use hickory_proto::dnssec::Verifier;
use hickory_proto::op::Query;
use hickory_proto::rr::{DNSClass, RData, Record, RecordType as WireType};
use kestrel_dns_domain::RecordType;

/// One decoded DNS record. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    owner: String,
    ttl: u32,
    class: String,
    rr_type: String,
    data: Vec<String>,
}

impl ResourceRecord {
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            owner: record.name().to_utf8(),
            ttl: record.ttl(),
            class: class_name(record.dns_class()),
            rr_type: type_name(record.record_type()),
            data: rdata_fields(record.data()),
        }
    }

    /// Question-section entries have no TTL or data on the wire.
    pub(crate) fn from_query(query: &Query) -> Self {
        Self {
            owner: query.name().to_utf8(),
            ttl: 0,
            class: class_name(query.query_class()),
            rr_type: type_name(query.query_type()),
            data: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn dns_class(&self) -> &str {
        &self.class
    }

    /// Canonical type name from the registry; unregistered codes render
    /// RFC 3597 style as `TYPEnnn`.
    pub fn rr_type(&self) -> &str {
        &self.rr_type
    }

    /// Type-specific data fields, in wire order, rendered as strings.
    pub fn data(&self) -> &[String] {
        &self.data
    }

    /// The address field for A/AAAA records. Any other type yields an empty
    /// string rather than an error; callers probing mixed record sets get to
    /// skip the non-address ones without ceremony.
    pub fn ip(&self) -> &str {
        match self.rr_type.as_str() {
            "A" | "AAAA" => self.data.first().map(String::as_str).unwrap_or(""),
            _ => "",
        }
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.owner,
            self.ttl,
            self.class,
            self.rr_type,
            self.data.join(" ")
        )
    }
}

fn type_name(wire: WireType) -> String {
    let code = u16::from(wire);
    match RecordType::from_code(code) {
        Some(rt) => rt.name().to_string(),
        None => format!("TYPE{code}"),
    }
}

fn class_name(class: DNSClass) -> String {
    match class {
        DNSClass::IN => "IN".to_string(),
        DNSClass::CH => "CH".to_string(),
        DNSClass::HS => "HS".to_string(),
        DNSClass::NONE => "NONE".to_string(),
        DNSClass::ANY => "ANY".to_string(),
        other => format!("{other:?}"),
    }
}

fn rdata_fields(rdata: &RData) -> Vec<String> {
    match rdata {
        RData::A(a) => vec![a.0.to_string()],
        RData::AAAA(aaaa) => vec![aaaa.0.to_string()],
        RData::CNAME(canonical) => vec![canonical.to_utf8()],
        RData::NS(ns) => vec![ns.to_utf8()],
        RData::PTR(ptr) => vec![ptr.to_utf8()],
        RData::MX(mx) => vec![mx.preference().to_string(), mx.exchange().to_utf8()],
        RData::SOA(soa) => vec![
            soa.mname().to_utf8(),
            soa.rname().to_utf8(),
            soa.serial().to_string(),
            soa.refresh().to_string(),
            soa.retry().to_string(),
            soa.expire().to_string(),
            soa.minimum().to_string(),
        ],
        RData::TXT(txt) => txt
            .txt_data()
            .iter()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect(),
        RData::SRV(srv) => vec![
            srv.priority().to_string(),
            srv.weight().to_string(),
            srv.port().to_string(),
            srv.target().to_utf8(),
        ],
        RData::DNSSEC(data) => dnssec_fields(data, rdata),
        RData::OPT(_) => Vec::new(),
        other => generic_fields(other),
    }
}

fn dnssec_fields(data: &DNSSECRData, rdata: &RData) -> Vec<String> {
    match data {
        DNSSECRData::DS(ds) => vec![
            ds.key_tag().to_string(),
            u8::from(ds.algorithm()).to_string(),
            u8::from(ds.digest_type()).to_string(),
            hex_encode(ds.digest()),
        ],
        DNSSECRData::DNSKEY(key) => vec![
            key.flags().to_string(),
            // Protocol field is fixed at 3 on the wire (RFC 4034 §2.1.2).
            "3".to_string(),
            u8::from(key.algorithm()).to_string(),
            BASE64.encode(key.public_key().public_bytes()),
        ],
        DNSSECRData::RRSIG(rrsig) => {
            let input = rrsig.input();
            vec![
                type_name(input.type_covered),
                u8::from(input.algorithm).to_string(),
                input.num_labels.to_string(),
                input.original_ttl.to_string(),
                input.sig_expiration.get().to_string(),
                input.sig_inception.get().to_string(),
                input.key_tag.to_string(),
                input.signer_name.to_utf8(),
                BASE64.encode(rrsig.sig()),
            ]
        }
        _ => generic_fields(rdata),
    }
}

/// Whitespace-split rendering for types without a dedicated dissection.
fn generic_fields(value: &impl fmt::Display) -> Vec<String> {
    value
        .to_string()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
