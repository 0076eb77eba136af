//! Query message construction in wire format via `hickory-proto`.

use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType as WireType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use kestrel_dns_domain::{DnsError, RecordClass, RecordType};
use std::str::FromStr;

/// EDNS payload size advertised when the DNSSEC bit is requested.
const EDNS_PAYLOAD: u16 = 1232;

pub(crate) fn wire_type(rr_type: RecordType) -> WireType {
    WireType::from(rr_type.code())
}

pub(crate) fn wire_class(class: RecordClass) -> DNSClass {
    match class {
        RecordClass::IN => DNSClass::IN,
        RecordClass::CH => DNSClass::CH,
        RecordClass::HS => DNSClass::HS,
        RecordClass::NONE => DNSClass::NONE,
        RecordClass::ANY => DNSClass::ANY,
    }
}

/// Build a single-question query and serialize it to wire format.
///
/// Returns the message ID alongside the bytes so the caller can match the
/// response against it. RD is always set; when `dnssec` is requested an
/// EDNS OPT with the DO bit is attached.
pub(crate) fn build_query(
    name: &str,
    rr_type: RecordType,
    class: RecordClass,
    dnssec: bool,
) -> Result<(u16, Vec<u8>), DnsError> {
    let name = Name::from_str(name)
        .map_err(|e| DnsError::InvalidDomainName(format!("{name}: {e}")))?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(wire_type(rr_type));
    query.set_query_class(wire_class(class));

    let id = fastrand::u16(..);
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    if dnssec {
        let mut edns = Edns::new();
        edns.set_version(0);
        edns.set_dnssec_ok(true);
        edns.set_max_payload(EDNS_PAYLOAD);
        message.extensions_mut().replace(edns);
    }

    let bytes = serialize_message(&message)?;
    Ok((id, bytes))
}

fn serialize_message(message: &Message) -> Result<Vec<u8>, DnsError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message
        .emit(&mut encoder)
        .map_err(|e| DnsError::Proto(format!("failed to serialize query: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_has_header_and_rd_bit() {
        let (id, bytes) =
            build_query("example.com", RecordType::A, RecordClass::IN, false).unwrap();

        assert!(bytes.len() >= 12, "DNS message too short: {}", bytes.len());
        let wire_id = u16::from_be_bytes([bytes[0], bytes[1]]);
        assert_eq!(wire_id, id);
        // Byte 2: QR(1) + Opcode(4) + AA(1) + TC(1) + RD(1)
        assert_eq!(bytes[2] & 0x01, 0x01, "RD flag should be set");
    }

    #[test]
    fn dnssec_flag_attaches_edns_do() {
        let (_, bytes) =
            build_query("example.com", RecordType::DNSKEY, RecordClass::IN, true).unwrap();
        let parsed = Message::from_vec(&bytes).unwrap();
        let edns = parsed.extensions().as_ref().expect("OPT record missing");
        assert!(edns.flags().dnssec_ok);
        assert_eq!(edns.max_payload(), EDNS_PAYLOAD);
    }

    #[test]
    fn chaos_class_is_threaded_through() {
        let (_, bytes) =
            build_query("version.bind", RecordType::TXT, RecordClass::CH, false).unwrap();
        let parsed = Message::from_vec(&bytes).unwrap();
        assert_eq!(parsed.queries()[0].query_class(), DNSClass::CH);
    }

    #[test]
    fn every_registered_type_builds() {
        for rt in RecordType::SUPPORTED {
            assert!(
                build_query("example.com", *rt, RecordClass::IN, false).is_ok(),
                "failed to build query for {rt}"
            );
        }
    }
}
