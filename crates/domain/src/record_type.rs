use std::fmt;
use std::str::FromStr;

use crate::errors::DnsError;

/// Registry of DNS resource-record types a resolver can query for.
///
/// Names are the canonical uppercase forms from the IANA DNS parameters
/// registry; lookups are exact and case-sensitive. Note that these are the
/// types the client knows how to ask for; a nameserver may still refuse or
/// ignore any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    NS,
    MD,
    MF,
    CNAME,
    SOA,
    MB,
    MG,
    MR,
    NULL,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    RP,
    AFSDB,
    X25,
    ISDN,
    RT,
    NSAP,
    NSAPPTR,
    SIG,
    KEY,
    PX,
    GPOS,
    AAAA,
    LOC,
    NXT,
    EID,
    NIMLOC,
    SRV,
    ATMA,
    NAPTR,
    KX,
    CERT,
    A6,
    DNAME,
    SINK,
    OPT,
    APL,
    DS,
    SSHFP,
    IPSECKEY,
    RRSIG,
    NSEC,
    DNSKEY,
    DHCID,
    NSEC3,
    NSEC3PARAM,
    TLSA,
    SMIMEA,
    CDS,
    CDNSKEY,
    OPENPGPKEY,
    CSYNC,
    ZONEMD,
    SVCB,
    HTTPS,
    SPF,
    UINFO,
    UID,
    GID,
    UNSPEC,
    EUI48,
    EUI64,
    TSIG,
    IXFR,
    AXFR,
    MAILB,
    MAILA,
    ANY,
    URI,
    CAA,
    DLV,
}

impl RecordType {
    /// Every registered type, in type-code order.
    pub const SUPPORTED: &'static [RecordType] = &[
        RecordType::A,
        RecordType::NS,
        RecordType::MD,
        RecordType::MF,
        RecordType::CNAME,
        RecordType::SOA,
        RecordType::MB,
        RecordType::MG,
        RecordType::MR,
        RecordType::NULL,
        RecordType::WKS,
        RecordType::PTR,
        RecordType::HINFO,
        RecordType::MINFO,
        RecordType::MX,
        RecordType::TXT,
        RecordType::RP,
        RecordType::AFSDB,
        RecordType::X25,
        RecordType::ISDN,
        RecordType::RT,
        RecordType::NSAP,
        RecordType::NSAPPTR,
        RecordType::SIG,
        RecordType::KEY,
        RecordType::PX,
        RecordType::GPOS,
        RecordType::AAAA,
        RecordType::LOC,
        RecordType::NXT,
        RecordType::EID,
        RecordType::NIMLOC,
        RecordType::SRV,
        RecordType::ATMA,
        RecordType::NAPTR,
        RecordType::KX,
        RecordType::CERT,
        RecordType::A6,
        RecordType::DNAME,
        RecordType::SINK,
        RecordType::OPT,
        RecordType::APL,
        RecordType::DS,
        RecordType::SSHFP,
        RecordType::IPSECKEY,
        RecordType::RRSIG,
        RecordType::NSEC,
        RecordType::DNSKEY,
        RecordType::DHCID,
        RecordType::NSEC3,
        RecordType::NSEC3PARAM,
        RecordType::TLSA,
        RecordType::SMIMEA,
        RecordType::CDS,
        RecordType::CDNSKEY,
        RecordType::OPENPGPKEY,
        RecordType::CSYNC,
        RecordType::ZONEMD,
        RecordType::SVCB,
        RecordType::HTTPS,
        RecordType::SPF,
        RecordType::UINFO,
        RecordType::UID,
        RecordType::GID,
        RecordType::UNSPEC,
        RecordType::EUI48,
        RecordType::EUI64,
        RecordType::TSIG,
        RecordType::IXFR,
        RecordType::AXFR,
        RecordType::MAILB,
        RecordType::MAILA,
        RecordType::ANY,
        RecordType::URI,
        RecordType::CAA,
        RecordType::DLV,
    ];

    /// Canonical uppercase name.
    pub fn name(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::MD => "MD",
            RecordType::MF => "MF",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::MB => "MB",
            RecordType::MG => "MG",
            RecordType::MR => "MR",
            RecordType::NULL => "NULL",
            RecordType::WKS => "WKS",
            RecordType::PTR => "PTR",
            RecordType::HINFO => "HINFO",
            RecordType::MINFO => "MINFO",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
            RecordType::RP => "RP",
            RecordType::AFSDB => "AFSDB",
            RecordType::X25 => "X25",
            RecordType::ISDN => "ISDN",
            RecordType::RT => "RT",
            RecordType::NSAP => "NSAP",
            RecordType::NSAPPTR => "NSAP-PTR",
            RecordType::SIG => "SIG",
            RecordType::KEY => "KEY",
            RecordType::PX => "PX",
            RecordType::GPOS => "GPOS",
            RecordType::AAAA => "AAAA",
            RecordType::LOC => "LOC",
            RecordType::NXT => "NXT",
            RecordType::EID => "EID",
            RecordType::NIMLOC => "NIMLOC",
            RecordType::SRV => "SRV",
            RecordType::ATMA => "ATMA",
            RecordType::NAPTR => "NAPTR",
            RecordType::KX => "KX",
            RecordType::CERT => "CERT",
            RecordType::A6 => "A6",
            RecordType::DNAME => "DNAME",
            RecordType::SINK => "SINK",
            RecordType::OPT => "OPT",
            RecordType::APL => "APL",
            RecordType::DS => "DS",
            RecordType::SSHFP => "SSHFP",
            RecordType::IPSECKEY => "IPSECKEY",
            RecordType::RRSIG => "RRSIG",
            RecordType::NSEC => "NSEC",
            RecordType::DNSKEY => "DNSKEY",
            RecordType::DHCID => "DHCID",
            RecordType::NSEC3 => "NSEC3",
            RecordType::NSEC3PARAM => "NSEC3PARAM",
            RecordType::TLSA => "TLSA",
            RecordType::SMIMEA => "SMIMEA",
            RecordType::CDS => "CDS",
            RecordType::CDNSKEY => "CDNSKEY",
            RecordType::OPENPGPKEY => "OPENPGPKEY",
            RecordType::CSYNC => "CSYNC",
            RecordType::ZONEMD => "ZONEMD",
            RecordType::SVCB => "SVCB",
            RecordType::HTTPS => "HTTPS",
            RecordType::SPF => "SPF",
            RecordType::UINFO => "UINFO",
            RecordType::UID => "UID",
            RecordType::GID => "GID",
            RecordType::UNSPEC => "UNSPEC",
            RecordType::EUI48 => "EUI48",
            RecordType::EUI64 => "EUI64",
            RecordType::TSIG => "TSIG",
            RecordType::IXFR => "IXFR",
            RecordType::AXFR => "AXFR",
            RecordType::MAILB => "MAILB",
            RecordType::MAILA => "MAILA",
            RecordType::ANY => "ANY",
            RecordType::URI => "URI",
            RecordType::CAA => "CAA",
            RecordType::DLV => "DLV",
        }
    }

    /// IANA type code, as it appears on the wire.
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::MD => 3,
            RecordType::MF => 4,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::MB => 7,
            RecordType::MG => 8,
            RecordType::MR => 9,
            RecordType::NULL => 10,
            RecordType::WKS => 11,
            RecordType::PTR => 12,
            RecordType::HINFO => 13,
            RecordType::MINFO => 14,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::RP => 17,
            RecordType::AFSDB => 18,
            RecordType::X25 => 19,
            RecordType::ISDN => 20,
            RecordType::RT => 21,
            RecordType::NSAP => 22,
            RecordType::NSAPPTR => 23,
            RecordType::SIG => 24,
            RecordType::KEY => 25,
            RecordType::PX => 26,
            RecordType::GPOS => 27,
            RecordType::AAAA => 28,
            RecordType::LOC => 29,
            RecordType::NXT => 30,
            RecordType::EID => 31,
            RecordType::NIMLOC => 32,
            RecordType::SRV => 33,
            RecordType::ATMA => 34,
            RecordType::NAPTR => 35,
            RecordType::KX => 36,
            RecordType::CERT => 37,
            RecordType::A6 => 38,
            RecordType::DNAME => 39,
            RecordType::SINK => 40,
            RecordType::OPT => 41,
            RecordType::APL => 42,
            RecordType::DS => 43,
            RecordType::SSHFP => 44,
            RecordType::IPSECKEY => 45,
            RecordType::RRSIG => 46,
            RecordType::NSEC => 47,
            RecordType::DNSKEY => 48,
            RecordType::DHCID => 49,
            RecordType::NSEC3 => 50,
            RecordType::NSEC3PARAM => 51,
            RecordType::TLSA => 52,
            RecordType::SMIMEA => 53,
            RecordType::CDS => 59,
            RecordType::CDNSKEY => 60,
            RecordType::OPENPGPKEY => 61,
            RecordType::CSYNC => 62,
            RecordType::ZONEMD => 63,
            RecordType::SVCB => 64,
            RecordType::HTTPS => 65,
            RecordType::SPF => 99,
            RecordType::UINFO => 100,
            RecordType::UID => 101,
            RecordType::GID => 102,
            RecordType::UNSPEC => 103,
            RecordType::EUI48 => 108,
            RecordType::EUI64 => 109,
            RecordType::TSIG => 250,
            RecordType::IXFR => 251,
            RecordType::AXFR => 252,
            RecordType::MAILB => 253,
            RecordType::MAILA => 254,
            RecordType::ANY => 255,
            RecordType::URI => 256,
            RecordType::CAA => 257,
            RecordType::DLV => 32769,
        }
    }

    /// Look up a type by its canonical name. Exact match only: `"mx"` or
    /// `"Mx"` is rejected, callers must supply `"MX"`.
    pub fn from_name(name: &str) -> Result<RecordType, DnsError> {
        Self::SUPPORTED
            .iter()
            .find(|rt| rt.name() == name)
            .copied()
            .ok_or_else(|| DnsError::UnknownRecordType(name.to_string()))
    }

    /// Reverse lookup by type code.
    pub fn from_code(code: u16) -> Option<RecordType> {
        Self::SUPPORTED.iter().find(|rt| rt.code() == code).copied()
    }

    /// Names of every registered type.
    pub fn supported_names() -> impl Iterator<Item = &'static str> {
        Self::SUPPORTED.iter().map(|rt| rt.name())
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RecordType {
    type Err = DnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordType::from_name(s)
    }
}
