//! Read-only view over one decoded response message.

use std::fmt;

use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use kestrel_dns_domain::DnsError;

use crate::record::ResourceRecord;

/// A decoded DNS response. Created by a query, immutable afterward.
#[derive(Debug)]
pub struct Packet {
    message: Message,
}

impl Packet {
    pub(crate) fn from_message(message: Message) -> Self {
        Self { message }
    }

    /// Decode a raw wire-format response.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DnsError> {
        let message = Message::from_vec(bytes)
            .map_err(|e| DnsError::Proto(format!("failed to parse response: {e}")))?;
        Ok(Self::from_message(message))
    }

    /// Response status, e.g. `"NOERROR"` or `"NXDOMAIN"`.
    pub fn rcode(&self) -> String {
        rcode_name(self.message.response_code())
    }

    /// Operation code, e.g. `"QUERY"`.
    pub fn opcode(&self) -> String {
        match self.message.op_code() {
            OpCode::Query => "QUERY",
            OpCode::Status => "STATUS",
            OpCode::Notify => "NOTIFY",
            OpCode::Update => "UPDATE",
            _ => "UNKNOWN",
        }
        .to_string()
    }

    /// Header flags that are set, always in alphabetical order so test
    /// assertions and log lines are stable.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.message.authoritative() {
            flags.push("AA");
        }
        if self.message.authentic_data() {
            flags.push("AD");
        }
        if self.message.checking_disabled() {
            flags.push("CD");
        }
        if self.message.message_type() == MessageType::Response {
            flags.push("QR");
        }
        if self.message.recursion_available() {
            flags.push("RA");
        }
        if self.message.recursion_desired() {
            flags.push("RD");
        }
        if self.message.truncated() {
            flags.push("TC");
        }
        flags.into_iter().map(String::from).collect()
    }

    pub fn question(&self) -> Vec<ResourceRecord> {
        self.message
            .queries()
            .iter()
            .map(ResourceRecord::from_query)
            .collect()
    }

    pub fn answer(&self) -> Vec<ResourceRecord> {
        self.message
            .answers()
            .iter()
            .map(ResourceRecord::from_record)
            .collect()
    }

    pub fn authority(&self) -> Vec<ResourceRecord> {
        self.message
            .name_servers()
            .iter()
            .map(ResourceRecord::from_record)
            .collect()
    }

    pub fn additional(&self) -> Vec<ResourceRecord> {
        self.message
            .additionals()
            .iter()
            .map(ResourceRecord::from_record)
            .collect()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            ";; opcode: {}, status: {}, flags: {}",
            self.opcode(),
            self.rcode(),
            self.flags().join(" ")
        )?;
        for (section, records) in [
            ("QUESTION", self.question()),
            ("ANSWER", self.answer()),
            ("AUTHORITY", self.authority()),
            ("ADDITIONAL", self.additional()),
        ] {
            writeln!(f, ";; {section}: {}", records.len())?;
            for record in records {
                writeln!(f, "{record}")?;
            }
        }
        Ok(())
    }
}

pub(crate) fn rcode_name(rcode: ResponseCode) -> String {
    match rcode {
        ResponseCode::NoError => "NOERROR",
        ResponseCode::FormErr => "FORMERR",
        ResponseCode::ServFail => "SERVFAIL",
        ResponseCode::NXDomain => "NXDOMAIN",
        ResponseCode::NotImp => "NOTIMP",
        ResponseCode::Refused => "REFUSED",
        ResponseCode::YXDomain => "YXDOMAIN",
        ResponseCode::YXRRSet => "YXRRSET",
        ResponseCode::NXRRSet => "NXRRSET",
        ResponseCode::NotAuth => "NOTAUTH",
        ResponseCode::NotZone => "NOTZONE",
        ResponseCode::BADVERS => "BADVERS",
        _ => "UNKNOWN",
    }
    .to_string()
}
