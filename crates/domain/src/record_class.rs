use std::fmt;
use std::str::FromStr;

use crate::errors::DnsError;

/// DNS class registry. Queries are almost always `IN`; the rest exist for
/// completeness and for the odd CHAOS version.bind probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecordClass {
    #[default]
    IN,
    CH,
    HS,
    NONE,
    ANY,
}

impl RecordClass {
    pub const SUPPORTED: &'static [RecordClass] = &[
        RecordClass::IN,
        RecordClass::CH,
        RecordClass::HS,
        RecordClass::NONE,
        RecordClass::ANY,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordClass::IN => "IN",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
            RecordClass::NONE => "NONE",
            RecordClass::ANY => "ANY",
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            RecordClass::IN => 1,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
            RecordClass::NONE => 254,
            RecordClass::ANY => 255,
        }
    }

    /// Exact, case-sensitive lookup by canonical name.
    pub fn from_name(name: &str) -> Result<RecordClass, DnsError> {
        Self::SUPPORTED
            .iter()
            .find(|class| class.name() == name)
            .copied()
            .ok_or_else(|| DnsError::UnknownRecordClass(name.to_string()))
    }

    pub fn from_code(code: u16) -> Option<RecordClass> {
        Self::SUPPORTED
            .iter()
            .find(|class| class.code() == code)
            .copied()
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RecordClass {
    type Err = DnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordClass::from_name(s)
    }
}
