use thiserror::Error;

/// Error taxonomy for the client.
///
/// A query attempt that simply gets no answer is not represented here: the
/// resolver retries it, and an exhausted attempt budget surfaces as
/// `Ok(None)` rather than as an error.
#[derive(Error, Debug, Clone)]
pub enum DnsError {
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Unknown record class: {0}")]
    UnknownRecordClass(String),

    #[error("Nameserver address resolution failed: {0}")]
    AddressResolutionFailed(String),

    #[error("Zone transfer could not be started: {0}")]
    AxfrStartFailed(String),

    #[error("No resolver configuration available: {0}")]
    ConfigurationUnavailable(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Protocol error: {0}")]
    Proto(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Transport timeout waiting on {server}")]
    TransportTimeout { server: String },
}
