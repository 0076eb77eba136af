//! Kestrel DNS domain layer: record-type and class registries, error
//! taxonomy, and resolver configuration. No I/O lives here.
pub mod config;
pub mod errors;
pub mod record_class;
pub mod record_type;

pub use config::{NameserverSpec, ResolverConfig};
pub use errors::DnsError;
pub use record_class::RecordClass;
pub use record_type::RecordType;
