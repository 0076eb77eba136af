//! An ergonomic DNS client.
//!
//! Wraps the `hickory-proto` wire engine behind a small surface: a
//! [`Resolver`] owning an ordered nameserver set, queries that decode into
//! [`Packet`]s of [`ResourceRecord`]s, and streaming zone transfers.
//!
//! ```no_run
//! use kestrel_dns_client::{Resolver, ResolverConfig};
//!
//! # async fn example() -> Result<(), kestrel_dns_client::DnsError> {
//! let resolver = Resolver::new(ResolverConfig::with_nameservers("9.9.9.9")).await?;
//! if let Some(packet) = resolver.query("example.com", "A").await? {
//!     for rr in packet.answer() {
//!         println!("{} -> {}", rr.owner(), rr.ip());
//!     }
//! }
//!
//! let mut transfer = resolver.axfr("zone.example").await?;
//! while let Some(rr) = transfer.next_record().await? {
//!     println!("{rr}");
//! }
//! # Ok(())
//! # }
//! ```
pub mod axfr;
pub mod packet;
pub mod record;
pub mod resolver;

mod message;
mod system;
mod transport;

pub use axfr::ZoneTransfer;
pub use packet::Packet;
pub use record::ResourceRecord;
pub use resolver::Resolver;

pub use kestrel_dns_domain::{
    DnsError, NameserverSpec, RecordClass, RecordType, ResolverConfig,
};
