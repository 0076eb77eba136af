//! The resolver: an ordered nameserver set, a DNSSEC-desired flag, and the
//! query/retry/zone-transfer operations on top of them.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use hickory_proto::op::Message;
use kestrel_dns_domain::{DnsError, RecordClass, RecordType, ResolverConfig};
use tracing::{debug, warn};

use crate::axfr::ZoneTransfer;
use crate::packet::Packet;
use crate::{message, system, transport};

/// A stateful DNS resolver.
///
/// Not internally synchronized: mutation takes `&mut self`, so a shared
/// instance needs an external lock. Use one resolver per task when querying
/// concurrently.
pub struct Resolver {
    nameservers: Vec<IpAddr>,
    dnssec: bool,
    port: u16,
    query_timeout: Duration,
    retry_delay: Duration,
}

impl Resolver {
    /// Build a resolver from configuration.
    ///
    /// Without an explicit nameserver spec the platform resolver
    /// configuration is consulted; failing to find one there is
    /// [`DnsError::ConfigurationUnavailable`]. An explicitly empty spec is
    /// accepted and yields a resolver with no nameservers, against which
    /// every query comes back empty.
    pub async fn new(config: ResolverConfig) -> Result<Self, DnsError> {
        let mut resolver = Self {
            nameservers: Vec::new(),
            dnssec: config.dnssec,
            port: config.port,
            query_timeout: Duration::from_millis(config.query_timeout),
            retry_delay: Duration::from_millis(config.retry_delay),
        };

        match config.nameservers {
            None => resolver.nameservers = system::default_nameservers()?,
            Some(spec) => {
                for entry in spec.entries() {
                    resolver.add_nameserver(&entry).await?;
                }
            }
        }

        Ok(resolver)
    }

    /// Resolver over the platform's default nameservers.
    pub async fn system() -> Result<Self, DnsError> {
        Self::new(ResolverConfig::default()).await
    }

    /// Append a nameserver. IPv4 and IPv6 literals are taken as-is; anything
    /// else is treated as a hostname and resolved through the system default
    /// resolver, appending every address the lookup returns in order.
    pub async fn add_nameserver(&mut self, target: &str) -> Result<(), DnsError> {
        if let Ok(v4) = target.parse::<Ipv4Addr>() {
            self.nameservers.push(IpAddr::V4(v4));
            return Ok(());
        }
        if let Ok(v6) = target.parse::<Ipv6Addr>() {
            self.nameservers.push(IpAddr::V6(v6));
            return Ok(());
        }

        let resolved = system::resolve_host(target, self.port, self.query_timeout).await?;
        debug!(host = target, count = resolved.len(), "nameserver hostname resolved");
        for addr in resolved {
            self.nameservers.push(addr.ip());
        }
        Ok(())
    }

    /// Forget all nameservers. A no-op on an already empty set.
    pub fn drop_nameservers(&mut self) {
        self.nameservers.clear();
    }

    /// Replace the nameserver set, preserving the given order.
    pub async fn set_nameservers<I, S>(&mut self, targets: I) -> Result<(), DnsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.drop_nameservers();
        for target in targets {
            self.add_nameserver(target.as_ref()).await?;
        }
        Ok(())
    }

    /// Nameserver addresses in the order they were added. Non-destructive;
    /// calling it twice yields identical results.
    pub fn nameservers(&self) -> Vec<String> {
        self.nameservers.iter().map(ToString::to_string).collect()
    }

    pub fn set_dnssec(&mut self, dnssec: bool) {
        self.dnssec = dnssec;
    }

    pub fn dnssec(&self) -> bool {
        self.dnssec
    }

    /// Single-attempt query for `name`/`rr_type` under the Internet class.
    pub async fn query(&self, name: &str, rr_type: &str) -> Result<Option<Packet>, DnsError> {
        self.query_with(name, rr_type, "IN", 1).await
    }

    /// Query with an explicit class and attempt budget.
    ///
    /// Type and class names are validated against the registries before any
    /// socket is touched. Each attempt walks the nameserver set in order and
    /// the first response wins; attempts are separated by the configured
    /// retry delay. An exhausted budget is `Ok(None)`: nobody answering is
    /// a legitimate outcome, not an error.
    pub async fn query_with(
        &self,
        name: &str,
        rr_type: &str,
        dns_class: &str,
        attempts: u32,
    ) -> Result<Option<Packet>, DnsError> {
        let rr_type = RecordType::from_name(rr_type)?;
        let class = RecordClass::from_name(dns_class)?;

        let mut remaining = attempts;
        while remaining > 0 {
            remaining -= 1;
            if let Some(packet) = self.attempt(name, rr_type, class).await? {
                return Ok(Some(packet));
            }
            if remaining > 0 {
                debug!(
                    name,
                    rr_type = %rr_type,
                    remaining,
                    "no response, backing off before retry"
                );
                tokio::time::sleep(self.retry_delay).await;
            }
        }
        Ok(None)
    }

    /// One pass over the nameserver set.
    async fn attempt(
        &self,
        name: &str,
        rr_type: RecordType,
        class: RecordClass,
    ) -> Result<Option<Packet>, DnsError> {
        let (id, request) = message::build_query(name, rr_type, class, self.dnssec)?;

        for addr in &self.nameservers {
            let server = SocketAddr::new(*addr, self.port);

            let bytes = match transport::udp_exchange(server, &request, self.query_timeout).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!(server = %server, error = %e, "no response from nameserver");
                    continue;
                }
            };
            let response = match Message::from_vec(&bytes) {
                Ok(response) => response,
                Err(e) => {
                    warn!(server = %server, error = %e, "undecodable response, skipping");
                    continue;
                }
            };
            if response.id() != id {
                warn!(server = %server, "response ID mismatch, skipping");
                continue;
            }

            if response.truncated() {
                debug!(server = %server, "truncated response, retrying over tcp");
                match transport::tcp_exchange(server, &request, self.query_timeout).await {
                    Ok(bytes) => {
                        if let Ok(full) = Message::from_vec(&bytes) {
                            if full.id() == id {
                                return Ok(Some(Packet::from_message(full)));
                            }
                        }
                    }
                    Err(e) => debug!(server = %server, error = %e, "tcp retry failed"),
                }
                // The truncated answer is still an answer.
                return Ok(Some(Packet::from_message(response)));
            }

            return Ok(Some(Packet::from_message(response)));
        }

        Ok(None)
    }

    /// Start a zone transfer for `name` under the Internet class.
    ///
    /// Fails with [`DnsError::AxfrStartFailed`] if no nameserver accepts the
    /// session or the server rejects the transfer; otherwise records stream
    /// from the returned [`ZoneTransfer`].
    pub async fn axfr(&self, name: &str) -> Result<ZoneTransfer, DnsError> {
        ZoneTransfer::start(self, name).await
    }

    pub(crate) fn nameserver_addrs(&self) -> &[IpAddr] {
        &self.nameservers
    }

    pub(crate) fn port(&self) -> u16 {
        self.port
    }

    pub(crate) fn query_timeout(&self) -> Duration {
        self.query_timeout
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("nameservers", &self.nameservers)
            .field("dnssec", &self.dnssec)
            .field("port", &self.port)
            .finish()
    }
}
