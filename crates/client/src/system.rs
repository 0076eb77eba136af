//! Platform collaborators: the system resolver configuration and one-shot
//! hostname lookups used to bootstrap nameserver entries.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use kestrel_dns_domain::DnsError;
use tracing::debug;

const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Nameservers from the platform resolver configuration, in file order.
pub(crate) fn default_nameservers() -> Result<Vec<IpAddr>, DnsError> {
    read_nameservers(Path::new(RESOLV_CONF_PATH))
}

fn read_nameservers(path: &Path) -> Result<Vec<IpAddr>, DnsError> {
    let contents = std::fs::read(path).map_err(|e| {
        DnsError::ConfigurationUnavailable(format!("{}: {e}", path.display()))
    })?;
    let config = resolv_conf::Config::parse(&contents).map_err(|e| {
        DnsError::ConfigurationUnavailable(format!("{}: {e}", path.display()))
    })?;

    let servers: Vec<IpAddr> = config
        .nameservers
        .iter()
        .map(|scoped| match scoped {
            resolv_conf::ScopedIp::V4(v4) => IpAddr::V4(*v4),
            resolv_conf::ScopedIp::V6(v6, _) => IpAddr::V6(*v6),
        })
        .collect();

    if servers.is_empty() {
        return Err(DnsError::ConfigurationUnavailable(format!(
            "{} lists no nameservers",
            path.display()
        )));
    }

    debug!(count = servers.len(), "loaded system nameservers");
    Ok(servers)
}

/// Resolve a nameserver hostname to all its addresses (IPv4 + IPv6) via the
/// system default resolver, preserving the order the lookup returned.
pub(crate) async fn resolve_host(
    hostname: &str,
    port: u16,
    wait: Duration,
) -> Result<Vec<SocketAddr>, DnsError> {
    let target = format!("{hostname}:{port}");

    let addrs_iter = tokio::time::timeout(wait, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DnsError::AddressResolutionFailed(format!("{target}: lookup timed out")))?
        .map_err(|e| DnsError::AddressResolutionFailed(format!("{target}: {e}")))?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();
    if addrs.is_empty() {
        return Err(DnsError::AddressResolutionFailed(format!(
            "no addresses found for {target}"
        )));
    }

    Ok(addrs)
}
