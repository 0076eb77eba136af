use serde::{Deserialize, Serialize};

/// Where a resolver gets its initial nameserver set from.
///
/// Accepts either an explicit list or a comma-separated string, so a config
/// file can say `nameservers = "9.9.9.9, 149.112.112.112"` or spell the
/// entries out. An empty spec is valid and yields a resolver with no
/// nameservers at all, which is distinct from omitting the field (that pulls
/// in the platform defaults).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum NameserverSpec {
    List(Vec<String>),
    Csv(String),
}

impl NameserverSpec {
    /// Individual entries in configured order, trimmed, empties skipped.
    pub fn entries(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            NameserverSpec::List(list) => list.iter().map(String::as_str).collect(),
            NameserverSpec::Csv(csv) => csv.split(',').collect(),
        };
        raw.iter()
            .map(|entry| entry.trim())
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for NameserverSpec {
    fn from(csv: &str) -> Self {
        NameserverSpec::Csv(csv.to_string())
    }
}

impl From<String> for NameserverSpec {
    fn from(csv: String) -> Self {
        NameserverSpec::Csv(csv)
    }
}

impl From<Vec<String>> for NameserverSpec {
    fn from(list: Vec<String>) -> Self {
        NameserverSpec::List(list)
    }
}

impl From<&[&str]> for NameserverSpec {
    fn from(list: &[&str]) -> Self {
        NameserverSpec::List(list.iter().map(|s| s.to_string()).collect())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// `None` means "use the platform resolver configuration".
    #[serde(default)]
    pub nameservers: Option<NameserverSpec>,

    /// Ask for DNSSEC records (EDNS DO bit) on every query.
    #[serde(default = "default_false")]
    pub dnssec: bool,

    /// Destination port, overridable for tests and nonstandard setups.
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long to wait on each nameserver, per attempt, in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Pause between retry attempts, in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
}

impl ResolverConfig {
    pub fn with_nameservers(spec: impl Into<NameserverSpec>) -> Self {
        Self {
            nameservers: Some(spec.into()),
            ..Self::default()
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            nameservers: None,
            dnssec: false,
            port: default_port(),
            query_timeout: default_query_timeout(),
            retry_delay: default_retry_delay(),
        }
    }
}

fn default_false() -> bool {
    false
}

fn default_port() -> u16 {
    53
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_retry_delay() -> u64 {
    1000
}
