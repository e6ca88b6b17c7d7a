use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Which facility performs the reverse lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupBackend {
    /// Platform `getnameinfo`. The resolver list is accepted but has no effect.
    System,
    /// PTR queries sent to the supplied resolvers, in failover order.
    #[default]
    Resolvers,
}

impl LookupBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupBackend::System => "system",
            LookupBackend::Resolvers => "resolvers",
        }
    }
}

impl fmt::Display for LookupBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "system" => Ok(LookupBackend::System),
            "resolvers" => Ok(LookupBackend::Resolvers),
            other => Err(format!(
                "Unknown lookup backend '{}'. Expected 'system' or 'resolvers'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolutionConfig {
    #[serde(default = "default_ip_file")]
    pub ip_file: String,

    #[serde(default = "default_resolver_file")]
    pub resolver_file: String,

    #[serde(default = "default_threads")]
    pub threads: usize,

    #[serde(default)]
    pub backend: LookupBackend,

    /// How long an idle worker waits on an open, empty queue before exiting.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl ResolutionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            ip_file: default_ip_file(),
            resolver_file: default_resolver_file(),
            threads: default_threads(),
            backend: LookupBackend::default(),
            idle_timeout_ms: default_idle_timeout_ms(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

fn default_ip_file() -> String {
    "ip_list.txt".to_string()
}

fn default_resolver_file() -> String {
    "resolvers.txt".to_string()
}

fn default_threads() -> usize {
    10
}

fn default_idle_timeout_ms() -> u64 {
    5000
}

fn default_lookup_timeout_ms() -> u64 {
    5000
}
