use crate::dns_query::{Endpoint, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TRANSACTION_ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Name server to query; an IP literal or a resolvable host name.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Record type used when none is given on the command line.
    #[serde(default = "default_record_type")]
    pub record_type: String,

    /// Overall deadline for one query, enforced by the caller. `0` disables it.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_transaction_id")]
    pub transaction_id: u16,
}

impl ResolverConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.as_str(), self.port)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            record_type: default_record_type(),
            timeout_ms: default_timeout_ms(),
            transaction_id: default_transaction_id(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_record_type() -> String {
    "A".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_transaction_id() -> u16 {
    DEFAULT_TRANSACTION_ID
}
