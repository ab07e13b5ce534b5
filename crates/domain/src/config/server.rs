use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Per-endpoint state is dropped after this long without traffic.
    #[serde(default = "default_endpoint_idle_timeout_secs")]
    pub endpoint_idle_timeout_secs: u64,

    #[serde(default = "default_eviction_interval_secs")]
    pub eviction_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            endpoint_idle_timeout_secs: default_endpoint_idle_timeout_secs(),
            eviction_interval_secs: default_eviction_interval_secs(),
        }
    }
}

impl ServerConfig {
    pub fn endpoint_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.endpoint_idle_timeout_secs)
    }

    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs)
    }
}

fn default_endpoint_idle_timeout_secs() -> u64 {
    300
}

fn default_eviction_interval_secs() -> u64 {
    60
}
