use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Domains to resolve, in order. `"name TYPE"` asks for a specific record type.
    #[serde(default = "default_queries")]
    pub queries: Vec<String>,

    #[serde(default = "default_receive_timeout_ms")]
    pub receive_timeout_ms: u64,

    /// Close the session with an `End` exchange after the last lookup.
    #[serde(default = "default_true")]
    pub send_end: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            queries: default_queries(),
            receive_timeout_ms: default_receive_timeout_ms(),
            send_end: true,
        }
    }
}

impl ClientConfig {
    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }
}

fn default_queries() -> Vec<String> {
    vec![
        "google.com".to_string(),
        "example.com".to_string(),
        "invalid.domain".to_string(),
    ]
}

fn default_receive_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}
