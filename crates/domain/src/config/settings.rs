use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// Endpoint settings shared by both executables.
///
/// Field aliases accept the camelCase and the older `Setting.json` key names.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(alias = "serverAddress", alias = "ServerIPAddress")]
    pub server_address: String,

    #[serde(alias = "serverPort", alias = "ServerPortNumber")]
    pub server_port: u16,

    #[serde(default = "default_client_address", alias = "clientAddress", alias = "ClientIPAddress")]
    pub client_address: String,

    #[serde(default, alias = "clientPort", alias = "ClientPortNumber")]
    pub client_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_string(),
            server_port: 11000,
            client_address: default_client_address(),
            client_port: 0,
        }
    }
}

fn default_client_address() -> String {
    "127.0.0.1".to_string()
}

impl Settings {
    pub fn server_endpoint(&self) -> Result<SocketAddr, ConfigError> {
        endpoint(&self.server_address, self.server_port, "server_address")
    }

    /// Local endpoint for the client socket; port 0 binds an ephemeral port.
    pub fn client_endpoint(&self) -> Result<SocketAddr, ConfigError> {
        endpoint(&self.client_address, self.client_port, "client_address")
    }
}

fn endpoint(address: &str, port: u16, field: &str) -> Result<SocketAddr, ConfigError> {
    let ip: IpAddr = address.trim().parse().map_err(|_| {
        ConfigError::Validation(format!("{} '{}' is not an IP address", field, address))
    })?;
    Ok(SocketAddr::new(ip, port))
}
