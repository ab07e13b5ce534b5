use serde::{Deserialize, Serialize};
use std::path::Path;

use super::client::ClientConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::records::load_records_file;
use super::server::ServerConfig;
use super::settings::Settings;
use crate::dns_record::DnsRecord;
use crate::lookup_target::LookupTarget;

/// Records file that sits next to a legacy `Setting.json`.
const LEGACY_RECORDS_FILE: &str = "DNSrecords.json";

const SEARCH_PATHS: &[&str] = &[
    "ferrous-lookup.toml",
    "Setting.json",
    "/etc/ferrous-lookup/config.toml",
];

/// Main configuration structure for Ferrous Lookup
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server and client endpoints
    #[serde(default)]
    pub settings: Settings,

    /// Lookup session behaviour
    #[serde(default)]
    pub client: ClientConfig,

    /// Per-endpoint state housekeeping
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// JSON records file loaded in addition to the inline records
    #[serde(default)]
    pub records_file: Option<String>,

    #[serde(default)]
    pub records: Vec<DnsRecord>,
}

impl Config {
    /// Load configuration from file
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-lookup.toml in current directory
    /// 3. Setting.json in current directory
    /// 4. /etc/ferrous-lookup/config.toml
    ///
    /// Finding none of them is an error.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => return Err(ConfigError::NotFound(SEARCH_PATHS.join(", "))),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// `.json` files hold a bare settings object; anything else is TOML.
    ///
    /// A JSON settings file picks up `DNSrecords.json` from its own directory
    /// when that file exists. `--records` overrides it.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        if path.ends_with(".json") {
            let mut config = Self::from_json_settings(&contents)?;
            config.records_file = legacy_records_file(path);
            Ok(config)
        } else {
            Self::from_toml(&contents)
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_json_settings(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            settings,
            ..Self::default()
        })
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(address) = overrides.server_address {
            self.settings.server_address = address;
        }
        if let Some(port) = overrides.server_port {
            self.settings.server_port = port;
        }
        if let Some(port) = overrides.client_port {
            self.settings.client_port = port;
        }
        if let Some(records) = overrides.records_file {
            self.records_file = Some(records);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.server_port == 0 {
            return Err(ConfigError::Validation("Server port cannot be 0".to_string()));
        }

        self.settings.server_endpoint()?;
        self.settings.client_endpoint()?;

        if self.client.receive_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "client.receive_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.server.eviction_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "server.eviction_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.server.endpoint_idle_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "server.endpoint_idle_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if let Some(record) = self.records.iter().find(|r| r.name.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Record with value '{}' has an empty name",
                record.value
            )));
        }

        Ok(())
    }

    /// Inline records followed by the records file, in load order.
    pub fn load_records(&self) -> Result<Vec<DnsRecord>, ConfigError> {
        let mut records = self.records.clone();
        if let Some(path) = &self.records_file {
            records.extend(load_records_file(path)?);
        }
        Ok(records)
    }

    pub fn lookup_targets(&self) -> Result<Vec<LookupTarget>, ConfigError> {
        self.client
            .queries
            .iter()
            .map(|q| {
                q.parse::<LookupTarget>()
                    .map_err(|e| ConfigError::Validation(format!("query '{}': {}", q, e)))
            })
            .collect()
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        SEARCH_PATHS
            .iter()
            .find(|p| Path::new(p).exists())
            .map(|p| p.to_string())
    }
}

fn legacy_records_file(settings_path: &str) -> Option<String> {
    let dir = Path::new(settings_path).parent().unwrap_or_else(|| Path::new(""));
    let candidate = dir.join(LEGACY_RECORDS_FILE);
    candidate
        .exists()
        .then(|| candidate.to_string_lossy().into_owned())
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server_address: Option<String>,
    pub server_port: Option<u16>,
    pub client_port: Option<u16>,
    pub records_file: Option<String>,
    pub log_level: Option<String>,
}
