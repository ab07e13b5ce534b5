#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration file found (looked in: {0})")]
    NotFound(String),

    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to read records file {0}: {1}")]
    RecordsRead(String, String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
