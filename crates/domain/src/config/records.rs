use super::errors::ConfigError;
use crate::dns_record::DnsRecord;

/// Reads a JSON array of `{name, type, value}` records.
pub fn load_records_file(path: &str) -> Result<Vec<DnsRecord>, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::RecordsRead(path.to_string(), e.to_string()))?;
    serde_json::from_str(&contents)
        .map_err(|e| ConfigError::RecordsRead(path.to_string(), e.to_string()))
}
