use super::RecordType;
use serde::{Deserialize, Serialize};

/// A resolvable entry served from the record table.
///
/// `ttl` and `priority` are optional and only appear on the wire when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(alias = "Name")]
    pub name: String,

    #[serde(rename = "type", alias = "Type")]
    pub record_type: RecordType,

    #[serde(alias = "Value")]
    pub value: String,

    #[serde(default, alias = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    #[serde(default, alias = "Priority", skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl DnsRecord {
    pub fn new(name: impl Into<String>, record_type: RecordType, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            value: value.into(),
            ttl: None,
            priority: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Lookup key form of the name: lowercase, without the trailing root dot.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

pub fn normalize_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
