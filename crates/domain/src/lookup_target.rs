use crate::dns_record::{normalize_name, RecordType};
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Composite `{name, type}` lookup carried in a `DNSLookup` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupQuery {
    #[serde(alias = "Name")]
    pub name: String,

    #[serde(rename = "type", alias = "Type")]
    pub record_type: RecordType,
}

impl LookupQuery {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

/// What a client asks the server to resolve.
///
/// A bare name matches the first record with that name in load order; a typed
/// target must match both name and record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    Name(String),
    Typed(LookupQuery),
}

impl LookupTarget {
    pub fn name(&self) -> &str {
        match self {
            LookupTarget::Name(name) => name,
            LookupTarget::Typed(query) => &query.name,
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        match self {
            LookupTarget::Name(_) => None,
            LookupTarget::Typed(query) => Some(query.record_type),
        }
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(self.name())
    }
}

impl fmt::Display for LookupTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupTarget::Name(name) => write!(f, "{}", name),
            LookupTarget::Typed(query) => write!(f, "{} {}", query.name, query.record_type),
        }
    }
}

/// Parses `"example.com"` or `"example.com AAAA"`.
impl FromStr for LookupTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| DomainError::InvalidDomainName(s.to_string()))?;

        match (parts.next(), parts.next()) {
            (None, _) => Ok(LookupTarget::Name(name.to_string())),
            (Some(kind), None) => {
                let record_type = kind
                    .parse::<RecordType>()
                    .map_err(DomainError::InvalidDomainName)?;
                Ok(LookupTarget::Typed(LookupQuery::new(name, record_type)))
            }
            (Some(_), Some(_)) => Err(DomainError::InvalidDomainName(s.to_string())),
        }
    }
}
