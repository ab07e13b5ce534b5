use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed message: {0}")]
    Decode(String),

    #[error("Failed to encode message: {0}")]
    Encode(String),

    #[error("Message of {size} bytes exceeds the {max} byte datagram limit")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Domain not found: {0}")]
    NotFound(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Timed out after {waited_ms} ms waiting for {peer}")]
    Timeout { peer: String, waited_ms: u64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport closed")]
    TransportClosed,
}

impl DomainError {
    /// True for conditions that end a session or receive loop.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DomainError::TransportClosed | DomainError::Timeout { .. }
        )
    }
}
