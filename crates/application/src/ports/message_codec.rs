use ferrous_lookup_domain::{DomainError, Message};

pub trait MessageCodec: Send + Sync {
    /// Fails when the payload does not fit the message type or the datagram limit.
    fn encode(&self, message: &Message) -> Result<Vec<u8>, DomainError>;

    /// Never panics on hostile input; every failure is `DomainError::Decode`.
    fn decode(&self, bytes: &[u8]) -> Result<Message, DomainError>;
}
