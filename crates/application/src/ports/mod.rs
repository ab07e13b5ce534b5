mod datagram_transport;
mod message_codec;
mod record_repository;

pub use datagram_transport::DatagramTransport;
pub use message_codec::MessageCodec;
pub use record_repository::RecordRepository;

// Re-export for convenience
pub use ferrous_lookup_domain::{DnsRecord, Message, RecordType};
