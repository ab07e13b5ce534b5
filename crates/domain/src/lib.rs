//! Ferrous Lookup Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod lookup_target;
pub mod message;

pub use config::{
    load_records_file, CliOverrides, ClientConfig, Config, ConfigError, LoggingConfig,
    ServerConfig, Settings,
};
pub use dns_record::{normalize_name, DnsRecord, RecordType};
pub use errors::DomainError;
pub use lookup_target::{LookupQuery, LookupTarget};
pub use message::{
    Message, MessageContent, MessageId, MessageIdSequence, MessageType, ACK_CONTENT,
    CLIENT_END_CONTENT, HELLO_CONTENT, MAX_DATAGRAM_SIZE, NOT_FOUND_CONTENT,
    REPLY_TOO_LARGE_CONTENT, SERVER_END_CONTENT, WELCOME_CONTENT,
};
