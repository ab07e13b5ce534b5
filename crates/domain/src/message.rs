use crate::dns_record::DnsRecord;
use crate::lookup_target::{LookupQuery, LookupTarget};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

/// Largest datagram either side sends or accepts.
pub const MAX_DATAGRAM_SIZE: usize = 1024;

pub const HELLO_CONTENT: &str = "Hello from client";
pub const WELCOME_CONTENT: &str = "Welcome from server";
pub const ACK_CONTENT: &str = "Acknowledged";
pub const NOT_FOUND_CONTENT: &str = "Domain not found";
pub const CLIENT_END_CONTENT: &str = "End of DNSLookup requests";
pub const SERVER_END_CONTENT: &str = "End of DNSLookup";
/// Sent in place of a `DNSLookupReply` whose record does not fit one datagram.
pub const REPLY_TOO_LARGE_CONTENT: &str = "Record too large";

pub type MessageId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Hello,
    Welcome,
    DNSLookup,
    DNSLookupReply,
    Ack,
    Error,
    End,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Hello => "Hello",
            MessageType::Welcome => "Welcome",
            MessageType::DNSLookup => "DNSLookup",
            MessageType::DNSLookupReply => "DNSLookupReply",
            MessageType::Ack => "Ack",
            MessageType::Error => "Error",
            MessageType::End => "End",
        }
    }

    pub fn all() -> &'static [MessageType] {
        use MessageType::*;
        &[Hello, Welcome, DNSLookup, DNSLookupReply, Ack, Error, End]
    }

    /// Whether a payload of this shape is legal for this message type.
    pub fn accepts(&self, content: &MessageContent) -> bool {
        match self {
            MessageType::DNSLookup => {
                matches!(content, MessageContent::Text(_) | MessageContent::Query(_))
            }
            MessageType::DNSLookupReply => matches!(content, MessageContent::Record(_)),
            MessageType::Hello
            | MessageType::Welcome
            | MessageType::Ack
            | MessageType::Error
            | MessageType::End => {
                matches!(content, MessageContent::Text(_) | MessageContent::Empty)
            }
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown message type: {}", s))
    }
}

/// Message payload. The variant is implied by the message type on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Record(DnsRecord),
    Query(LookupQuery),
    Empty,
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&DnsRecord> {
        match self {
            MessageContent::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageContent::Text(text) => write!(f, "{}", text),
            MessageContent::Record(r) => write!(f, "{} {} {}", r.name, r.record_type, r.value),
            MessageContent::Query(q) => write!(f, "{} {}", q.name, q.record_type),
            MessageContent::Empty => Ok(()),
        }
    }
}

impl From<LookupTarget> for MessageContent {
    fn from(target: LookupTarget) -> Self {
        match target {
            LookupTarget::Name(name) => MessageContent::Text(name),
            LookupTarget::Typed(query) => MessageContent::Query(query),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub msg_type: MessageType,
    pub content: MessageContent,
}

impl Message {
    pub fn new(id: MessageId, msg_type: MessageType, content: MessageContent) -> Self {
        Self {
            id,
            msg_type,
            content,
        }
    }

    fn text(id: MessageId, msg_type: MessageType, text: &str) -> Self {
        Self::new(id, msg_type, MessageContent::Text(text.to_string()))
    }

    pub fn hello(id: MessageId) -> Self {
        Self::text(id, MessageType::Hello, HELLO_CONTENT)
    }

    pub fn welcome(id: MessageId) -> Self {
        Self::text(id, MessageType::Welcome, WELCOME_CONTENT)
    }

    pub fn lookup(id: MessageId, target: LookupTarget) -> Self {
        Self::new(id, MessageType::DNSLookup, target.into())
    }

    pub fn lookup_reply(id: MessageId, record: DnsRecord) -> Self {
        Self::new(id, MessageType::DNSLookupReply, MessageContent::Record(record))
    }

    pub fn ack(id: MessageId) -> Self {
        Self::text(id, MessageType::Ack, ACK_CONTENT)
    }

    pub fn error(id: MessageId, reason: &str) -> Self {
        Self::text(id, MessageType::Error, reason)
    }

    pub fn not_found(id: MessageId) -> Self {
        Self::error(id, NOT_FOUND_CONTENT)
    }

    pub fn client_end(id: MessageId) -> Self {
        Self::text(id, MessageType::End, CLIENT_END_CONTENT)
    }

    pub fn server_end(id: MessageId) -> Self {
        Self::text(id, MessageType::End, SERVER_END_CONTENT)
    }

    /// Recovers the lookup target from a `DNSLookup` payload.
    pub fn lookup_target(&self) -> Option<LookupTarget> {
        match (&self.msg_type, &self.content) {
            (MessageType::DNSLookup, MessageContent::Text(name)) => {
                Some(LookupTarget::Name(name.clone()))
            }
            (MessageType::DNSLookup, MessageContent::Query(query)) => {
                Some(LookupTarget::Typed(query.clone()))
            }
            _ => None,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.msg_type.accepts(&self.content)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} [{}]", self.msg_type, self.id, self.content)
    }
}

/// Monotonic id source. Ids are unique per sequence until the counter wraps.
#[derive(Debug)]
pub struct MessageIdSequence {
    next: AtomicU32,
}

impl MessageIdSequence {
    pub fn new(start: MessageId) -> Self {
        Self {
            next: AtomicU32::new(start),
        }
    }

    pub fn next_id(&self) -> MessageId {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MessageIdSequence {
    fn default() -> Self {
        Self::new(1)
    }
}
