//! JSON wire codec.
//!
//! One object per datagram: `{"id": 7, "type": "DNSLookup", "content": ...}`.
//! The shape of `content` is chosen by `type`, never guessed from the payload:
//!
//! | type                                 | content                          |
//! |--------------------------------------|----------------------------------|
//! | `DNSLookup`                          | string, or `{name, type}`        |
//! | `DNSLookupReply`                     | `{name, type, value, ...}` record |
//! | `Hello`/`Welcome`/`Ack`/`Error`/`End` | string or null                   |
//!
//! The older `MsgId`/`MsgType`/`Content` field names are accepted on decode.
//! `type` must be the variant name. Frames that carry the type as an enum
//! ordinal are rejected, since the ordinal table is not part of the wire
//! format.

use ferrous_lookup_application::ports::MessageCodec;
use ferrous_lookup_domain::{
    DnsRecord, DomainError, LookupQuery, Message, MessageContent, MessageId, MessageType,
    MAX_DATAGRAM_SIZE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct OutboundFrame<'a> {
    id: MessageId,
    #[serde(rename = "type")]
    msg_type: MessageType,
    content: OutboundContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum OutboundContent<'a> {
    Text(&'a str),
    Record(&'a DnsRecord),
    Query(&'a LookupQuery),
    Empty,
}

impl<'a> From<&'a MessageContent> for OutboundContent<'a> {
    fn from(content: &'a MessageContent) -> Self {
        match content {
            MessageContent::Text(text) => OutboundContent::Text(text),
            MessageContent::Record(record) => OutboundContent::Record(record),
            MessageContent::Query(query) => OutboundContent::Query(query),
            MessageContent::Empty => OutboundContent::Empty,
        }
    }
}

#[derive(Deserialize)]
struct InboundFrame {
    #[serde(alias = "MsgId")]
    id: MessageId,
    #[serde(rename = "type", alias = "MsgType")]
    msg_type: Value,
    #[serde(default, alias = "Content")]
    content: Value,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMessageCodec;

impl JsonMessageCodec {
    pub fn new() -> Self {
        Self
    }

    fn decode_content(msg_type: MessageType, content: Value) -> Result<MessageContent, DomainError> {
        match (msg_type, content) {
            (MessageType::DNSLookupReply, value @ Value::Object(_)) => {
                serde_json::from_value::<DnsRecord>(value)
                    .map(MessageContent::Record)
                    .map_err(|e| DomainError::Decode(format!("invalid record: {}", e)))
            }
            (MessageType::DNSLookup, value @ Value::Object(_)) => {
                serde_json::from_value::<LookupQuery>(value)
                    .map(MessageContent::Query)
                    .map_err(|e| DomainError::Decode(format!("invalid lookup query: {}", e)))
            }
            (MessageType::DNSLookupReply, _) => Err(DomainError::Decode(
                "DNSLookupReply content must be a record".to_string(),
            )),
            (_, Value::String(text)) => Ok(MessageContent::Text(text)),
            (MessageType::DNSLookup, _) => Err(DomainError::Decode(
                "DNSLookup content must be a domain name or {name, type}".to_string(),
            )),
            (_, Value::Null) => Ok(MessageContent::Empty),
            (msg_type, other) => Err(DomainError::Decode(format!(
                "{} content must be text, got {}",
                msg_type,
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl MessageCodec for JsonMessageCodec {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, DomainError> {
        if !message.is_well_formed() {
            return Err(DomainError::Encode(format!(
                "content does not fit message type {}",
                message.msg_type
            )));
        }

        let frame = OutboundFrame {
            id: message.id,
            msg_type: message.msg_type,
            content: (&message.content).into(),
        };
        let bytes = serde_json::to_vec(&frame).map_err(|e| DomainError::Encode(e.to_string()))?;

        if bytes.len() > MAX_DATAGRAM_SIZE {
            return Err(DomainError::MessageTooLarge {
                size: bytes.len(),
                max: MAX_DATAGRAM_SIZE,
            });
        }
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Message, DomainError> {
        if bytes.len() > MAX_DATAGRAM_SIZE {
            return Err(DomainError::Decode(format!(
                "datagram of {} bytes exceeds {} byte limit",
                bytes.len(),
                MAX_DATAGRAM_SIZE
            )));
        }

        let text = std::str::from_utf8(bytes)
            .map_err(|e| DomainError::Decode(format!("invalid UTF-8: {}", e)))?;
        let frame: InboundFrame =
            serde_json::from_str(text).map_err(|e| DomainError::Decode(e.to_string()))?;
        let msg_type = match frame.msg_type {
            Value::String(name) => name.parse::<MessageType>().map_err(DomainError::Decode)?,
            Value::Number(n) => {
                return Err(DomainError::Decode(format!(
                    "numeric message type {} is not supported, expected a type name",
                    n
                )))
            }
            other => {
                return Err(DomainError::Decode(format!(
                    "message type must be a string, got {}",
                    json_kind(&other)
                )))
            }
        };
        let content = Self::decode_content(msg_type, frame.content)?;

        Ok(Message::new(frame.id, msg_type, content))
    }
}
