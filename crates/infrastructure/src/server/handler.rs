use ferrous_lookup_application::ports::MessageCodec;
use ferrous_lookup_application::use_cases::DispatchMessageUseCase;
use ferrous_lookup_domain::{DomainError, Message, MessageType, REPLY_TOO_LARGE_CONTENT};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Decode, dispatch, encode. Undecodable datagrams produce no reply.
#[derive(Clone)]
pub struct LookupServerHandler {
    dispatch: Arc<DispatchMessageUseCase>,
    codec: Arc<dyn MessageCodec>,
}

impl LookupServerHandler {
    pub fn new(dispatch: Arc<DispatchMessageUseCase>, codec: Arc<dyn MessageCodec>) -> Self {
        Self { dispatch, codec }
    }

    pub fn handle_datagram(&self, datagram: &[u8], from: SocketAddr) -> Option<Vec<u8>> {
        let message = match self.codec.decode(datagram) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %from, bytes = datagram.len(), error = %e, "Dropping undecodable datagram");
                return None;
            }
        };

        debug!(client = %from, message = %message, "Message received");
        let reply = self.dispatch.execute(from, &message)?;

        match self.codec.encode(&reply) {
            Ok(bytes) => {
                self.dispatch.reply_sent(from, &reply);
                Some(bytes)
            }
            Err(e) => self.encode_failure(from, &reply, e),
        }
    }

    /// A lookup reply that cannot be encoded still gets an answer, so the
    /// client moves on to its next query instead of waiting out its timeout.
    fn encode_failure(&self, from: SocketAddr, reply: &Message, e: DomainError) -> Option<Vec<u8>> {
        error!(client = %from, reply = %reply, error = %e, "Failed to encode reply");

        if reply.msg_type != MessageType::DNSLookupReply {
            return None;
        }

        let fallback = Message::error(reply.id, REPLY_TOO_LARGE_CONTENT);
        match self.codec.encode(&fallback) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                error!(client = %from, error = %e, "Failed to encode fallback Error reply");
                None
            }
        }
    }
}
