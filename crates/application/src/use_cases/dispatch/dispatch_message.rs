use crate::ports::RecordRepository;
use crate::services::{AckCorrelation, EndpointTracker};
use ferrous_lookup_domain::{
    DomainError, Message, MessageId, MessageIdSequence, MessageType, NOT_FOUND_CONTENT,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Server-side dispatch table: one inbound message in, at most one reply out.
///
/// Replies depend only on the message and the record table; the endpoint
/// tracker observes traffic but never changes the outcome.
pub struct DispatchMessageUseCase {
    records: Arc<dyn RecordRepository>,
    tracker: Arc<EndpointTracker>,
    ids: MessageIdSequence,
}

impl DispatchMessageUseCase {
    pub fn new(records: Arc<dyn RecordRepository>, tracker: Arc<EndpointTracker>) -> Self {
        Self {
            records,
            tracker,
            ids: MessageIdSequence::new(fastrand::u32(1..u32::MAX / 2)),
        }
    }

    /// Start fresh server ids at `start` instead of a random offset.
    pub fn with_id_start(mut self, start: MessageId) -> Self {
        self.ids = MessageIdSequence::new(start);
        self
    }

    pub fn tracker(&self) -> &Arc<EndpointTracker> {
        &self.tracker
    }

    pub fn execute(&self, from: SocketAddr, message: &Message) -> Option<Message> {
        self.tracker.touch(from);

        match message.msg_type {
            MessageType::Hello => {
                info!(client = %from, id = message.id, content = %message.content, "Hello received");
                Some(Message::welcome(message.id))
            }
            MessageType::DNSLookup => self.handle_lookup(from, message),
            MessageType::Ack => {
                match self.tracker.record_ack(from, message.id) {
                    AckCorrelation::Matched => {
                        debug!(client = %from, id = message.id, "Ack received");
                    }
                    AckCorrelation::Uncorrelated { pending } => {
                        warn!(
                            client = %from,
                            id = message.id,
                            pending = ?pending,
                            "Ack does not match the last reply sent to this endpoint"
                        );
                    }
                }
                None
            }
            MessageType::End => {
                self.tracker.evict(from);
                info!(client = %from, "End received, session closed. Waiting for new clients");
                Some(Message::server_end(self.ids.next_id()))
            }
            MessageType::Welcome | MessageType::DNSLookupReply | MessageType::Error => {
                warn!(client = %from, msg_type = %message.msg_type, "Unexpected message type from client");
                None
            }
        }
    }

    /// Called once `reply` has been encoded and handed to the transport.
    /// Only a delivered `DNSLookupReply` becomes the endpoint's pending Ack.
    pub fn reply_sent(&self, to: SocketAddr, reply: &Message) {
        if reply.msg_type == MessageType::DNSLookupReply {
            self.tracker.record_reply(to, reply.id);
        }
    }

    fn handle_lookup(&self, from: SocketAddr, message: &Message) -> Option<Message> {
        let Some(target) = message.lookup_target() else {
            warn!(client = %from, id = message.id, "DNSLookup without a domain, dropping");
            return None;
        };

        match self.records.find(target.name(), target.record_type()) {
            Ok(record) => {
                info!(
                    client = %from,
                    domain = %target,
                    record_type = %record.record_type,
                    value = %record.value,
                    "Lookup resolved"
                );
                Some(Message::lookup_reply(message.id, record))
            }
            Err(DomainError::NotFound(_)) => {
                info!(client = %from, domain = %target, "Lookup miss");
                Some(Message::not_found(message.id))
            }
            Err(e) => {
                warn!(client = %from, domain = %target, error = %e, "Lookup failed");
                Some(Message::error(message.id, NOT_FOUND_CONTENT))
            }
        }
    }
}
