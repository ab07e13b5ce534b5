use super::report::{LookupOutcome, LookupResult, SessionReport};
use crate::ports::{DatagramTransport, MessageCodec};
use ferrous_lookup_domain::{
    DomainError, LookupTarget, Message, MessageContent, MessageId, MessageIdSequence,
    MessageType, MAX_DATAGRAM_SIZE,
};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Start,
    AwaitingWelcome,
    AwaitingLookupReply,
    AwaitingAckConfirmed,
    AwaitingEnd,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Start => "start",
            SessionState::AwaitingWelcome => "awaiting_welcome",
            SessionState::AwaitingLookupReply => "awaiting_lookup_reply",
            SessionState::AwaitingAckConfirmed => "awaiting_ack_confirmed",
            SessionState::AwaitingEnd => "awaiting_end",
            SessionState::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub receive_timeout: Duration,
    pub send_end: bool,
    pub first_id: MessageId,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            receive_timeout: Duration::from_secs(5),
            send_end: true,
            first_id: 1,
        }
    }
}

/// Drives one client session: Hello, one lookup per target, then End.
///
/// Unexpected or undecodable replies are logged and skipped. Only transport
/// failures, timeouts and cancellation abort the session.
pub struct LookupSessionUseCase {
    transport: Arc<dyn DatagramTransport>,
    codec: Arc<dyn MessageCodec>,
    server: SocketAddr,
    options: SessionOptions,
    shutdown: CancellationToken,
}

impl LookupSessionUseCase {
    pub fn new(
        transport: Arc<dyn DatagramTransport>,
        codec: Arc<dyn MessageCodec>,
        server: SocketAddr,
        options: SessionOptions,
    ) -> Self {
        Self {
            transport,
            codec,
            server,
            options,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn run(&self, targets: &[LookupTarget]) -> Result<SessionReport, DomainError> {
        let ids = MessageIdSequence::new(self.options.first_id);
        let mut report = SessionReport::new();

        self.send(&Message::hello(ids.next_id())).await?;
        self.enter(&mut report, SessionState::AwaitingWelcome);

        match self.receive().await? {
            Ok(msg) if msg.msg_type == MessageType::Welcome => {
                info!(content = %msg.content, "Received Welcome from server");
                report.welcomed = true;
            }
            Ok(msg) => warn!(received = %msg, "Unexpected response to Hello, continuing"),
            Err(e) => warn!(error = %e, "Undecodable response to Hello, continuing"),
        }

        for target in targets {
            self.enter(&mut report, SessionState::AwaitingLookupReply);
            let request = Message::lookup(ids.next_id(), target.clone());
            self.send(&request).await?;

            let result = match self.receive().await? {
                Ok(reply) => self.handle_reply(&mut report, &request, reply).await?,
                Err(e) => {
                    warn!(domain = %target, error = %e, "Undecodable reply, skipping");
                    LookupResult::Unexpected {
                        detail: e.to_string(),
                    }
                }
            };

            report.outcomes.push(LookupOutcome {
                target: target.clone(),
                result,
            });
        }

        if self.options.send_end {
            self.enter(&mut report, SessionState::AwaitingEnd);
            self.send(&Message::client_end(ids.next_id())).await?;

            match self.receive().await? {
                Ok(msg) if msg.msg_type == MessageType::End => {
                    info!(content = %msg.content, "Received End from server, closing session");
                    report.ended = true;
                }
                Ok(msg) => warn!(received = %msg, "Unexpected response to End"),
                Err(e) => warn!(error = %e, "Undecodable response to End"),
            }
        }

        self.enter(&mut report, SessionState::Closed);
        Ok(report)
    }

    async fn handle_reply(
        &self,
        report: &mut SessionReport,
        request: &Message,
        reply: Message,
    ) -> Result<LookupResult, DomainError> {
        if reply.id != request.id {
            debug!(request_id = request.id, reply_id = reply.id, "Reply id differs from request id");
        }

        match (reply.msg_type, reply.content) {
            (MessageType::DNSLookupReply, MessageContent::Record(record)) => {
                info!(
                    name = %record.name,
                    record_type = %record.record_type,
                    value = %record.value,
                    "Received DNSLookupReply"
                );
                self.enter(report, SessionState::AwaitingAckConfirmed);
                self.send(&Message::ack(reply.id)).await?;
                report.acks_sent += 1;
                Ok(LookupResult::Resolved {
                    reply_id: reply.id,
                    record,
                })
            }
            (MessageType::Error, content) => {
                let reason = content.to_string();
                info!(domain = %request.content, reason = %reason, "Received Error, not acknowledging");
                Ok(LookupResult::NotFound {
                    reply_id: reply.id,
                    reason,
                })
            }
            (msg_type, _) => {
                warn!(domain = %request.content, msg_type = %msg_type, "Unexpected response for DNSLookup");
                Ok(LookupResult::Unexpected {
                    detail: format!("unexpected {} reply", msg_type),
                })
            }
        }
    }

    fn enter(&self, report: &mut SessionReport, next: SessionState) {
        debug!(from = %report.state, to = %next, "Session state change");
        report.state = next;
    }

    async fn send(&self, message: &Message) -> Result<(), DomainError> {
        let bytes = self.codec.encode(message)?;
        self.transport.send_to(&bytes, self.server).await?;
        info!(server = %self.server, message = %message, "Sent");
        Ok(())
    }

    /// Outer error ends the session; inner error is an undecodable datagram.
    async fn receive(&self) -> Result<Result<Message, DomainError>, DomainError> {
        let mut buf = [0u8; MAX_DATAGRAM_SIZE + 1];
        let deadline = tokio::time::Instant::now() + self.options.receive_timeout;

        loop {
            let received = tokio::select! {
                _ = self.shutdown.cancelled() => return Err(DomainError::TransportClosed),
                res = tokio::time::timeout_at(deadline, self.transport.recv_from(&mut buf)) => res,
            };

            let (len, from) = match received {
                Ok(res) => res?,
                Err(_) => {
                    return Err(DomainError::Timeout {
                        peer: self.server.to_string(),
                        waited_ms: self.options.receive_timeout.as_millis() as u64,
                    })
                }
            };

            if from != self.server {
                warn!(expected = %self.server, received_from = %from, "Datagram from unexpected source, ignoring");
                continue;
            }

            let decoded = self.codec.decode(&buf[..len]);
            match &decoded {
                Ok(msg) => info!(server = %from, message = %msg, "Received"),
                Err(e) => warn!(server = %from, bytes = len, error = %e, "Received undecodable datagram"),
            }
            return Ok(decoded);
        }
    }
}
