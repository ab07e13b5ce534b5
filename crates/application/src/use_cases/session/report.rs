use super::SessionState;
use ferrous_lookup_domain::{DnsRecord, LookupTarget, MessageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// Reply received and acknowledged.
    Resolved { reply_id: MessageId, record: DnsRecord },
    /// Server answered with an `Error` message; no Ack was sent.
    NotFound { reply_id: MessageId, reason: String },
    /// Wrong message type or undecodable datagram; skipped without an Ack.
    Unexpected { detail: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub target: LookupTarget,
    pub result: LookupResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub welcomed: bool,
    pub outcomes: Vec<LookupOutcome>,
    pub acks_sent: usize,
    pub ended: bool,
    /// Last state reached; `Closed` after a completed run.
    pub state: SessionState,
}

impl SessionReport {
    pub(crate) fn new() -> Self {
        Self {
            welcomed: false,
            outcomes: Vec::new(),
            acks_sent: 0,
            ended: false,
            state: SessionState::Start,
        }
    }

    pub fn resolved(&self) -> impl Iterator<Item = &DnsRecord> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            LookupResult::Resolved { record, .. } => Some(record),
            _ => None,
        })
    }

    pub fn not_found_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, LookupResult::NotFound { .. }))
            .count()
    }

    pub fn unexpected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.result, LookupResult::Unexpected { .. }))
            .count()
    }
}
