use dashmap::DashMap;
use ferrous_lookup_domain::MessageId;
use rustc_hash::FxBuildHasher;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointState {
    pub last_seen: Instant,
    /// Id of the last `DNSLookupReply` sent that has not been acknowledged yet.
    pub pending_reply: Option<MessageId>,
    pub datagrams: u64,
}

impl EndpointState {
    fn new(now: Instant) -> Self {
        Self {
            last_seen: now,
            pending_reply: None,
            datagrams: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckCorrelation {
    Matched,
    Uncorrelated { pending: Option<MessageId> },
}

/// Per-endpoint bookkeeping for the server.
///
/// Entries are created on first contact and removed on `End` or after an idle
/// period. Nothing here changes which reply the server sends.
#[derive(Debug)]
pub struct EndpointTracker {
    endpoints: DashMap<SocketAddr, EndpointState, FxBuildHasher>,
}

impl EndpointTracker {
    pub fn new() -> Self {
        Self {
            endpoints: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn touch(&self, endpoint: SocketAddr) {
        let now = Instant::now();
        let mut entry = self
            .endpoints
            .entry(endpoint)
            .or_insert_with(|| EndpointState::new(now));
        entry.last_seen = now;
        entry.datagrams += 1;
    }

    pub fn record_reply(&self, endpoint: SocketAddr, id: MessageId) {
        let now = Instant::now();
        self.endpoints
            .entry(endpoint)
            .or_insert_with(|| EndpointState::new(now))
            .pending_reply = Some(id);
    }

    pub fn record_ack(&self, endpoint: SocketAddr, id: MessageId) -> AckCorrelation {
        match self.endpoints.get_mut(&endpoint) {
            Some(mut state) if state.pending_reply == Some(id) => {
                state.pending_reply = None;
                AckCorrelation::Matched
            }
            Some(state) => AckCorrelation::Uncorrelated {
                pending: state.pending_reply,
            },
            None => AckCorrelation::Uncorrelated { pending: None },
        }
    }

    pub fn evict(&self, endpoint: SocketAddr) -> bool {
        self.endpoints.remove(&endpoint).is_some()
    }

    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_idle_at(Instant::now(), max_idle)
    }

    pub fn evict_idle_at(&self, now: Instant, max_idle: Duration) -> usize {
        let before = self.endpoints.len();
        self.endpoints
            .retain(|_, state| now.saturating_duration_since(state.last_seen) < max_idle);
        let evicted = before.saturating_sub(self.endpoints.len());
        if evicted > 0 {
            debug!(evicted, remaining = self.endpoints.len(), "Evicted idle endpoints");
        }
        evicted
    }

    pub fn get(&self, endpoint: SocketAddr) -> Option<EndpointState> {
        self.endpoints.get(&endpoint).map(|s| s.clone())
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl Default for EndpointTracker {
    fn default() -> Self {
        Self::new()
    }
}
