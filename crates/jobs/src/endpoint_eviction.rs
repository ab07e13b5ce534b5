use ferrous_lookup_application::services::EndpointTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// `tokio::time::interval` panics on a zero period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Periodically drops per-endpoint state for clients that went quiet without `End`.
pub struct EndpointEvictionJob {
    tracker: Arc<EndpointTracker>,
    interval: Duration,
    max_idle: Duration,
    shutdown: CancellationToken,
}

impl EndpointEvictionJob {
    pub fn new(tracker: Arc<EndpointTracker>, max_idle: Duration) -> Self {
        Self {
            tracker,
            interval: Duration::from_secs(60),
            max_idle,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_INTERVAL);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            max_idle_secs = self.max_idle.as_secs(),
            "Starting endpoint eviction job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("EndpointEvictionJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let evicted = self.tracker.evict_idle(self.max_idle);
                        debug!(evicted, tracked = self.tracker.len(), "Endpoint eviction pass");
                    }
                }
            }
        })
    }
}
