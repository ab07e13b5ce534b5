use ferrous_lookup_application::ports::{MessageCodec, RecordRepository};
use ferrous_lookup_application::services::EndpointTracker;
use ferrous_lookup_application::use_cases::DispatchMessageUseCase;
use ferrous_lookup_domain::Config;
use ferrous_lookup_infrastructure::codec::JsonMessageCodec;
use ferrous_lookup_infrastructure::repositories::InMemoryRecordStore;
use ferrous_lookup_infrastructure::server::LookupServerHandler;
use std::sync::Arc;
use tracing::{info, warn};

pub struct ServerServices {
    pub records: Arc<dyn RecordRepository>,
    pub tracker: Arc<EndpointTracker>,
    pub handler: Arc<LookupServerHandler>,
}

impl ServerServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let records = config.load_records()?;
        if records.is_empty() {
            warn!("No records loaded, every lookup will miss");
        }

        let records: Arc<dyn RecordRepository> = Arc::new(InMemoryRecordStore::load(records));
        let tracker = Arc::new(EndpointTracker::new());
        let codec: Arc<dyn MessageCodec> = Arc::new(JsonMessageCodec::new());

        let dispatch = Arc::new(DispatchMessageUseCase::new(records.clone(), tracker.clone()));
        let handler = Arc::new(LookupServerHandler::new(dispatch, codec));

        info!(records = records.len(), "Server services ready");

        Ok(Self {
            records,
            tracker,
            handler,
        })
    }
}
