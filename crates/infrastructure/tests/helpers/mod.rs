#![allow(dead_code)]

use ferrous_lookup_application::ports::RecordRepository;
use ferrous_lookup_application::services::EndpointTracker;
use ferrous_lookup_application::use_cases::DispatchMessageUseCase;
use ferrous_lookup_domain::{DnsRecord, RecordType};
use ferrous_lookup_infrastructure::codec::JsonMessageCodec;
use ferrous_lookup_infrastructure::repositories::InMemoryRecordStore;
use ferrous_lookup_infrastructure::server::LookupServerHandler;
use std::net::SocketAddr;
use std::sync::Arc;

pub fn client(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

pub fn sample_records() -> Vec<DnsRecord> {
    vec![
        DnsRecord::new("example.com", RecordType::A, "93.184.216.34"),
        DnsRecord::new("example.com", RecordType::MX, "mail.example.com").with_priority(10),
        DnsRecord::new("Docs.Example.com", RecordType::CNAME, "example.com").with_ttl(300),
    ]
}

pub struct HandlerFixture {
    pub handler: LookupServerHandler,
    pub tracker: Arc<EndpointTracker>,
    pub codec: JsonMessageCodec,
}

impl HandlerFixture {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        let store: Arc<dyn RecordRepository> = Arc::new(InMemoryRecordStore::load(records));
        let tracker = Arc::new(EndpointTracker::new());
        let dispatch =
            Arc::new(DispatchMessageUseCase::new(store, tracker.clone()).with_id_start(500));
        Self {
            handler: LookupServerHandler::new(dispatch, Arc::new(JsonMessageCodec::new())),
            tracker,
            codec: JsonMessageCodec::new(),
        }
    }
}
