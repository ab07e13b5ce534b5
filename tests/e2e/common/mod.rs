#![allow(dead_code)]

use ferrous_lookup_application::ports::{DatagramTransport, MessageCodec, RecordRepository};
use ferrous_lookup_application::services::EndpointTracker;
use ferrous_lookup_application::use_cases::{
    DispatchMessageUseCase, LookupSessionUseCase, SessionOptions,
};
use ferrous_lookup_domain::{DnsRecord, Message, RecordType, MAX_DATAGRAM_SIZE};
use ferrous_lookup_infrastructure::codec::JsonMessageCodec;
use ferrous_lookup_infrastructure::repositories::InMemoryRecordStore;
use ferrous_lookup_infrastructure::server::{serve_udp, LookupServerHandler};
use ferrous_lookup_infrastructure::transport::UdpDatagramTransport;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub fn example_records() -> Vec<DnsRecord> {
    vec![
        DnsRecord::new("example.com", RecordType::A, "93.184.216.34"),
        DnsRecord::new(
            "example.com",
            RecordType::AAAA,
            "2606:2800:220:1:248:1893:25c8:1946",
        ),
        DnsRecord::new("www.example.com", RecordType::CNAME, "example.com"),
    ]
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub tracker: Arc<EndpointTracker>,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<Result<(), ferrous_lookup_domain::DomainError>>,
}

impl TestServer {
    pub async fn start(records: Vec<DnsRecord>) -> Self {
        let transport = UdpDatagramTransport::bind("127.0.0.1:0".parse().unwrap())
            .await
            .unwrap();
        let addr = transport.local_addr().unwrap();

        let store: Arc<dyn RecordRepository> = Arc::new(InMemoryRecordStore::load(records));
        let tracker = Arc::new(EndpointTracker::new());
        let dispatch = Arc::new(DispatchMessageUseCase::new(store, tracker.clone()));
        let handler = Arc::new(LookupServerHandler::new(
            dispatch,
            Arc::new(JsonMessageCodec::new()),
        ));

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(serve_udp(Arc::new(transport), handler, shutdown.clone()));

        Self {
            addr,
            tracker,
            shutdown,
            handle,
        }
    }

    pub async fn stop(self) {
        self.shutdown.cancel();
        let result = tokio::time::timeout(RECV_TIMEOUT, self.handle)
            .await
            .expect("server did not stop")
            .expect("server task panicked");
        assert!(result.is_ok());
    }
}

pub async fn session(server: SocketAddr, options: SessionOptions) -> LookupSessionUseCase {
    let transport = UdpDatagramTransport::bind("127.0.0.1:0".parse().unwrap())
        .await
        .unwrap();
    LookupSessionUseCase::new(
        Arc::new(transport),
        Arc::new(JsonMessageCodec::new()),
        server,
        options,
    )
}

/// Raw client socket for driving the server message by message.
pub struct RawClient {
    pub socket: UdpSocket,
    server: SocketAddr,
    codec: JsonMessageCodec,
}

impl RawClient {
    pub async fn connect(server: SocketAddr) -> Self {
        Self {
            socket: UdpSocket::bind("127.0.0.1:0").await.unwrap(),
            server,
            codec: JsonMessageCodec::new(),
        }
    }

    pub async fn send(&self, message: &Message) {
        let bytes = self.codec.encode(message).unwrap();
        self.socket.send_to(&bytes, self.server).await.unwrap();
    }

    pub async fn send_raw(&self, bytes: &[u8]) {
        self.socket.send_to(bytes, self.server).await.unwrap();
    }

    pub async fn recv(&self) -> Message {
        self.try_recv(RECV_TIMEOUT).await.expect("no reply from server")
    }

    pub async fn try_recv(&self, wait: Duration) -> Option<Message> {
        let mut buf = [0u8; MAX_DATAGRAM_SIZE];
        let (len, from) = tokio::time::timeout(wait, self.socket.recv_from(&mut buf))
            .await
            .ok()?
            .unwrap();
        assert_eq!(from, self.server);
        Some(self.codec.decode(&buf[..len]).unwrap())
    }
}
