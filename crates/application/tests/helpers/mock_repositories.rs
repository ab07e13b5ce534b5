#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_lookup_application::ports::{DatagramTransport, MessageCodec, RecordRepository};
use ferrous_lookup_domain::{normalize_name, DnsRecord, DomainError, Message, RecordType};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub fn addr(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

pub struct MockRecordRepository {
    records: Vec<DnsRecord>,
}

impl MockRecordRepository {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self { records }
    }

    pub fn example() -> Self {
        Self::new(vec![
            DnsRecord::new("example.com", RecordType::A, "93.184.216.34"),
            DnsRecord::new(
                "example.com",
                RecordType::AAAA,
                "2606:2800:220:1:248:1893:25c8:1946",
            ),
            DnsRecord::new("www.example.com", RecordType::CNAME, "example.com"),
        ])
    }
}

impl RecordRepository for MockRecordRepository {
    fn find(&self, name: &str, record_type: Option<RecordType>) -> Result<DnsRecord, DomainError> {
        let key = normalize_name(name);
        self.records
            .iter()
            .find(|r| {
                r.normalized_name() == key && record_type.map_or(true, |t| t == r.record_type)
            })
            .cloned()
            .ok_or_else(|| DomainError::NotFound(name.to_string()))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Encodes a message as an index into a shared table. Anything else fails to decode.
#[derive(Default)]
pub struct MockCodec {
    table: Mutex<Vec<Message>>,
}

impl MockCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageCodec for MockCodec {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut table = self.table.lock().unwrap();
        table.push(message.clone());
        let mut bytes = b"M".to_vec();
        bytes.extend_from_slice(&((table.len() - 1) as u32).to_be_bytes());
        Ok(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Message, DomainError> {
        if bytes.len() != 5 || bytes[0] != b'M' {
            return Err(DomainError::Decode("not a mock frame".to_string()));
        }
        let index = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
        self.table
            .lock()
            .unwrap()
            .get(index)
            .cloned()
            .ok_or_else(|| DomainError::Decode("unknown frame".to_string()))
    }
}

/// Transport fed from a queue of scripted inbound datagrams.
pub struct MockTransport {
    local: SocketAddr,
    inbound: tokio::sync::Mutex<mpsc::UnboundedReceiver<(Vec<u8>, SocketAddr)>>,
    inbound_tx: mpsc::UnboundedSender<(Vec<u8>, SocketAddr)>,
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
}

impl MockTransport {
    pub fn new(local: SocketAddr) -> Arc<Self> {
        let (inbound_tx, inbound) = mpsc::unbounded_channel();
        Arc::new(Self {
            local,
            inbound: tokio::sync::Mutex::new(inbound),
            inbound_tx,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn push_inbound(&self, bytes: Vec<u8>, from: SocketAddr) {
        let _ = self.inbound_tx.send((bytes, from));
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl DatagramTransport for MockTransport {
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<usize, DomainError> {
        self.sent.lock().unwrap().push((bytes.to_vec(), target));
        Ok(bytes.len())
    }

    async fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), DomainError> {
        let (bytes, from) = self
            .inbound
            .lock()
            .await
            .recv()
            .await
            .ok_or(DomainError::TransportClosed)?;
        let len = bytes.len().min(buf.len());
        buf[..len].copy_from_slice(&bytes[..len]);
        Ok((len, from))
    }

    fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.local)
    }
}
