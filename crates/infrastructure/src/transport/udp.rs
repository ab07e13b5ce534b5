//! UDP transport.
//!
//! Messages are sent as-is, one per datagram, no framing. Callers receive into
//! a buffer one byte larger than `MAX_DATAGRAM_SIZE`, so an oversized datagram
//! arrives with a length over the limit and the codec rejects it as oversized.

use async_trait::async_trait;
use ferrous_lookup_application::ports::DatagramTransport;
use ferrous_lookup_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::debug;

pub struct UdpDatagramTransport {
    socket: UdpSocket,
}

impl UdpDatagramTransport {
    pub async fn bind(addr: SocketAddr) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr).await.map_err(|e| {
            DomainError::Transport(format!("Failed to bind UDP socket on {}: {}", addr, e))
        })?;
        debug!(local = %addr, "UDP socket bound");
        Ok(Self { socket })
    }
}

fn map_io_error(action: &str, peer: Option<SocketAddr>, e: io::Error) -> DomainError {
    match e.kind() {
        io::ErrorKind::NotConnected | io::ErrorKind::BrokenPipe => DomainError::TransportClosed,
        _ => match peer {
            Some(peer) => DomainError::Transport(format!("Failed to {} {}: {}", action, peer, e)),
            None => DomainError::Transport(format!("Failed to {}: {}", action, e)),
        },
    }
}

#[async_trait]
impl DatagramTransport for UdpDatagramTransport {
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<usize, DomainError> {
        let sent = self
            .socket
            .send_to(bytes, target)
            .await
            .map_err(|e| map_io_error("send datagram to", Some(target), e))?;

        debug!(target = %target, bytes_sent = sent, "UDP datagram sent");
        Ok(sent)
    }

    async fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), DomainError> {
        let (len, from) = self
            .socket
            .recv_from(buf)
            .await
            .map_err(|e| map_io_error("receive datagram", None, e))?;

        debug!(from = %from, bytes_received = len, "UDP datagram received");
        Ok((len, from))
    }

    fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| map_io_error("read local address", None, e))
    }
}
