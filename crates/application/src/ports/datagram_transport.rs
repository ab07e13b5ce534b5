use async_trait::async_trait;
use ferrous_lookup_domain::DomainError;
use std::net::SocketAddr;

#[async_trait]
pub trait DatagramTransport: Send + Sync {
    async fn send_to(&self, bytes: &[u8], target: SocketAddr) -> Result<usize, DomainError>;

    /// Blocks until one datagram arrives. Callers bound it with a timeout or token.
    async fn recv_from(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), DomainError>;

    fn local_addr(&self) -> Result<SocketAddr, DomainError>;
}
