use super::handler::LookupServerHandler;
use ferrous_lookup_application::ports::DatagramTransport;
use ferrous_lookup_domain::{DomainError, MAX_DATAGRAM_SIZE};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Receives datagrams until `shutdown` fires or the transport closes.
///
/// Each datagram is handled on its own task so a slow reply never holds up
/// the receive loop. Receive errors are logged and the loop keeps going.
pub async fn serve_udp(
    transport: Arc<dyn DatagramTransport>,
    handler: Arc<LookupServerHandler>,
    shutdown: CancellationToken,
) -> Result<(), DomainError> {
    let local = transport.local_addr()?;
    info!(bind_address = %local, "Lookup server is running");

    // One spare byte so oversized datagrams reach the codec's size check.
    let mut recv_buf = [0u8; MAX_DATAGRAM_SIZE + 1];
    let mut workers: JoinSet<()> = JoinSet::new();

    loop {
        while workers.try_join_next().is_some() {}

        let received = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Lookup server shutdown requested");
                break;
            }
            res = transport.recv_from(&mut recv_buf) => res,
        };

        match received {
            Ok((len, from)) => {
                let datagram = recv_buf[..len].to_vec();
                let handler = handler.clone();
                let transport = transport.clone();
                workers.spawn(async move {
                    let Some(reply) = handler.handle_datagram(&datagram, from) else {
                        return;
                    };
                    match transport.send_to(&reply, from).await {
                        Ok(sent) => debug!(client = %from, bytes_sent = sent, "Reply sent"),
                        Err(e) => error!(client = %from, error = %e, "Failed to send reply"),
                    }
                });
            }
            Err(DomainError::TransportClosed) => {
                info!("Transport closed, stopping lookup server");
                break;
            }
            Err(e) => {
                error!(error = %e, "UDP recv error");
            }
        }
    }

    workers.shutdown().await;
    info!(bind_address = %local, "Lookup server stopped");
    Ok(())
}
