use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Cancels `token` on Ctrl-C.
pub fn spawn_shutdown_listener(token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        token.cancel();
    });
}
