//! Periodic removal of expired sessions.
//!
//! Expired sessions are already rejected lazily when they are presented, but
//! abandoned ones would otherwise stay in the store forever. This job purges
//! them on a fixed `tokio::time::interval`.

use std::sync::Arc;
use std::time::Duration;

use luxrent_core::gate::SessionGate;
use tokio_util::sync::CancellationToken;

/// Run the sweep loop until `cancel` is triggered.
pub async fn run(gate: Arc<SessionGate>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Session sweeper started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweeper stopping");
                break;
            }
            _ = interval.tick() => {
                match gate.purge_expired().await {
                    Ok(purged) if purged > 0 => {
                        tracing::info!(purged, "Session sweeper: purged expired sessions");
                    }
                    Ok(_) => {
                        tracing::debug!("Session sweeper: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session sweeper: purge failed");
                    }
                }
            }
        }
    }
}
