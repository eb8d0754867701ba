use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luxrent_api::background::session_sweeper;
use luxrent_api::config::ServerConfig;
use luxrent_api::router::build_app_router;
use luxrent_api::state::AppState;
use luxrent_core::gate::SessionGate;
use luxrent_core::store::InMemorySessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "luxrent_api=debug,luxrent_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(
        host = %config.host,
        port = %config.port,
        session = ?config.session,
        "Loaded server configuration"
    );

    // --- Session gate ---
    let policy = config.session.policy();
    let gate = Arc::new(SessionGate::new(
        Arc::new(InMemorySessionStore::new()),
        policy,
    ));

    // --- Session sweeper ---
    // Without an expiry policy nothing can ever be purged.
    let sweeper_cancel = CancellationToken::new();
    let sweeper_handle = policy.has_limits().then(|| {
        tokio::spawn(session_sweeper::run(
            Arc::clone(&gate),
            Duration::from_secs(config.session.sweep_interval_secs),
            sweeper_cancel.clone(),
        ))
    });

    // --- Router ---
    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );
    let app = build_app_router(AppState::new(config, Arc::clone(&gate)));

    // --- Start server ---
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sweeper_cancel.cancel();
    if let Some(handle) = sweeper_handle {
        match tokio::time::timeout(Duration::from_secs(5), handle).await {
            Ok(Ok(())) => tracing::info!("Session sweeper stopped"),
            Ok(Err(e)) => tracing::error!(error = %e, "Session sweeper task failed"),
            Err(_) => tracing::warn!("Session sweeper did not stop in time"),
        }
    }

    match gate.active_sessions().await {
        Ok(count) => tracing::info!(count, "Dropping in-memory sessions"),
        Err(e) => tracing::warn!(error = %e, "Could not count sessions at shutdown"),
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
