//! Railway IVR service - voice callbacks for the passenger helpline.
//!
//! This is the main entry point for the IVR service.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ivr_service::{create_router, AppState, ServiceConfig};
use ivr_store::Store;

/// How often expired call contexts are swept.
const CONTEXT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ivr=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting railway IVR service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir,
        public_base_url = ?config.public_base_url,
        voice = %config.voice,
        max_retries = config.max_retries,
        twilio_configured = config.twilio_account_sid.is_some(),
        "Service configuration loaded"
    );

    if config.verify_twilio_signature
        && (config.twilio_auth_token.is_none() || config.public_base_url.is_none())
    {
        tracing::warn!(
            "Signature verification requested but auth token or public base URL is missing - \
             callbacks will not be verified"
        );
    }

    let store = open_store(&config)?;
    ivr_store::seed::seed_if_empty(store.as_ref())?;

    let state = AppState::new(store, config.clone());
    let sweeper = state.contexts.start_sweeper(CONTEXT_SWEEP_INTERVAL);

    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if sweeper.send(true).is_err() {
        tracing::debug!("Context sweeper already stopped");
    }
    tracing::info!("Server shutdown complete");
    Ok(())
}

#[cfg(feature = "rocksdb-backend")]
fn open_store(config: &ServiceConfig) -> ivr_store::Result<Arc<dyn Store>> {
    tracing::info!(path = %config.data_dir, "Opening RocksDB store");
    Ok(Arc::new(ivr_store::RocksStore::open(&config.data_dir)?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_store(config: &ServiceConfig) -> ivr_store::Result<Arc<dyn Store>> {
    tracing::warn!(
        path = %config.data_dir,
        "Built without RocksDB - using in-memory store, records are lost on restart"
    );
    Ok(Arc::new(ivr_store::MemoryStore::new()))
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
