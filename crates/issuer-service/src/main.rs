//! Issuer Service
//!
//! Entry point. Loads the mounted signing keys, keeps them fresh in the
//! background and serves them over HTTP.

use issuer_service::config::{log_filter_directives, Config};
use issuer_service::observability::init_metrics_recorder;
use issuer_service::routes::{self, AppState};
use issuer_service::services::KeyCache;
use issuer_service::tasks::start_key_refresh;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vars: HashMap<String, String> = std::env::vars().collect();

    // Initialize tracing; RUST_LOG wins over LOG_LEVEL
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter_directives(&vars).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Issuer Service");

    // Load configuration
    let config = Config::from_vars(&vars).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        bind_address = %config.bind_address,
        api_base_path = %config.api_base_path,
        mount_path = %config.jwks.mount_path().display(),
        update_interval_seconds = config.jwks.update_interval_seconds,
        "Configuration loaded successfully"
    );

    // Install the recorder before the first key load records anything
    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics recorder: {}", e);
        e
    })?;

    // Keys must load before the listener binds
    let cache = KeyCache::load(config.jwks.clone()).await.map_err(|e| {
        error!(error_kind = e.kind(), "Failed to load signing keys: {}", e);
        e
    })?;
    let cache = Arc::new(cache);

    let cancel_token = CancellationToken::new();

    let refresh_handle = match config.jwks.update_interval() {
        Some(period) => Some(tokio::spawn(start_key_refresh(
            Arc::clone(&cache),
            period,
            cancel_token.child_token(),
        ))),
        None => {
            info!("Key refresh disabled (CERT_UPDATE_INTERVAL=0), serving static keys");
            None
        }
    };

    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;
    let shutdown_timeout = config.shutdown_timeout;

    let state = Arc::new(AppState { cache, config });
    let app = routes::build_routes(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Issuer Service listening on {}", addr);

    let server_token = cancel_token.child_token();
    let mut server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { server_token.cancelled().await })
            .await
    });

    tokio::select! {
        result = &mut server_handle => {
            // Server stopped on its own; nothing left to drain
            cancel_token.cancel();
            if let Some(handle) = refresh_handle {
                let _ = handle.await;
            }
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    cancel_token.cancel();

    match tokio::time::timeout(shutdown_timeout, &mut server_handle).await {
        Ok(result) => result??,
        Err(_) => {
            warn!(
                timeout_seconds = shutdown_timeout.as_secs(),
                "Graceful shutdown timed out, dropping in-flight requests"
            );
            server_handle.abort();
        }
    }

    if let Some(handle) = refresh_handle {
        if let Err(e) = handle.await {
            error!("Key refresh task failed: {}", e);
        }
    }

    info!("Issuer Service shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
