//! Test server harness for E2E testing
//!
//! Provides TestIssuerServer for spawning real issuer server instances in tests.

use crate::mounted_dir::MountedKeyDir;
use issuer_service::config::{self, Config};
use issuer_service::observability::init_metrics_recorder;
use issuer_service::routes::{self, AppState};
use issuer_service::services::KeyCache;
use issuer_service::tasks::start_key_refresh;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Test harness for spawning the issuer server in E2E tests
///
/// The server and its refresh task stop when the harness is dropped.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_certs() -> Result<()> {
///     let mount = MountedKeyDir::with_default_keys()?;
///     let server = TestIssuerServer::spawn(&mount).await?;
///
///     let jwks: serde_json::Value = reqwest::get(format!("{}/api/v1/certs/x", server.url()))
///         .await?
///         .json()
///         .await?;
///     assert_eq!(jwks["keys"].as_array().map(Vec::len), Some(3));
///     Ok(())
/// }
/// ```
pub struct TestIssuerServer {
    addr: SocketAddr,
    cache: Arc<KeyCache>,
    config: Config,
    cancel_token: CancellationToken,
    _handle: JoinHandle<()>,
}

impl TestIssuerServer {
    /// Spawn a server over `mount` with background refresh disabled.
    pub async fn spawn(mount: &MountedKeyDir) -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(Self::config_for(mount, 0)).await
    }

    /// Spawn a server over `mount` that refreshes every `interval_seconds`.
    pub async fn spawn_with_refresh(
        mount: &MountedKeyDir,
        interval_seconds: u64,
    ) -> Result<Self, anyhow::Error> {
        Self::spawn_with_config(Self::config_for(mount, interval_seconds)).await
    }

    /// Spawn a new test server instance with an explicit configuration
    ///
    /// The server will:
    /// - Load the keys (failing the spawn if that fails)
    /// - Start the refresh task when the configured interval is non-zero
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with_config(config: Config) -> Result<Self, anyhow::Error> {
        let cache = Arc::new(
            KeyCache::load(config.jwks.clone())
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load keys: {}", e))?,
        );

        let cancel_token = CancellationToken::new();

        if let Some(period) = config.jwks.update_interval() {
            tokio::spawn(start_key_refresh(
                Arc::clone(&cache),
                period,
                cancel_token.child_token(),
            ));
        }

        let state = Arc::new(AppState {
            cache: Arc::clone(&cache),
            config: config.clone(),
        });

        // Initialize metrics recorder for test server
        // Note: This may fail if already installed in the test process.
        // In that case, we create a new recorder without installing it globally.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let recorder = PrometheusBuilder::new().build_recorder();
                recorder.handle()
            }
        };

        let app = routes::build_routes(state, metrics_handle);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let server_token = cancel_token.child_token();
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(async move { server_token.cancelled().await })
                .await
            {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            cache,
            config,
            cancel_token,
            _handle: handle,
        })
    }

    fn config_for(mount: &MountedKeyDir, interval_seconds: u64) -> Config {
        let mut jwks = mount.config();
        jwks.update_interval_seconds = interval_seconds;

        Config {
            bind_address: "127.0.0.1:0".to_string(),
            api_base_path: config::DEFAULT_API_BASE_PATH.to_string(),
            path_prefix: String::new(),
            issuer_url: None,
            shutdown_timeout: Duration::from_secs(config::DEFAULT_SHUTDOWN_TIMEOUT_SECONDS),
            jwks,
        }
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the key cache backing the server
    pub fn cache(&self) -> &Arc<KeyCache> {
        &self.cache
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestIssuerServer {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
