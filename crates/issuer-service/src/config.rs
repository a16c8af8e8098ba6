//! Issuer service configuration.
//!
//! Configuration is loaded from environment variables once at startup and
//! passed explicitly into the key cache and the refresh task.

use crate::models::RotationSlot;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default certificate refresh interval in seconds.
pub const DEFAULT_UPDATE_INTERVAL_SECONDS: u64 = 10;

/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 5;

pub const DEFAULT_SERVER_PORT: u16 = 8081;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

pub const DEFAULT_CERT_FILE_NEXT: &str = "next-tls.crt";
pub const DEFAULT_KID_FILE_NEXT: &str = "next-tls.kid";
pub const DEFAULT_CERT_FILE_ACTIVE: &str = "tls.crt";
pub const DEFAULT_KID_FILE_ACTIVE: &str = "tls.kid";
pub const DEFAULT_CERT_FILE_PREV: &str = "prev-tls.crt";
pub const DEFAULT_KID_FILE_PREV: &str = "prev-tls.kid";

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address. `BIND_ADDRESS` if set, otherwise `0.0.0.0:{SERVER_PORT}`.
    pub bind_address: String,

    /// Prefix of the versioned API group (default: "/api/v1").
    pub api_base_path: String,

    /// External path prefix inserted into discovery URLs (e.g. "/spacegate").
    pub path_prefix: String,

    /// Discovery base URL used when a request carries no `X-Forwarded-Host`.
    pub issuer_url: Option<String>,

    /// Time allowed for in-flight requests after a shutdown signal.
    pub shutdown_timeout: Duration,

    pub jwks: JwksFileConfig,
}

/// Location of the mounted certificate and key id files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwksFileConfig {
    /// Refresh interval in seconds. `0` disables the refresh task.
    pub update_interval_seconds: u64,
    pub mount_path: PathBuf,
    pub cert_file_next: String,
    pub kid_file_next: String,
    pub cert_file_active: String,
    pub kid_file_active: String,
    pub cert_file_prev: String,
    pub kid_file_prev: String,
}

impl JwksFileConfig {
    /// Configuration using the default file names under `mount_path`.
    pub fn with_mount_path(mount_path: impl Into<PathBuf>) -> Self {
        Self {
            update_interval_seconds: DEFAULT_UPDATE_INTERVAL_SECONDS,
            mount_path: mount_path.into(),
            cert_file_next: DEFAULT_CERT_FILE_NEXT.to_string(),
            kid_file_next: DEFAULT_KID_FILE_NEXT.to_string(),
            cert_file_active: DEFAULT_CERT_FILE_ACTIVE.to_string(),
            kid_file_active: DEFAULT_KID_FILE_ACTIVE.to_string(),
            cert_file_prev: DEFAULT_CERT_FILE_PREV.to_string(),
            kid_file_prev: DEFAULT_KID_FILE_PREV.to_string(),
        }
    }

    pub fn cert_file(&self, slot: RotationSlot) -> PathBuf {
        let name = match slot {
            RotationSlot::Next => &self.cert_file_next,
            RotationSlot::Active => &self.cert_file_active,
            RotationSlot::Previous => &self.cert_file_prev,
        };
        self.mount_path.join(name)
    }

    pub fn kid_file(&self, slot: RotationSlot) -> PathBuf {
        let name = match slot {
            RotationSlot::Next => &self.kid_file_next,
            RotationSlot::Active => &self.kid_file_active,
            RotationSlot::Previous => &self.kid_file_prev,
        };
        self.mount_path.join(name)
    }

    pub fn mount_path(&self) -> &Path {
        &self.mount_path
    }

    /// Refresh period, or `None` when scheduling is disabled.
    pub fn update_interval(&self) -> Option<Duration> {
        match self.update_interval_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid certificate update interval: {0}")]
    InvalidUpdateInterval(String),

    #[error("Invalid graceful shutdown timeout: {0}")]
    InvalidShutdownTimeout(String),

    #[error("Invalid API base path: {0}")]
    InvalidBasePath(String),

    #[error("Invalid server port: {0}")]
    InvalidServerPort(String),
}

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
///
/// `LOG_LEVEL` (default "info") applies to the service's own targets and to
/// `tower_http`.
pub fn log_filter_directives(vars: &HashMap<String, String>) -> String {
    let level = vars
        .get("LOG_LEVEL")
        .map(|level| level.trim().to_lowercase())
        .filter(|level| !level.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    format!("issuer={level},tower_http={level}")
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mount_path = vars
            .get("CERT_MOUNT_PATH")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("CERT_MOUNT_PATH".to_string()))?;

        let update_interval_seconds = match vars.get("CERT_UPDATE_INTERVAL") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidUpdateInterval(format!("'{}' ({})", raw, e))
            })?,
            None => DEFAULT_UPDATE_INTERVAL_SECONDS,
        };

        let shutdown_timeout_seconds = match vars.get("GRACEFUL_SHUTDOWN_TIMEOUT") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidShutdownTimeout(format!("'{}' ({})", raw, e))
            })?,
            None => DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
        };

        let api_base_path = vars
            .get("API_BASE_PATH")
            .cloned()
            .unwrap_or_else(|| DEFAULT_API_BASE_PATH.to_string());

        if !api_base_path.starts_with('/') {
            return Err(ConfigError::InvalidBasePath(format!(
                "'{}' must start with '/'",
                api_base_path
            )));
        }

        // The legacy `/auth/realms` tree lives at the root
        if api_base_path.trim_end_matches('/').is_empty() {
            return Err(ConfigError::InvalidBasePath(
                "base path must not be the root".to_string(),
            ));
        }

        let file_name = |key: &str, default: &str| {
            vars.get(key)
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        let jwks = JwksFileConfig {
            update_interval_seconds,
            mount_path: PathBuf::from(mount_path),
            cert_file_next: file_name("CERT_FILE_NEXT", DEFAULT_CERT_FILE_NEXT),
            kid_file_next: file_name("KID_FILE_NEXT", DEFAULT_KID_FILE_NEXT),
            cert_file_active: file_name("CERT_FILE_ACTIVE", DEFAULT_CERT_FILE_ACTIVE),
            kid_file_active: file_name("KID_FILE_ACTIVE", DEFAULT_KID_FILE_ACTIVE),
            cert_file_prev: file_name("CERT_FILE_PREV", DEFAULT_CERT_FILE_PREV),
            kid_file_prev: file_name("KID_FILE_PREV", DEFAULT_KID_FILE_PREV),
        };

        let server_port = match vars.get("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidServerPort(format!("'{}' ({})", raw, e)))?,
            None => DEFAULT_SERVER_PORT,
        };

        let bind_address = vars
            .get("BIND_ADDRESS")
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("0.0.0.0:{}", server_port));

        Ok(Config {
            bind_address,
            api_base_path: api_base_path.trim_end_matches('/').to_string(),
            path_prefix: vars
                .get("PATH_PREFIX")
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            issuer_url: vars
                .get("ISSUER_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            shutdown_timeout: Duration::from_secs(shutdown_timeout_seconds),
            jwks,
        })
    }
}
