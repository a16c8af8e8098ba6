//! Metrics definitions for the issuer service
//!
//! All metrics follow Prometheus naming conventions:
//! - `issuer_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `status`: 2 values (success, error)
//! - `endpoint`: 2 values (certs, issuer)

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize the Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded. Refresh buckets cover
/// reading six small files and parsing three certificates.
///
/// # Errors
///
/// Returns an error if the recorder is already installed or bucket
/// configuration is rejected.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("issuer_key_refresh".to_string()),
            &[
                0.001, 0.002, 0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000,
            ],
        )
        .map_err(|e| format!("Failed to set key refresh buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Key Refresh Metrics
// ============================================================================

/// Record a snapshot build (startup load or scheduled refresh)
///
/// Metric: `issuer_key_refresh_total`, `issuer_key_refresh_duration_seconds`
/// Labels: `status`
pub fn record_key_refresh(status: &str, duration: Duration) {
    histogram!("issuer_key_refresh_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("issuer_key_refresh_total", "status" => status.to_string()).increment(1);
}

/// Update the number of keys in the installed snapshot
///
/// Metric: `issuer_cached_keys`
pub fn set_cached_keys(count: usize) {
    gauge!("issuer_cached_keys").set(count as f64);
}

// ============================================================================
// Request Metrics
// ============================================================================

/// Record a served key request
///
/// Metric: `issuer_jwks_requests_total`
/// Labels: `endpoint` (certs, issuer)
pub fn record_jwks_request(endpoint: &str) {
    counter!("issuer_jwks_requests_total", "endpoint" => endpoint.to_string()).increment(1);
}
