//! Key refresh background task.
//!
//! Rebuilds the key snapshot from the mounted files on a fixed period so that
//! certificate rotations on disk become visible without a restart.
//!
//! # Behavior
//!
//! - A failed rebuild is logged and the installed snapshot stays in place.
//! - Refreshes run inline in the task loop, so two never overlap. Ticks missed
//!   while a refresh is running are skipped rather than replayed.
//!
//! # Graceful Shutdown
//!
//! The task supports graceful shutdown via a cancellation token. When the token
//! is cancelled, the task finishes any refresh in progress and exits cleanly.

use crate::services::KeyCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Start the key refresh background task.
///
/// The cache must already be loaded; the first refresh happens one full
/// `period` after the task starts.
///
/// # Arguments
///
/// * `cache` - Cache to refresh
/// * `period` - Time between refresh attempts (must be non-zero)
/// * `cancel_token` - Token for graceful shutdown
///
/// # Returns
///
/// Returns when the cancellation token is triggered.
#[instrument(skip_all, name = "issuer.task.key_refresh")]
pub async fn start_key_refresh(
    cache: Arc<KeyCache>,
    period: Duration,
    cancel_token: CancellationToken,
) {
    info!(
        target: "issuer.task.key_refresh",
        interval_seconds = period.as_secs_f64(),
        "Starting key refresh task"
    );

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // The first tick completes immediately; startup already loaded the keys
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = cache.refresh().await {
                    tracing::error!(
                        target: "issuer.task.key_refresh",
                        error = %e,
                        error_kind = e.kind(),
                        "Failed to refresh keys, keeping current snapshot"
                    );
                }
            }
            _ = cancel_token.cancelled() => {
                info!(
                    target: "issuer.task.key_refresh",
                    "Key refresh task received shutdown signal, exiting"
                );
                break;
            }
        }
    }

    info!(
        target: "issuer.task.key_refresh",
        "Key refresh task stopped"
    );
}
