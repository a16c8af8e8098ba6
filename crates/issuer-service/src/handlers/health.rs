//! Health check handler.

/// Liveness probe handler.
///
/// Returns "OK" while the process is running. Keys are loaded before the
/// listener binds, so a responding server always has a snapshot.
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_ok() {
        assert_eq!(health_check().await, "OK");
    }
}
