//! HTTP routes for the issuer service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::handlers;
use crate::services::KeyCache;
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded key cache, refreshed in the background.
    pub cache: Arc<KeyCache>,

    /// Service configuration.
    pub config: Config,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/health` - Liveness probe (simple "OK") - unversioned
/// - `/metrics` - Prometheus metrics endpoint - unversioned
/// - `{base}/discovery/{realm}` - OpenID discovery document
/// - `{base}/certs/{realm}` - JWKS
/// - `{base}/issuer/{realm}` - Realm summary
/// - `{base}/auth/*` - 501
/// - `/auth/realms/{realm}/...` - Keycloak-compatible paths for the same data
/// - TraceLayer for request logging
/// - 30 second request timeout
///
/// `{base}` is `Config::api_base_path` (default `/api/v1`).
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let base = state.config.api_base_path.clone();

    // Versioned API group
    let api_routes = Router::new()
        .route(
            &format!("{}/discovery/:realm", base),
            get(handlers::get_discovery),
        )
        .route(&format!("{}/certs/:realm", base), get(handlers::get_certs))
        .route(
            &format!("{}/issuer/:realm", base),
            get(handlers::get_realm_info),
        )
        .route(&format!("{}/auth", base), get(handlers::not_implemented))
        .route(
            &format!("{}/auth/*rest", base),
            get(handlers::not_implemented),
        );

    // Keycloak-style realm paths
    let realm_routes = Router::new()
        .route("/auth/realms/:realm", get(handlers::get_realm_info))
        .route("/auth/realms/:realm/", get(handlers::get_realm_info))
        .route(
            "/auth/realms/:realm/.well-known/openid-configuration",
            get(handlers::get_discovery),
        )
        .route(
            "/auth/realms/:realm/protocol/openid-connect/certs",
            get(handlers::get_certs),
        )
        .route(
            "/auth/realms/:realm/protocol/openid-connect/auth",
            get(handlers::not_implemented),
        )
        .route(
            "/auth/realms/:realm/protocol/openid-connect/auth/*rest",
            get(handlers::not_implemented),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(api_routes)
        .merge(realm_routes)
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer - Timeout the request (innermost)
    // 2. TraceLayer - Log request details
    public_routes
        .merge(metrics_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{DiscoveryDocument, Jwks, RealmInfo, RotationSlot};
    use crate::services::KeySnapshot;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use issuer_test_utils::fixtures;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        state: Arc<AppState>,
        _dir: TempDir,
    }

    async fn test_app(extra_vars: &[(&str, &str)]) -> TestApp {
        let dir = TempDir::new().unwrap();
        for (fixture, kid, cert_name, kid_name) in [
            (&fixtures::NEXT, "K2", "next-tls.crt", "next-tls.kid"),
            (&fixtures::ACTIVE, "K1", "tls.crt", "tls.kid"),
            (&fixtures::PREVIOUS, "K3", "prev-tls.crt", "prev-tls.kid"),
        ] {
            fs::write(dir.path().join(cert_name), fixture.pem).unwrap();
            fs::write(dir.path().join(kid_name), kid).unwrap();
        }

        let mut vars = HashMap::from([(
            "CERT_MOUNT_PATH".to_string(),
            dir.path().display().to_string(),
        )]);
        for (key, value) in extra_vars {
            vars.insert(key.to_string(), value.to_string());
        }
        let config = Config::from_vars(&vars).unwrap();

        let cache = Arc::new(KeyCache::load(config.jwks.clone()).await.unwrap());
        let state = Arc::new(AppState { cache, config });
        let handle = PrometheusBuilder::new().build_recorder().handle();

        TestApp {
            router: build_routes(Arc::clone(&state), handle),
            state,
            _dir: dir,
        }
    }

    async fn get(router: &Router, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, HashMap<String, String>, Vec<u8>) {
        let mut request = Request::builder().uri(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let response_headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, response_headers, body)
    }

    fn kids(jwks: &Jwks) -> Vec<&str> {
        jwks.keys.iter().map(|k| k.kid.as_str()).collect()
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(&[]).await;
        let (status, _, body) = get(&app.router, "/health", &[]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn test_certs_on_both_paths() {
        let app = test_app(&[]).await;

        for uri in [
            "/api/v1/certs/default",
            "/auth/realms/default/protocol/openid-connect/certs",
        ] {
            let (status, headers, body) = get(&app.router, uri, &[]).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(headers.get("cache-control").map(String::as_str), Some("max-age=10"));

            let jwks: Jwks = serde_json::from_slice(&body).unwrap();
            assert_eq!(kids(&jwks), vec!["K2", "K1", "K3"]);
        }
    }

    #[tokio::test]
    async fn test_certs_no_cache_when_refresh_disabled() {
        let app = test_app(&[("CERT_UPDATE_INTERVAL", "0")]).await;
        let (_, headers, _) = get(&app.router, "/api/v1/certs/default", &[]).await;
        assert_eq!(headers.get(header::CACHE_CONTROL.as_str()).map(String::as_str), Some("no-cache"));
    }

    #[tokio::test]
    async fn test_realm_info_on_both_paths() {
        let app = test_app(&[]).await;

        for uri in [
            "/api/v1/issuer/master",
            "/auth/realms/master",
            "/auth/realms/master/",
        ] {
            let (status, _, body) = get(&app.router, uri, &[]).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);

            let info: RealmInfo = serde_json::from_slice(&body).unwrap();
            assert_eq!(info.realm, "master");
            assert_eq!(info.public_key, fixtures::ACTIVE.public_key);
        }
    }

    #[tokio::test]
    async fn test_realm_info_without_active_key_is_503() {
        let app = test_app(&[]).await;
        let next = app
            .state
            .cache
            .snapshot()
            .await
            .get(RotationSlot::Next)
            .cloned()
            .unwrap();
        app.state
            .cache
            .replace(KeySnapshot::from_slots([(RotationSlot::Next, next)]))
            .await;

        let (status, _, body) = get(&app.router, "/api/v1/issuer/master", &[]).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_discovery_uses_forwarded_host_and_prefix() {
        let app = test_app(&[("PATH_PREFIX", "/spacegate")]).await;

        for uri in [
            "/api/v1/discovery/default",
            "/auth/realms/default/.well-known/openid-configuration",
        ] {
            let (status, _, body) =
                get(&app.router, uri, &[("X-Forwarded-Host", "gw.example.com")]).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);

            let doc: DiscoveryDocument = serde_json::from_slice(&body).unwrap();
            assert_eq!(doc.issuer, "https://gw.example.com/spacegate/auth/realms/default");
            assert_eq!(
                doc.jwks_uri,
                "https://gw.example.com/spacegate/auth/realms/default/protocol/openid-connect/certs"
            );
            assert_eq!(doc.id_token_signing_alg_values_supported, vec!["RS256"]);
        }
    }

    #[tokio::test]
    async fn test_discovery_falls_back_to_issuer_url() {
        let app = test_app(&[("ISSUER_URL", "http://localhost:8080")]).await;

        let (status, _, body) = get(&app.router, "/api/v1/discovery/default", &[]).await;
        assert_eq!(status, StatusCode::OK);

        let doc: DiscoveryDocument = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc.issuer, "http://localhost:8080/auth/realms/default");
        assert_eq!(
            doc.authorization_endpoint,
            "http://localhost:8080/auth/realms/default/protocol/openid-connect/auth"
        );

        // A forwarded host still takes precedence
        let (_, _, body) = get(
            &app.router,
            "/api/v1/discovery/default",
            &[("X-Forwarded-Host", "gw.example.com")],
        )
        .await;
        let doc: DiscoveryDocument = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc.issuer, "https://gw.example.com/auth/realms/default");
    }

    #[tokio::test]
    async fn test_discovery_without_forwarded_host_is_400() {
        let app = test_app(&[]).await;

        for headers in [&[][..], &[("X-Forwarded-Host", "")][..]] {
            let (status, _, body) = get(&app.router, "/api/v1/discovery/default", headers).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);

            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(
                json["error"]["message"],
                "X-Forwarded-Host header must be set in the request"
            );
        }
    }

    #[tokio::test]
    async fn test_auth_endpoints_are_not_implemented() {
        let app = test_app(&[]).await;

        for uri in [
            "/api/v1/auth",
            "/api/v1/auth/login",
            "/auth/realms/default/protocol/openid-connect/auth",
            "/auth/realms/default/protocol/openid-connect/auth/device",
        ] {
            let (status, _, body) = get(&app.router, uri, &[]).await;
            assert_eq!(status, StatusCode::NOT_IMPLEMENTED, "{}", uri);

            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(
                json["error"]["message"],
                "This endpoint is not available for this issuer"
            );
        }
    }

    #[tokio::test]
    async fn test_custom_base_path() {
        let app = test_app(&[("API_BASE_PATH", "/keys/")]).await;

        let (status, _, _) = get(&app.router, "/keys/certs/default", &[]).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = get(&app.router, "/api/v1/certs/default", &[]).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let app = test_app(&[]).await;
        let (status, _, _) = get(&app.router, "/metrics", &[]).await;
        assert_eq!(status, StatusCode::OK);
    }
}
