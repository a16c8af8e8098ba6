//! Key handlers.
//!
//! - `GET {base}/certs/{realm}` and `/auth/realms/{realm}/protocol/openid-connect/certs`
//!   return the JWKS
//! - `GET {base}/issuer/{realm}` and `/auth/realms/{realm}` return the realm
//!   summary with the active public key
//!
//! Both read the cache only; they never touch the mounted files.

use crate::errors::IssuerError;
use crate::models::{Jwks, RealmInfo};
use crate::observability::metrics::record_jwks_request;
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Handler for the JWKS endpoints
///
/// Returns every cached key in the order Next, Active, Previous. The
/// `Cache-Control` max-age follows the refresh interval so clients do not
/// hold on to a key set longer than the service would.
#[instrument(skip_all, name = "issuer.keys.certs", fields(realm = %realm))]
pub async fn get_certs(
    State(state): State<Arc<AppState>>,
    Path(realm): Path<String>,
) -> Response {
    record_jwks_request("certs");

    let jwks: Jwks = state.cache.jwks().await;

    let cache_control = match state.config.jwks.update_interval() {
        Some(period) => format!("max-age={}", period.as_secs()),
        None => "no-cache".to_string(),
    };

    ([(header::CACHE_CONTROL, cache_control)], Json(jwks)).into_response()
}

/// Handler for the realm summary endpoints
///
/// # Response
///
/// - 200 OK: realm name and active public key
/// - 503 Service Unavailable: no active key is cached
#[instrument(skip_all, name = "issuer.keys.realm_info", fields(realm = %realm))]
pub async fn get_realm_info(
    State(state): State<Arc<AppState>>,
    Path(realm): Path<String>,
) -> Result<Json<RealmInfo>, IssuerError> {
    record_jwks_request("issuer");

    state
        .cache
        .realm_info(&realm)
        .await
        .map(Json)
        .ok_or_else(|| IssuerError::ServiceUnavailable("no active signing key cached".to_string()))
}
