//! OpenID discovery handler and stubs for endpoints this issuer does not serve.

use crate::errors::IssuerError;
use crate::models::DiscoveryDocument;
use crate::routes::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;
use tracing::instrument;

/// Header carrying the host the client used to reach the gateway.
pub const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

/// Handler for the discovery endpoints
///
/// URLs in the document are built from `https://{X-Forwarded-Host}{PATH_PREFIX}`
/// when the gateway forwards the host, and from `ISSUER_URL` otherwise.
///
/// # Response
///
/// - 200 OK: discovery document
/// - 400 Bad Request: `X-Forwarded-Host` missing or empty and no `ISSUER_URL`
#[instrument(skip_all, name = "issuer.discovery", fields(realm = %realm))]
pub async fn get_discovery(
    State(state): State<Arc<AppState>>,
    Path(realm): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DiscoveryDocument>, IssuerError> {
    let forwarded_host = headers
        .get(FORWARDED_HOST_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty());

    let base_url = match (forwarded_host, state.config.issuer_url.as_deref()) {
        (Some(host), _) => format!("https://{}{}", host, state.config.path_prefix),
        (None, Some(issuer_url)) => issuer_url.to_string(),
        (None, None) => {
            return Err(IssuerError::BadRequest(
                "X-Forwarded-Host header must be set in the request".to_string(),
            ))
        }
    };

    Ok(Json(DiscoveryDocument::new(&base_url, &realm)))
}

/// Handler for authorization endpoints. This issuer only publishes keys.
pub async fn not_implemented() -> IssuerError {
    IssuerError::NotImplemented
}
