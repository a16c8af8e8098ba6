//! Issuer service error types.
//!
//! `KeyError` covers everything that can go wrong while turning mounted
//! certificate files into JWKs. `IssuerError` is the HTTP-facing error and
//! maps to status codes via `IntoResponse`. Client-facing messages stay
//! generic; the actual cause is logged server-side.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading or converting a rotation slot.
///
/// Every variant is fatal during startup and non-fatal for a scheduled
/// refresh, where the previously installed snapshot is kept.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode certificate PEM in {path}: {reason}")]
    PemDecode { path: PathBuf, reason: String },

    #[error("Failed to parse certificate: {0}")]
    CertificateParse(String),

    #[error("Public key is not of type RSA (algorithm {0})")]
    UnsupportedKeyType(String),

    #[error("Failed to encode public key: {0}")]
    PublicKeyEncode(String),
}

impl KeyError {
    /// Short, bounded label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            KeyError::FileNotFound { .. } => "file_not_found",
            KeyError::PemDecode { .. } => "pem_decode",
            KeyError::CertificateParse(_) => "certificate_parse",
            KeyError::UnsupportedKeyType(_) => "unsupported_key_type",
            KeyError::PublicKeyEncode(_) => "public_key_encode",
        }
    }
}

/// HTTP-facing error type.
///
/// Maps to status codes:
/// - BadRequest: 400 Bad Request
/// - NotImplemented: 501 Not Implemented
/// - ServiceUnavailable: 503 Service Unavailable
#[derive(Debug, Error)]
pub enum IssuerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not implemented")]
    NotImplemented,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IssuerError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            IssuerError::BadRequest(_) => 400,
            IssuerError::NotImplemented => 501,
            IssuerError::ServiceUnavailable(_) => 503,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for IssuerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            IssuerError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            IssuerError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                "This endpoint is not available for this issuer".to_string(),
            ),
            IssuerError::ServiceUnavailable(reason) => {
                tracing::warn!(target: "issuer.availability", reason = %reason, "Service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service temporarily unavailable".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
