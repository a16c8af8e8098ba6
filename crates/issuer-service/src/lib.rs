//! Issuer Service Library
//!
//! Publishes RS256 signing keys that an external process mounts as X.509
//! certificate files. The service never signs anything itself; it exposes:
//!
//! - A JWKS with the Next, Active and Previous keys of the rotation
//! - A realm summary carrying the active public key
//! - An OpenID discovery document pointing at both
//!
//! Keys are loaded once at startup and then periodically rebuilt from disk.
//! A failed rebuild never replaces a good snapshot.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> handlers/*.rs -> services/key_cache.rs -> repositories/mounted_keys.rs -> crypto
//!                                          ^
//!                                  tasks/key_refresh.rs
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `crypto` - JWK field extraction from certificates
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `models` - Key set and discovery data models
//! - `observability` - Prometheus metrics
//! - `repositories` - Mounted certificate file access
//! - `routes` - Axum router setup
//! - `services` - Rotation cache
//! - `tasks` - Background key refresh

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod tasks;
