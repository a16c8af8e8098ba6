//! HTTP request handlers for the issuer service.

pub mod discovery;
pub mod health;
pub mod keys;
pub mod metrics;

pub use discovery::{get_discovery, not_implemented};
pub use health::health_check;
pub use keys::{get_certs, get_realm_info};
pub use metrics::metrics_handler;
