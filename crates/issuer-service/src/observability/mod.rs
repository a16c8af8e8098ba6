//! Observability for the issuer service.
//!
//! Provides metrics definitions and the Prometheus recorder setup.

pub mod metrics;

pub use metrics::init_metrics_recorder;
