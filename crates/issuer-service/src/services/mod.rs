//! Business logic services for the issuer service.

pub mod key_cache;

pub use key_cache::{KeyCache, KeySnapshot};
