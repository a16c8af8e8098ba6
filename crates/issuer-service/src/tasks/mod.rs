//! Background tasks for the issuer service.
//!
//! # Tasks
//!
//! - `key_refresh` - Periodically reloads the mounted keys into the cache

pub mod key_refresh;

pub use key_refresh::start_key_refresh;
