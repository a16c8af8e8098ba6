//! Data access for the issuer service.
//!
//! The only backing store is the directory of mounted certificate files.

pub mod mounted_keys;

pub use mounted_keys::load_slot;
