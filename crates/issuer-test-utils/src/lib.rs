//! # Issuer Test Utilities
//!
//! Shared test utilities for the issuer service.
//!
//! This crate provides:
//! - Certificate fixtures with their expected JWK values
//! - `MountedKeyDir`, a temporary certificate mount
//! - Server test harness (`TestIssuerServer` for E2E tests)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use issuer_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<()> {
//!     let mount = MountedKeyDir::with_default_keys()?;
//!     let server = TestIssuerServer::spawn(&mount).await?;
//!
//!     let response = reqwest::get(format!("{}/api/v1/certs/default", server.url())).await?;
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod fixtures;
pub mod mounted_dir;
pub mod server_harness;

// Re-export commonly used items
pub use fixtures::CertFixture;
pub use mounted_dir::*;
pub use server_harness::*;
