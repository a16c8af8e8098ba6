//! Mounted certificate files.
//!
//! Each rotation slot is backed by two files in the mount directory: a PEM
//! certificate and a plain-text key id. Some external process (cert-manager,
//! a CSI driver, ...) writes them; this module only reads.

use crate::config::JwksFileConfig;
use crate::crypto::{self, ParsedCertificate};
use crate::errors::KeyError;
use crate::models::{Jwk, RotationSlot};
use std::path::Path;
use tracing::instrument;

/// Load the JWK for one rotation slot.
///
/// Reads both files, decodes the first PEM block of the certificate file
/// and derives every JWK field from it. The key id is the trimmed content
/// of the kid file and is never derived from the certificate.
#[instrument(skip_all, name = "issuer.keys.load_slot", fields(slot = %slot))]
pub async fn load_slot(config: &JwksFileConfig, slot: RotationSlot) -> Result<Jwk, KeyError> {
    let cert_path = config.cert_file(slot);
    let kid_path = config.kid_file(slot);

    let cert_bytes = read_file(&cert_path).await?;
    let kid_bytes = read_file(&kid_path).await?;

    let block = pem::parse(&cert_bytes).map_err(|e| KeyError::PemDecode {
        path: cert_path.clone(),
        reason: e.to_string(),
    })?;

    let cert = ParsedCertificate::from_der(block.contents())?;
    let material = crypto::extract_key_material(&cert)?;

    let kid = String::from_utf8_lossy(&kid_bytes).trim().to_string();

    tracing::debug!(target: "issuer.keys", slot = %slot, kid = %kid, "Loaded key from mounted files");

    Ok(Jwk {
        kid,
        kty: crypto::KEY_TYPE.to_string(),
        alg: material.alg,
        use_: crypto::KEY_USE.to_string(),
        n: material.n,
        e: material.e,
        x5c: material.x5c,
        x5t: material.x5t,
        x5t_s256: material.x5t_s256,
        public_key: material.public_key,
    })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, KeyError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| KeyError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use issuer_test_utils::fixtures;
    use std::fs;
    use tempfile::TempDir;

    fn write_slot(dir: &TempDir, cert_name: &str, cert: &str, kid_name: &str, kid: &str) {
        fs::write(dir.path().join(cert_name), cert).unwrap();
        fs::write(dir.path().join(kid_name), kid).unwrap();
    }

    #[tokio::test]
    async fn test_load_active_slot() {
        let dir = TempDir::new().unwrap();
        write_slot(&dir, "tls.crt", fixtures::ACTIVE.pem, "tls.kid", fixtures::ACTIVE.kid);
        let config = JwksFileConfig::with_mount_path(dir.path());

        let jwk = load_slot(&config, RotationSlot::Active).await.unwrap();

        assert_eq!(jwk.kid, fixtures::ACTIVE.kid);
        assert_eq!(jwk.kty, "RSA");
        assert_eq!(jwk.alg, "RS256");
        assert_eq!(jwk.use_, "sig");
        assert_eq!(jwk.n, fixtures::ACTIVE.n);
        assert_eq!(jwk.e, "AQAB");
        assert_eq!(jwk.x5c, vec![fixtures::ACTIVE.x5c.to_string()]);
        assert_eq!(jwk.x5t, fixtures::ACTIVE.x5t);
        assert_eq!(jwk.x5t_s256, fixtures::ACTIVE.x5t_s256);
        assert_eq!(jwk.public_key, fixtures::ACTIVE.public_key);
    }

    #[tokio::test]
    async fn test_kid_is_trimmed() {
        let dir = TempDir::new().unwrap();
        write_slot(&dir, "next-tls.crt", fixtures::NEXT.pem, "next-tls.kid", "  key-next\n");
        let config = JwksFileConfig::with_mount_path(dir.path());

        let jwk = load_slot(&config, RotationSlot::Next).await.unwrap();
        assert_eq!(jwk.kid, "key-next");
    }

    #[tokio::test]
    async fn test_custom_file_names() {
        let dir = TempDir::new().unwrap();
        write_slot(&dir, "old.pem", fixtures::PREVIOUS.pem, "old.txt", "old-key");
        let mut config = JwksFileConfig::with_mount_path(dir.path());
        config.cert_file_prev = "old.pem".to_string();
        config.kid_file_prev = "old.txt".to_string();

        let jwk = load_slot(&config, RotationSlot::Previous).await.unwrap();
        assert_eq!(jwk.kid, "old-key");
        assert_eq!(jwk.n, fixtures::PREVIOUS.n);
    }

    #[tokio::test]
    async fn test_missing_certificate_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tls.kid"), "key").unwrap();
        let config = JwksFileConfig::with_mount_path(dir.path());

        let result = load_slot(&config, RotationSlot::Active).await;
        assert!(
            matches!(result, Err(KeyError::FileNotFound { ref path, .. }) if path.ends_with("tls.crt"))
        );
    }

    #[tokio::test]
    async fn test_missing_kid_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("tls.crt"), fixtures::ACTIVE.pem).unwrap();
        let config = JwksFileConfig::with_mount_path(dir.path());

        let result = load_slot(&config, RotationSlot::Active).await;
        assert!(
            matches!(result, Err(KeyError::FileNotFound { ref path, .. }) if path.ends_with("tls.kid"))
        );
    }

    #[tokio::test]
    async fn test_not_pem() {
        let dir = TempDir::new().unwrap();
        write_slot(&dir, "tls.crt", "just some text", "tls.kid", "key");
        let config = JwksFileConfig::with_mount_path(dir.path());

        let result = load_slot(&config, RotationSlot::Active).await;
        assert!(matches!(result, Err(KeyError::PemDecode { .. })));
    }

    #[tokio::test]
    async fn test_pem_with_invalid_certificate() {
        let dir = TempDir::new().unwrap();
        let bogus = "-----BEGIN CERTIFICATE-----\naGVsbG8gd29ybGQ=\n-----END CERTIFICATE-----\n";
        write_slot(&dir, "tls.crt", bogus, "tls.kid", "key");
        let config = JwksFileConfig::with_mount_path(dir.path());

        let result = load_slot(&config, RotationSlot::Active).await;
        assert!(matches!(result, Err(KeyError::CertificateParse(_))));
    }

    #[tokio::test]
    async fn test_ec_certificate_fails_whole_slot() {
        let dir = TempDir::new().unwrap();
        write_slot(&dir, "tls.crt", fixtures::EC_CERT_PEM, "tls.kid", "ec-key");
        let config = JwksFileConfig::with_mount_path(dir.path());

        let result = load_slot(&config, RotationSlot::Active).await;
        assert!(matches!(result, Err(KeyError::UnsupportedKeyType(_))));
    }
}
