//! Key endpoint integration tests.
//!
//! Exercises the JWKS and realm endpoints against a real server spawned with
//! the `TestIssuerServer` harness over a temporary certificate mount.

use issuer_service::models::RotationSlot;
use issuer_test_utils::{fixtures, MountedKeyDir, TestIssuerServer};
use serde_json::Value;

fn kids(jwks: &Value) -> Vec<String> {
    jwks["keys"]
        .as_array()
        .map(|keys| {
            keys.iter()
                .filter_map(|k| k["kid"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Keys are exposed as Next, Active, Previous regardless of kid values.
#[tokio::test]
async fn test_certs_returns_keys_in_rotation_order() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::new()?;
    mount.write_slot(RotationSlot::Next, &fixtures::NEXT, "K2")?;
    mount.write_slot(RotationSlot::Active, &fixtures::ACTIVE, "K1")?;
    mount.write_slot(RotationSlot::Previous, &fixtures::PREVIOUS, "K3")?;

    let server = TestIssuerServer::spawn(&mount).await?;

    let response = reqwest::get(format!("{}/api/v1/certs/default", server.url())).await?;
    assert_eq!(response.status(), 200);

    let jwks: Value = response.json().await?;
    assert_eq!(kids(&jwks), vec!["K2", "K1", "K3"]);

    Ok(())
}

/// Every JWK carries the fields derived from its certificate.
#[tokio::test]
async fn test_certs_key_fields() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::with_default_keys()?;
    let server = TestIssuerServer::spawn(&mount).await?;

    let jwks: Value = reqwest::get(format!(
        "{}/auth/realms/default/protocol/openid-connect/certs",
        server.url()
    ))
    .await?
    .json()
    .await?;

    let expected = [fixtures::NEXT, fixtures::ACTIVE, fixtures::PREVIOUS];
    let keys = jwks["keys"].as_array().cloned().unwrap_or_default();
    assert_eq!(keys.len(), expected.len());

    for (key, fixture) in keys.iter().zip(expected.iter()) {
        assert_eq!(key["kid"], fixture.kid);
        assert_eq!(key["kty"], "RSA");
        assert_eq!(key["alg"], "RS256");
        assert_eq!(key["use"], "sig");
        assert_eq!(key["n"], fixture.n);
        assert_eq!(key["e"], fixtures::RSA_EXPONENT);
        assert_eq!(key["x5c"], serde_json::json!([fixture.x5c]));
        assert_eq!(key["x5t"], fixture.x5t);
        assert_eq!(key["x5t#S256"], fixture.x5t_s256);
        assert!(key.get("public_key").is_none(), "public key leaked into JWKS");
    }

    Ok(())
}

/// When Next and Active share a kid, only the Active entry is published.
#[tokio::test]
async fn test_certs_collision_prefers_active() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::new()?;
    mount.write_slot(RotationSlot::Next, &fixtures::NEXT, "K1")?;
    mount.write_slot(RotationSlot::Active, &fixtures::ACTIVE, "K1")?;
    mount.write_slot(RotationSlot::Previous, &fixtures::PREVIOUS, "K3")?;

    let server = TestIssuerServer::spawn(&mount).await?;

    let jwks: Value = reqwest::get(format!("{}/api/v1/certs/default", server.url()))
        .await?
        .json()
        .await?;

    assert_eq!(kids(&jwks), vec!["K1", "K3"]);
    assert_eq!(jwks["keys"][0]["n"], fixtures::ACTIVE.n);

    Ok(())
}

/// Refresh disabled means clients must not cache the key set.
#[tokio::test]
async fn test_certs_cache_control_without_refresh() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::with_default_keys()?;
    let server = TestIssuerServer::spawn(&mount).await?;

    let response = reqwest::get(format!("{}/api/v1/certs/default", server.url())).await?;
    let cache_control = response
        .headers()
        .get("cache-control")
        .and_then(|v| v.to_str().ok());
    assert_eq!(cache_control, Some("no-cache"));

    Ok(())
}

/// The realm summary carries the active key's stripped PEM body.
#[tokio::test]
async fn test_realm_info_returns_active_public_key() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::with_default_keys()?;
    let server = TestIssuerServer::spawn(&mount).await?;
    let client = reqwest::Client::new();

    for path in [
        "/api/v1/issuer/tenant-a",
        "/auth/realms/tenant-a",
        "/auth/realms/tenant-a/",
    ] {
        let response = client
            .get(format!("{}{}", server.url(), path))
            .send()
            .await?;
        assert_eq!(response.status(), 200, "{}", path);

        let body: Value = response.json().await?;
        assert_eq!(body["realm"], "tenant-a");
        assert_eq!(body["public_key"], fixtures::ACTIVE.public_key);
    }

    Ok(())
}

/// A mount with a broken slot never produces a running server.
#[tokio::test]
async fn test_spawn_fails_when_a_slot_is_missing() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::with_default_keys()?;
    mount.remove_slot(RotationSlot::Previous)?;

    let result = TestIssuerServer::spawn(&mount).await;
    assert!(result.is_err());

    Ok(())
}

/// An EC certificate in any slot is rejected at startup.
#[tokio::test]
async fn test_spawn_fails_for_non_rsa_certificate() -> Result<(), anyhow::Error> {
    let mount = MountedKeyDir::with_default_keys()?;
    mount.write_cert(RotationSlot::Next, fixtures::EC_CERT_PEM)?;

    let result = TestIssuerServer::spawn(&mount).await;
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("not of type RSA"), "unexpected error: {}", message);

    Ok(())
}
