use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a key in the rotation scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationSlot {
    /// Published for pre-fetch, not yet used for signing.
    Next,
    /// Current signing key.
    Active,
    /// Retired key kept around for the verification grace period.
    Previous,
}

impl RotationSlot {
    /// Order in which keys are exposed to relying parties.
    pub const EXPOSURE_ORDER: [RotationSlot; 3] =
        [RotationSlot::Next, RotationSlot::Active, RotationSlot::Previous];

    /// Order in which slots claim a kid. Earlier slots win collisions.
    pub const ASSIGNMENT_ORDER: [RotationSlot; 3] =
        [RotationSlot::Active, RotationSlot::Previous, RotationSlot::Next];

    pub fn as_str(&self) -> &'static str {
        match self {
            RotationSlot::Next => "next",
            RotationSlot::Active => "active",
            RotationSlot::Previous => "previous",
        }
    }
}

impl fmt::Display for RotationSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON Web Key Set (RFC 7517)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// JSON Web Key (RFC 7517) for an RSA signing certificate.
///
/// `public_key` is the stripped PEM body served by the realm endpoint. It is
/// never part of the key set document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kid: String, // Key ID (from the mounted .kid file)
    pub kty: String, // Key Type ("RSA")
    pub alg: String, // Algorithm ("RS256")
    #[serde(rename = "use")]
    pub use_: String, // Public key use ("sig")
    pub n: String,   // Modulus (base64url, unpadded)
    pub e: String,   // Exponent (base64url, unpadded)
    pub x5c: Vec<String>,
    pub x5t: String,
    #[serde(rename = "x5t#S256")]
    pub x5t_s256: String,
    #[serde(skip)]
    pub public_key: String,
}

/// Realm summary exposing the active signing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmInfo {
    pub realm: String,
    pub public_key: String,
}

/// OpenID Connect discovery document for a realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    pub issuer: String,
    pub jwks_uri: String,
    pub authorization_endpoint: String,
    pub response_types_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
}

impl DiscoveryDocument {
    /// Build the discovery document for `realm` under `base_url`.
    ///
    /// `base_url` is the externally visible origin including any path prefix,
    /// e.g. `https://gateway.example.com/spacegate`.
    pub fn new(base_url: &str, realm: &str) -> Self {
        let issuer = format!("{}/auth/realms/{}", base_url, realm);
        Self {
            jwks_uri: format!("{}/protocol/openid-connect/certs", issuer),
            authorization_endpoint: format!("{}/protocol/openid-connect/auth", issuer),
            issuer,
            response_types_supported: vec!["none".to_string()],
            subject_types_supported: vec!["public".to_string()],
            id_token_signing_alg_values_supported: vec!["RS256".to_string()],
        }
    }
}
