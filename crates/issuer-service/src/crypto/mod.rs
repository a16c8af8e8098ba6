//! Key material extraction from X.509 certificates.
//!
//! Turns a parsed certificate into the fields of an RS256 JWK: modulus,
//! exponent, certificate chain, SHA-1/SHA-256 thumbprints and the stripped
//! PEM public key. Everything here is pure and safe to call concurrently.

use crate::errors::KeyError;
use base64::{engine::general_purpose, Engine as _};
use ring::digest;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{BigUint, RsaPublicKey};
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

/// JWS algorithm advertised for every key.
pub const ALGORITHM: &str = "RS256";

/// JWK key type.
pub const KEY_TYPE: &str = "RSA";

/// JWK public key use.
pub const KEY_USE: &str = "sig";

/// Upper bound on accepted RSA modulus size when re-encoding the public key.
const MAX_MODULUS_BITS: usize = 16384;

/// A certificate parsed from DER, keeping the original bytes for thumbprints.
pub struct ParsedCertificate<'a> {
    der: &'a [u8],
    cert: X509Certificate<'a>,
}

impl<'a> ParsedCertificate<'a> {
    /// Parse a single DER-encoded X.509 certificate.
    ///
    /// Trailing bytes after the certificate are rejected.
    pub fn from_der(der: &'a [u8]) -> Result<Self, KeyError> {
        let (rest, cert) = X509Certificate::from_der(der)
            .map_err(|e| KeyError::CertificateParse(e.to_string()))?;

        if !rest.is_empty() {
            return Err(KeyError::CertificateParse(format!(
                "{} trailing bytes after certificate",
                rest.len()
            )));
        }

        Ok(Self { der, cert })
    }

    /// Raw DER bytes of the whole certificate.
    pub fn der(&self) -> &[u8] {
        self.der
    }

    pub fn certificate(&self) -> &X509Certificate<'a> {
        &self.cert
    }
}

/// Everything a JWK needs from the certificate. The key id is supplied
/// separately by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    pub alg: String,
    pub n: String,
    pub e: String,
    pub x5c: Vec<String>,
    pub x5t: String,
    pub x5t_s256: String,
    pub public_key: String,
}

/// Extract all JWK fields from `cert`.
///
/// Fails with `UnsupportedKeyType` for anything but an RSA public key; no
/// field is ever silently left empty.
pub fn extract_key_material(cert: &ParsedCertificate<'_>) -> Result<KeyMaterial, KeyError> {
    let rsa_key = rsa_components(cert)?;

    Ok(KeyMaterial {
        alg: ALGORITHM.to_string(),
        n: general_purpose::URL_SAFE_NO_PAD.encode(&rsa_key.modulus),
        e: general_purpose::URL_SAFE_NO_PAD.encode(minimal_be_bytes(&rsa_key.exponent.to_be_bytes())),
        x5c: x5c(cert),
        x5t: x5t(cert),
        x5t_s256: x5t_s256(cert),
        public_key: public_key_string(&rsa_key)?,
    })
}

/// Certificate chain: the single base64 (standard, padded) DER certificate.
pub fn x5c(cert: &ParsedCertificate<'_>) -> Vec<String> {
    vec![general_purpose::STANDARD.encode(cert.der())]
}

/// SHA-1 thumbprint of the DER certificate, base64url without padding.
pub fn x5t(cert: &ParsedCertificate<'_>) -> String {
    // SHA-1 is mandated by the x5t JWK parameter
    let hash = digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, cert.der());
    general_purpose::URL_SAFE_NO_PAD.encode(hash.as_ref())
}

/// SHA-256 thumbprint of the DER certificate, base64url without padding.
pub fn x5t_s256(cert: &ParsedCertificate<'_>) -> String {
    let hash = digest::digest(&digest::SHA256, cert.der());
    general_purpose::URL_SAFE_NO_PAD.encode(hash.as_ref())
}

/// RSA public key numbers in minimal big-endian form.
struct RsaComponents {
    modulus: Vec<u8>,
    exponent: u64,
}

fn rsa_components(cert: &ParsedCertificate<'_>) -> Result<RsaComponents, KeyError> {
    let spki = cert.certificate().public_key();

    match spki.parsed() {
        Ok(PublicKey::RSA(key)) => Ok(RsaComponents {
            modulus: minimal_be_bytes(key.modulus),
            exponent: exponent_to_u64(key.exponent)?,
        }),
        Ok(_) => Err(KeyError::UnsupportedKeyType(
            spki.algorithm.algorithm.to_id_string(),
        )),
        Err(e) => Err(KeyError::CertificateParse(format!(
            "invalid subject public key: {}",
            e
        ))),
    }
}

/// Re-encode the key as SubjectPublicKeyInfo PEM and strip it to one line.
fn public_key_string(key: &RsaComponents) -> Result<String, KeyError> {
    let public_key = RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(&key.modulus),
        BigUint::from(key.exponent),
        MAX_MODULUS_BITS,
    )
    .map_err(|e| KeyError::PublicKeyEncode(e.to_string()))?;

    let pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyError::PublicKeyEncode(e.to_string()))?;

    Ok(strip_pem(&pem))
}

/// Remove PEM armor lines and all whitespace, leaving the base64 body.
pub fn strip_pem(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_whitespace())
        .collect()
}

fn minimal_be_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().copied().skip_while(|b| *b == 0).collect()
}

fn exponent_to_u64(raw: &[u8]) -> Result<u64, KeyError> {
    let digits = minimal_be_bytes(raw);
    if digits.len() > 8 {
        return Err(KeyError::CertificateParse(
            "RSA public exponent does not fit in 64 bits".to_string(),
        ));
    }
    Ok(digits
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
}
