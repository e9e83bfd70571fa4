//! Cryptographic Utilities
//!
//! Random keys, HMAC-SHA256 tags and URL-safe base64 used by session tokens.

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("secret is not valid base64")]
    Encoding,
    #[error("secret must decode to 32 bytes (got {0})")]
    Length(usize),
}

/// Fresh random 32-byte signing key
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Decode a standard-base64 signing key (e.g. from `SESSION_SECRET`)
pub fn decode_key(encoded: &str) -> Result<[u8; 32], SecretError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| SecretError::Encoding)?;
    <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| SecretError::Length(bytes.len()))
}

/// HMAC-SHA256 tag of `data`, base64url without padding
pub fn sign(key: &[u8; 32], data: &[u8]) -> String {
    let mut mac = match <HmacSha256 as Mac>::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(data);
    general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

/// Verify a tag produced by [`sign`] in constant time
pub fn verify(key: &[u8; 32], data: &[u8], tag: &str) -> bool {
    let Ok(tag) = general_purpose::URL_SAFE_NO_PAD.decode(tag) else {
        return false;
    };
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(key) else {
        return false;
    };
    mac.update(data);
    mac.verify_slice(&tag).is_ok()
}
