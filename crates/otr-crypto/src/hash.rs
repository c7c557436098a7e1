//! SHA-256 and HMAC-SHA256

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 output size in bytes.
pub const SHA256_LEN: usize = 32;

/// Truncated HMAC size used for wire MACs (160 bits).
pub const HMAC_SHA256_160_LEN: usize = 20;

/// SHA-256 of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    let digest = Sha256::digest(data);

    let mut out = [0u8; SHA256_LEN];
    out.copy_from_slice(&digest);
    out
}

/// Full HMAC-SHA256 of `data` under `key`.
#[must_use]
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; SHA256_LEN] {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut out = [0u8; SHA256_LEN];
    out.copy_from_slice(&result);
    out
}

/// HMAC-SHA256 truncated to its first 160 bits, as carried in `mac` fields.
#[must_use]
pub fn hmac_sha256_160(key: &[u8], data: &[u8]) -> [u8; HMAC_SHA256_160_LEN] {
    let full = hmac_sha256(key, data);

    let mut out = [0u8; HMAC_SHA256_160_LEN];
    out.copy_from_slice(&full[..HMAC_SHA256_160_LEN]);
    out
}

/// Check a truncated tag in constant time.
#[must_use]
pub fn verify_hmac_sha256_160(key: &[u8], data: &[u8], tag: &[u8; HMAC_SHA256_160_LEN]) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        unreachable!("HMAC-SHA256 accepts any key size");
    };
    mac.update(data);
    mac.verify_truncated_left(tag).is_ok()
}
