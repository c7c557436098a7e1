//! OTR Cryptographic Primitives
//!
//! The primitive layer under the OTR v2 authenticated key exchange. Pure
//! functions where possible; the two operations that need entropy take the
//! RNG as a parameter so tests can run against a seeded generator.
//!
//! # Primitives
//!
//! ```text
//! Diffie-Hellman    RFC 3526 1536-bit MODP group, g = 2, 320-bit exponents
//! Symmetric cipher  AES-128 in counter mode, initial counter block = 0
//! Hash              SHA-256
//! MAC               HMAC-SHA256, truncated to 160 bits on the wire
//! ```
//!
//! # Security
//!
//! The zero counter is only safe because every AES key in the AKE (`r`, `c`,
//! `c'`) encrypts exactly one message. Do not reuse [`aes_ctr_encrypt`] with a
//! long-lived key.
//!
//! Received public keys are not validated implicitly. Callers that accept a
//! peer's `g^y` run [`check_public_key`] before computing a shared secret.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cipher;
pub mod dh;
pub mod error;
pub mod hash;
pub mod random;

pub use cipher::{AES_KEY_LEN, aes_ctr_decrypt, aes_ctr_encrypt};
pub use dh::{DhKeyPair, SharedSecret, check_public_key, generator, modulus};
pub use error::CryptoError;
pub use hash::{
    HMAC_SHA256_160_LEN, SHA256_LEN, hmac_sha256, hmac_sha256_160, sha256,
    verify_hmac_sha256_160,
};
pub use random::fill_random;
