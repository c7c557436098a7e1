//! Error types for primitive operations

use thiserror::Error;

/// Errors from the primitive layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The random source could not produce bytes
    #[error("entropy unavailable: {reason}")]
    EntropyUnavailable {
        /// Error reported by the RNG
        reason: String,
    },

    /// A private exponent came out as 0 or 1
    #[error("degenerate DH private key")]
    DegenerateKey,

    /// A DH public value is outside `[2, p - 2]`
    #[error("DH public key out of range")]
    InvalidPublicKey,
}

impl CryptoError {
    /// Returns true if the error came from the platform, not from key material.
    ///
    /// A platform failure means no key can be generated at all. Bad key
    /// material only affects the key that was rejected.
    pub fn is_platform_failure(&self) -> bool {
        match self {
            Self::EntropyUnavailable { .. } => true,

            Self::DegenerateKey => false,
            Self::InvalidPublicKey => false,
        }
    }
}
