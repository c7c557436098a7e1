//! Error types for the authentication context.
//!
//! The context never retries and never swallows a failure. Whether a failed
//! step aborts the handshake, or the handshake is reset and restarted, is the
//! driver's decision.

use otr_crypto::CryptoError;
use thiserror::Error;

/// Errors from [`crate::AuthContext`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A primitive could not run (entropy source failure, unusable key)
    #[error("crypto unavailable: {reason}")]
    CryptoUnavailable {
        /// What the primitive layer reported
        reason: String,
    },

    /// Shared-secret material requested before the peer's DH key arrived
    #[error("missing remote DH public key: cannot compute {operation}")]
    MissingRemoteKey {
        /// Accessor that needed the remote key
        operation: &'static str,
    },

    /// Signature message requested before the identity proof was stored
    #[error("missing identity proof: {field} not set")]
    MissingIdentityProof {
        /// Field that was still empty
        field: &'static str,
    },
}

impl AuthError {
    /// Returns true if the handshake attempt cannot continue.
    ///
    /// A crypto failure leaves the context unable to produce keys. The
    /// missing-material errors are sequencing mistakes in the driver; the
    /// same context works once the material is supplied.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::CryptoUnavailable { .. } => true,

            Self::MissingRemoteKey { .. } => false,
            Self::MissingIdentityProof { .. } => false,
        }
    }
}

impl From<CryptoError> for AuthError {
    fn from(err: CryptoError) -> Self {
        Self::CryptoUnavailable { reason: err.to_string() }
    }
}
