//! Long-term identity key pair.
//!
//! The identity proof is signed with this key by the signature layer, which
//! lives outside this crate. The context only carries the key between
//! handshake steps, so the bytes are kept in their serialized form.

use std::fmt;

use zeroize::Zeroizing;

/// Serialized long-term signing key pair.
#[derive(Clone)]
pub struct LongTermKeyPair {
    public_key: Vec<u8>,
    private_key: Zeroizing<Vec<u8>>,
}

impl LongTermKeyPair {
    /// Wrap serialized key material.
    pub fn new(public_key: impl Into<Vec<u8>>, private_key: impl Into<Vec<u8>>) -> Self {
        Self { public_key: public_key.into(), private_key: Zeroizing::new(private_key.into()) }
    }

    /// Serialized public key.
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Serialized private key. Zeroized when the pair is dropped.
    #[must_use]
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for LongTermKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LongTermKeyPair")
            .field("public_key_len", &self.public_key.len())
            .finish_non_exhaustive()
    }
}
