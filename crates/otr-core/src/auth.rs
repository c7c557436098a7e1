//! Per-handshake authentication context.
//!
//! One [`AuthContext`] belongs to one AKE attempt. The driver feeds it the
//! peer's material as messages arrive and reads back keys and ciphertexts to
//! build replies. Accessors take `&mut self` because the first call computes
//! and caches the value; later calls return the cached value unchanged.
//!
//! # Invariants
//!
//! - Compute Once: each cached value is produced at most once between resets.
//!   Reading it again returns the identical bytes.
//! - Remote Key First: the shared secret, and everything derived from it,
//!   fails with [`AuthError::MissingRemoteKey`] until
//!   [`AuthContext::set_remote_dh_public_key`] has been called.
//! - Fresh After Reset: [`AuthContext::reset`] drops all handshake material in
//!   one assignment. `r` and the DH key pair are drawn again from the RNG on
//!   next access.
//!
//! # Security
//!
//! `r`, the DH private exponent, the shared secret `s`, `c`, `c'`, `m1`,
//! `m2`, `m1'` and `m2'` are held in [`Zeroizing`] buffers and wiped when
//! replaced, reset or dropped. Setters store remote values as
//! given; range checks such as [`otr_crypto::check_public_key`] are the
//! driver's job.

use std::fmt;

use num_bigint::BigUint;
use otr_crypto::{
    AES_KEY_LEN, DhKeyPair, SHA256_LEN, SharedSecret, aes_ctr_encrypt, fill_random, sha256,
};
use otr_proto::{MAC_LEN, SignatureMessage, mpi_magnitude};
use rand::{CryptoRng, RngCore, rngs::OsRng};
use zeroize::Zeroizing;

use crate::{
    AuthConfig, AuthError, AuthState, LongTermKeyPair,
    kdf::{self, C_PREFIX, M1_PREFIX, M1P_PREFIX, M2_PREFIX, M2P_PREFIX},
};

type AesKey = Zeroizing<[u8; AES_KEY_LEN]>;
type MacKey = Zeroizing<[u8; SHA256_LEN]>;

/// Everything one handshake accumulates. Replaced wholesale on reset.
struct AuthMaterial {
    state: AuthState,
    r: Option<AesKey>,

    local_dh_keypair: Option<DhKeyPair>,
    local_dh_key_id: u32,
    local_dh_public_bytes: Option<Vec<u8>>,
    local_dh_public_hash: Option<[u8; SHA256_LEN]>,
    local_dh_public_encrypted: Option<Vec<u8>>,

    remote_dh_public_key: Option<BigUint>,
    remote_dh_key_id: Option<u32>,
    remote_dh_public_encrypted: Option<Vec<u8>>,
    remote_dh_public_hash: Option<Vec<u8>>,

    shared_secret: Option<SharedSecret>,
    c: Option<AesKey>,
    cp: Option<AesKey>,
    m1: Option<MacKey>,
    m2: Option<MacKey>,
    m1p: Option<MacKey>,
    m2p: Option<MacKey>,

    local_identity_encrypted: Option<Vec<u8>>,
    local_identity_mac: Option<[u8; MAC_LEN]>,
    local_long_term_keypair: Option<LongTermKeyPair>,
}

impl AuthMaterial {
    fn new(local_dh_key_id: u32) -> Self {
        Self {
            state: AuthState::None,
            r: None,
            local_dh_keypair: None,
            local_dh_key_id,
            local_dh_public_bytes: None,
            local_dh_public_hash: None,
            local_dh_public_encrypted: None,
            remote_dh_public_key: None,
            remote_dh_key_id: None,
            remote_dh_public_encrypted: None,
            remote_dh_public_hash: None,
            shared_secret: None,
            c: None,
            cp: None,
            m1: None,
            m2: None,
            m1p: None,
            m2p: None,
            local_identity_encrypted: None,
            local_identity_mac: None,
            local_long_term_keypair: None,
        }
    }
}

/// Cryptographic state for one AKE attempt.
///
/// Generic over the RNG so tests can drive it with a seeded generator;
/// production code uses the default `OsRng`.
pub struct AuthContext<R = OsRng> {
    config: AuthConfig,
    rng: R,
    material: AuthMaterial,
}

impl AuthContext<OsRng> {
    /// Create a context drawing randomness from the operating system.
    pub fn new(config: AuthConfig) -> Self {
        Self::with_rng(config, OsRng)
    }
}

impl Default for AuthContext<OsRng> {
    fn default() -> Self {
        Self::new(AuthConfig::default())
    }
}

impl<R> AuthContext<R>
where
    R: RngCore + CryptoRng,
{
    /// Create a context drawing randomness from `rng`.
    ///
    /// `rng` must be cryptographically secure outside of tests.
    pub fn with_rng(config: AuthConfig, rng: R) -> Self {
        let material = AuthMaterial::new(config.local_dh_key_id);
        Self { config, rng, material }
    }

    /// Configuration this context was created with.
    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Discard all handshake material.
    ///
    /// Configuration and RNG are kept. Every lazily computed value is
    /// recomputed from fresh randomness on next access.
    pub fn reset(&mut self) {
        tracing::info!(state = ?self.material.state, "resetting authentication state");
        self.material = AuthMaterial::new(self.config.local_dh_key_id);
    }

    /// Current AKE state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.material.state
    }

    /// Record the AKE state chosen by the driver.
    pub fn set_state(&mut self, state: AuthState) {
        tracing::debug!(from = ?self.material.state, to = ?state, "authentication state change");
        self.material.state = state;
    }

    /// Random AES key `r` that hides our DH public key in the DH-Commit.
    ///
    /// # Errors
    ///
    /// - `AuthError::CryptoUnavailable` if the RNG fails
    pub fn random_key(&mut self) -> Result<&[u8; AES_KEY_LEN], AuthError> {
        let key = self.memoized(
            |m| &mut m.r,
            "r",
            |ctx| {
                let mut key = Zeroizing::new([0u8; AES_KEY_LEN]);
                fill_random(&mut ctx.rng, key.as_mut_slice())?;
                Ok(key)
            },
        )?;
        Ok(&**key)
    }

    /// Ephemeral DH key pair, generated on first access.
    ///
    /// # Errors
    ///
    /// - `AuthError::CryptoUnavailable` if the RNG fails
    pub fn local_dh_keypair(&mut self) -> Result<&DhKeyPair, AuthError> {
        let pair = self.memoized(
            |m| &mut m.local_dh_keypair,
            "local_dh_keypair",
            |ctx| Ok(DhKeyPair::generate(&mut ctx.rng)?),
        )?;
        Ok(pair)
    }

    /// Key id of the local ephemeral key.
    #[must_use]
    pub fn local_dh_key_id(&self) -> u32 {
        self.material.local_dh_key_id
    }

    /// Our public value `g^x` as minimal big-endian bytes.
    pub fn local_dh_public_bytes(&mut self) -> Result<&[u8], AuthError> {
        let bytes = self.memoized(
            |m| &mut m.local_dh_public_bytes,
            "local_dh_public_bytes",
            |ctx| Ok(mpi_magnitude(ctx.local_dh_keypair()?.public_key())),
        )?;
        Ok(bytes.as_slice())
    }

    /// SHA-256 of [`Self::local_dh_public_bytes`], sent in the DH-Commit.
    pub fn local_dh_public_hash(&mut self) -> Result<&[u8; SHA256_LEN], AuthError> {
        let hash = self.memoized(
            |m| &mut m.local_dh_public_hash,
            "local_dh_public_hash",
            |ctx| Ok(sha256(ctx.local_dh_public_bytes()?)),
        )?;
        Ok(hash)
    }

    /// [`Self::local_dh_public_bytes`] encrypted under `r` (AES-128-CTR,
    /// zero counter), sent in the DH-Commit.
    pub fn local_dh_public_encrypted(&mut self) -> Result<&[u8], AuthError> {
        let ciphertext = self.memoized(
            |m| &mut m.local_dh_public_encrypted,
            "local_dh_public_encrypted",
            |ctx| {
                let r: AesKey = Zeroizing::new(*ctx.random_key()?);
                Ok(aes_ctr_encrypt(&r, ctx.local_dh_public_bytes()?))
            },
        )?;
        Ok(ciphertext.as_slice())
    }

    /// Store the peer's DH public value `g^y`.
    pub fn set_remote_dh_public_key(&mut self, public_key: BigUint) {
        tracing::debug!(bits = public_key.bits(), "storing remote DH public key");
        self.material.remote_dh_public_key = Some(public_key);
    }

    /// Peer's DH public value, if received.
    #[must_use]
    pub fn remote_dh_public_key(&self) -> Option<&BigUint> {
        self.material.remote_dh_public_key.as_ref()
    }

    /// Store the peer's key id.
    pub fn set_remote_dh_key_id(&mut self, key_id: u32) {
        self.material.remote_dh_key_id = Some(key_id);
    }

    /// Peer's key id, if received.
    #[must_use]
    pub fn remote_dh_key_id(&self) -> Option<u32> {
        self.material.remote_dh_key_id
    }

    /// Store the peer's encrypted public value from its DH-Commit.
    pub fn set_remote_dh_public_encrypted(&mut self, encrypted: impl Into<Vec<u8>>) {
        tracing::debug!("storing encrypted remote DH public key");
        self.material.remote_dh_public_encrypted = Some(encrypted.into());
    }

    /// Peer's encrypted public value, if received.
    #[must_use]
    pub fn remote_dh_public_encrypted(&self) -> Option<&[u8]> {
        self.material.remote_dh_public_encrypted.as_deref()
    }

    /// Store the hash of the peer's public value from its DH-Commit.
    pub fn set_remote_dh_public_hash(&mut self, hash: impl Into<Vec<u8>>) {
        tracing::debug!("storing remote DH public key hash");
        self.material.remote_dh_public_hash = Some(hash.into());
    }

    /// Hash of the peer's public value, if received.
    #[must_use]
    pub fn remote_dh_public_hash(&self) -> Option<&[u8]> {
        self.material.remote_dh_public_hash.as_deref()
    }

    /// Shared secret `s = (g^y)^x mod p` as minimal big-endian bytes.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingRemoteKey` if the peer's public value is not set
    /// - `AuthError::CryptoUnavailable` if the local key pair cannot be
    ///   generated
    pub fn shared_secret(&mut self) -> Result<&[u8], AuthError> {
        self.shared_secret_for("shared_secret")
    }

    /// First AES key, `h2(0x01)[0..16]`.
    pub fn c(&mut self) -> Result<&[u8; AES_KEY_LEN], AuthError> {
        let key = self.memoized(|m| &mut m.c, "c", |ctx| {
            let hash = ctx.c_hash("c")?;
            Ok(split_aes_key(&hash[..AES_KEY_LEN]))
        })?;
        Ok(&**key)
    }

    /// Second AES key, `h2(0x01)[16..32]`.
    pub fn cp(&mut self) -> Result<&[u8; AES_KEY_LEN], AuthError> {
        let key = self.memoized(|m| &mut m.cp, "cp", |ctx| {
            let hash = ctx.c_hash("cp")?;
            Ok(split_aes_key(&hash[AES_KEY_LEN..]))
        })?;
        Ok(&**key)
    }

    /// MAC key `m1 = h2(0x02)`.
    pub fn m1(&mut self) -> Result<&[u8; SHA256_LEN], AuthError> {
        let key = self.memoized(|m| &mut m.m1, "m1", |ctx| ctx.mac_key(M1_PREFIX, "m1"))?;
        Ok(&**key)
    }

    /// MAC key `m2 = h2(0x03)`.
    pub fn m2(&mut self) -> Result<&[u8; SHA256_LEN], AuthError> {
        let key = self.memoized(|m| &mut m.m2, "m2", |ctx| ctx.mac_key(M2_PREFIX, "m2"))?;
        Ok(&**key)
    }

    /// MAC key `m1' = h2(0x04)`.
    pub fn m1p(&mut self) -> Result<&[u8; SHA256_LEN], AuthError> {
        let key = self.memoized(|m| &mut m.m1p, "m1p", |ctx| ctx.mac_key(M1P_PREFIX, "m1p"))?;
        Ok(&**key)
    }

    /// MAC key `m2' = h2(0x05)`.
    pub fn m2p(&mut self) -> Result<&[u8; SHA256_LEN], AuthError> {
        let key = self.memoized(|m| &mut m.m2p, "m2p", |ctx| ctx.mac_key(M2P_PREFIX, "m2p"))?;
        Ok(&**key)
    }

    /// Store our encrypted identity proof.
    pub fn set_local_identity_encrypted(&mut self, encrypted: impl Into<Vec<u8>>) {
        tracing::debug!("storing encrypted local identity");
        self.material.local_identity_encrypted = Some(encrypted.into());
    }

    /// Our encrypted identity proof, if stored.
    #[must_use]
    pub fn local_identity_encrypted(&self) -> Option<&[u8]> {
        self.material.local_identity_encrypted.as_deref()
    }

    /// Store the MAC over our encrypted identity proof.
    pub fn set_local_identity_mac(&mut self, mac: [u8; MAC_LEN]) {
        tracing::debug!("storing local identity MAC");
        self.material.local_identity_mac = Some(mac);
    }

    /// MAC over our encrypted identity proof, if stored.
    #[must_use]
    pub fn local_identity_mac(&self) -> Option<&[u8; MAC_LEN]> {
        self.material.local_identity_mac.as_ref()
    }

    /// Store the long-term key pair the identity proof is signed with.
    pub fn set_local_long_term_keypair(&mut self, keypair: LongTermKeyPair) {
        self.material.local_long_term_keypair = Some(keypair);
    }

    /// Long-term key pair, if stored.
    #[must_use]
    pub fn local_long_term_keypair(&self) -> Option<&LongTermKeyPair> {
        self.material.local_long_term_keypair.as_ref()
    }

    /// Build the Signature message from the stored identity proof.
    ///
    /// # Errors
    ///
    /// - `AuthError::MissingIdentityProof` if the encrypted identity or its
    ///   MAC has not been stored
    pub fn signature_message(&self) -> Result<SignatureMessage, AuthError> {
        let Some(encrypted) = &self.material.local_identity_encrypted else {
            return Err(AuthError::MissingIdentityProof { field: "local_identity_encrypted" });
        };
        let Some(mac) = self.material.local_identity_mac else {
            return Err(AuthError::MissingIdentityProof { field: "local_identity_mac" });
        };

        Ok(SignatureMessage::new(self.config.protocol_version, encrypted.clone(), mac))
    }

    /// Return the cached value in `slot`, computing and storing it first if
    /// absent. A failed computation leaves the slot empty.
    fn memoized<T>(
        &mut self,
        slot: fn(&mut AuthMaterial) -> &mut Option<T>,
        name: &'static str,
        compute: impl FnOnce(&mut Self) -> Result<T, AuthError>,
    ) -> Result<&mut T, AuthError> {
        let value = match slot(&mut self.material).take() {
            Some(value) => value,
            None => {
                let value = compute(self)?;
                tracing::debug!(value = name, "computed");
                value
            },
        };
        Ok(slot(&mut self.material).insert(value))
    }

    fn shared_secret_for(&mut self, operation: &'static str) -> Result<&[u8], AuthError> {
        self.memoized(
            |m| &mut m.shared_secret,
            "shared_secret",
            |ctx| {
                let Some(remote) = ctx.material.remote_dh_public_key.clone() else {
                    return Err(AuthError::MissingRemoteKey { operation });
                };
                Ok(ctx.local_dh_keypair()?.shared_secret(&remote))
            },
        )
        .map(|secret| secret.as_slice())
    }

    /// `h2(0x01)`, the single hash both `c` and `c'` are sliced from.
    fn c_hash(&mut self, operation: &'static str) -> Result<MacKey, AuthError> {
        let secret = self.shared_secret_for(operation)?;
        Ok(Zeroizing::new(kdf::kdf_from_bytes(C_PREFIX, secret)))
    }

    fn mac_key(&mut self, prefix: u8, operation: &'static str) -> Result<MacKey, AuthError> {
        let secret = self.shared_secret_for(operation)?;
        Ok(Zeroizing::new(kdf::kdf_from_bytes(prefix, secret)))
    }
}

fn split_aes_key(half: &[u8]) -> AesKey {
    let mut key = Zeroizing::new([0u8; AES_KEY_LEN]);
    key.copy_from_slice(half);
    key
}

// Manual Debug implementation (key material stays out of logs)
impl<R> fmt::Debug for AuthContext<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.material;
        f.debug_struct("AuthContext")
            .field("config", &self.config)
            .field("state", &m.state)
            .field("local_dh_key_id", &m.local_dh_key_id)
            .field("has_local_dh_keypair", &m.local_dh_keypair.is_some())
            .field("has_remote_dh_public_key", &m.remote_dh_public_key.is_some())
            .field("remote_dh_key_id", &m.remote_dh_key_id)
            .field("has_shared_secret", &m.shared_secret.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use zeroize::ZeroizeOnDrop;

    use super::*;

    /// Entropy source that is always offline.
    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy source offline"))
        }
    }

    impl CryptoRng for FailingRng {}

    fn assert_wiped_on_drop<T: ZeroizeOnDrop>(_: &T) {}

    fn context(seed: u64) -> AuthContext<ChaCha20Rng> {
        AuthContext::with_rng(AuthConfig::default(), ChaCha20Rng::seed_from_u64(seed))
    }

    /// Context whose peer key is already set.
    fn keyed_context(seed: u64) -> AuthContext<ChaCha20Rng> {
        let mut peer = context(seed.wrapping_add(1000));
        let peer_public = peer.local_dh_keypair().unwrap().public_key().clone();

        let mut ctx = context(seed);
        ctx.set_remote_dh_public_key(peer_public);
        ctx
    }

    #[test]
    fn random_key_is_cached() {
        let mut ctx = context(1);
        let first = *ctx.random_key().unwrap();
        let second = *ctx.random_key().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn keypair_is_cached() {
        let mut ctx = context(1);
        let first = ctx.local_dh_keypair().unwrap().public_key().clone();
        let second = ctx.local_dh_keypair().unwrap().public_key().clone();
        assert_eq!(first, second);

        let bytes = ctx.local_dh_public_bytes().unwrap().to_vec();
        assert_eq!(ctx.local_dh_public_bytes().unwrap(), bytes.as_slice());

        let hash = *ctx.local_dh_public_hash().unwrap();
        assert_eq!(*ctx.local_dh_public_hash().unwrap(), hash);
    }

    #[test]
    fn public_bytes_follow_keypair() {
        let mut ctx = context(2);
        let public = ctx.local_dh_keypair().unwrap().public_key().clone();
        let bytes = ctx.local_dh_public_bytes().unwrap().to_vec();
        assert_eq!(BigUint::from_bytes_be(&bytes), public);
        assert_eq!(ctx.local_dh_public_hash().unwrap(), &sha256(&bytes));
    }

    #[test]
    fn encrypted_public_decrypts_under_r() {
        let mut ctx = context(3);
        let r = *ctx.random_key().unwrap();
        let bytes = ctx.local_dh_public_bytes().unwrap().to_vec();
        let encrypted = ctx.local_dh_public_encrypted().unwrap().to_vec();

        assert_ne!(encrypted, bytes);
        assert_eq!(otr_crypto::aes_ctr_decrypt(&r, &encrypted), bytes);
    }

    #[test]
    fn encrypted_public_is_cached() {
        let mut ctx = context(3);
        let first = ctx.local_dh_public_encrypted().unwrap().to_vec();
        let second = ctx.local_dh_public_encrypted().unwrap().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn shared_secret_requires_remote_key() {
        let mut ctx = context(4);
        assert_eq!(
            ctx.shared_secret().unwrap_err(),
            AuthError::MissingRemoteKey { operation: "shared_secret" }
        );
    }

    #[test]
    fn derived_keys_require_remote_key() {
        let mut ctx = context(4);
        assert_eq!(ctx.c().unwrap_err(), AuthError::MissingRemoteKey { operation: "c" });
        assert_eq!(ctx.cp().unwrap_err(), AuthError::MissingRemoteKey { operation: "cp" });
        assert_eq!(ctx.m1().unwrap_err(), AuthError::MissingRemoteKey { operation: "m1" });
        assert_eq!(ctx.m2().unwrap_err(), AuthError::MissingRemoteKey { operation: "m2" });
        assert_eq!(ctx.m1p().unwrap_err(), AuthError::MissingRemoteKey { operation: "m1p" });
        assert_eq!(ctx.m2p().unwrap_err(), AuthError::MissingRemoteKey { operation: "m2p" });
    }

    #[test]
    fn missing_remote_key_does_not_poison_cache() {
        let mut ctx = context(5);
        assert!(ctx.m1().is_err());

        let mut peer = context(6);
        ctx.set_remote_dh_public_key(peer.local_dh_keypair().unwrap().public_key().clone());
        assert!(ctx.m1().is_ok());
    }

    #[test]
    fn c_and_cp_split_one_hash() {
        let mut ctx = keyed_context(7);
        let s = BigUint::from_bytes_be(ctx.shared_secret().unwrap());
        let hash = kdf::kdf(C_PREFIX, &s);

        assert_eq!(ctx.cp().unwrap()[..], hash[AES_KEY_LEN..]);
        assert_eq!(ctx.c().unwrap()[..], hash[..AES_KEY_LEN]);
    }

    #[test]
    fn mac_keys_use_distinct_prefixes() {
        let mut ctx = keyed_context(8);
        let s = BigUint::from_bytes_be(ctx.shared_secret().unwrap());

        assert_eq!(ctx.m1().unwrap(), &kdf::kdf(M1_PREFIX, &s));
        assert_eq!(ctx.m2().unwrap(), &kdf::kdf(M2_PREFIX, &s));
        assert_eq!(ctx.m1p().unwrap(), &kdf::kdf(M1P_PREFIX, &s));
        assert_eq!(ctx.m2p().unwrap(), &kdf::kdf(M2P_PREFIX, &s));
    }

    #[test]
    fn derived_keys_are_cached() {
        let mut ctx = keyed_context(9);

        let secret = ctx.shared_secret().unwrap().to_vec();
        assert_eq!(ctx.shared_secret().unwrap(), secret.as_slice());

        let c = *ctx.c().unwrap();
        let cp = *ctx.cp().unwrap();
        let m1 = *ctx.m1().unwrap();
        let m2 = *ctx.m2().unwrap();
        let m1p = *ctx.m1p().unwrap();
        let m2p = *ctx.m2p().unwrap();

        assert_eq!(*ctx.c().unwrap(), c);
        assert_eq!(*ctx.cp().unwrap(), cp);
        assert_eq!(*ctx.m1().unwrap(), m1);
        assert_eq!(*ctx.m2().unwrap(), m2);
        assert_eq!(*ctx.m1p().unwrap(), m1p);
        assert_eq!(*ctx.m2p().unwrap(), m2p);
    }

    #[test]
    fn failing_rng_is_fatal_and_leaves_cache_empty() {
        let mut ctx = AuthContext::with_rng(AuthConfig::default(), FailingRng);

        let err = ctx.random_key().unwrap_err();
        assert!(matches!(err, AuthError::CryptoUnavailable { .. }));
        assert!(err.is_fatal());

        let err = ctx.local_dh_keypair().unwrap_err();
        assert!(matches!(err, AuthError::CryptoUnavailable { .. }));
        assert!(err.is_fatal());

        let mut peer = context(16);
        ctx.set_remote_dh_public_key(peer.local_dh_keypair().unwrap().public_key().clone());
        let err = ctx.c().unwrap_err();
        assert!(matches!(err, AuthError::CryptoUnavailable { .. }));
        assert!(err.is_fatal());
        assert!(matches!(ctx.m2p().unwrap_err(), AuthError::CryptoUnavailable { .. }));

        let m = &ctx.material;
        assert!(m.r.is_none());
        assert!(m.local_dh_keypair.is_none());
        assert!(m.shared_secret.is_none());
        assert!(m.c.is_none());
        assert!(m.m2p.is_none());
    }

    #[test]
    fn secrets_are_wiped_on_drop_and_cleared_on_reset() {
        let mut ctx = keyed_context(17);
        ctx.random_key().unwrap();
        ctx.m1().unwrap();

        assert_wiped_on_drop(ctx.material.r.as_ref().unwrap());
        assert_wiped_on_drop(ctx.material.shared_secret.as_ref().unwrap());
        assert_wiped_on_drop(ctx.material.m1.as_ref().unwrap());

        ctx.reset();
        assert!(ctx.material.shared_secret.is_none());
        assert!(ctx.material.local_dh_keypair.is_none());
        assert!(ctx.material.r.is_none());
    }

    #[test]
    fn setters_overwrite() {
        let mut ctx = context(10);
        ctx.set_remote_dh_key_id(3);
        ctx.set_remote_dh_key_id(4);
        assert_eq!(ctx.remote_dh_key_id(), Some(4));

        ctx.set_remote_dh_public_hash(vec![1, 2]);
        ctx.set_remote_dh_public_hash(vec![3]);
        assert_eq!(ctx.remote_dh_public_hash(), Some(&[3u8][..]));

        ctx.set_remote_dh_public_encrypted(vec![9; 4]);
        assert_eq!(ctx.remote_dh_public_encrypted(), Some(&[9u8; 4][..]));
    }

    #[test]
    fn reset_clears_everything() {
        let mut ctx = keyed_context(11);
        ctx.set_state(AuthState::AwaitingSignature);
        ctx.set_remote_dh_key_id(2);
        ctx.set_local_identity_encrypted(vec![1, 2, 3]);
        ctx.set_local_identity_mac([0u8; MAC_LEN]);
        ctx.set_local_long_term_keypair(LongTermKeyPair::new(vec![1], vec![2]));
        ctx.m1().unwrap();

        ctx.reset();

        assert_eq!(ctx.state(), AuthState::None);
        assert_eq!(ctx.remote_dh_public_key(), None);
        assert_eq!(ctx.remote_dh_key_id(), None);
        assert_eq!(ctx.local_identity_encrypted(), None);
        assert_eq!(ctx.local_identity_mac(), None);
        assert!(ctx.local_long_term_keypair().is_none());
        assert_eq!(ctx.local_dh_key_id(), 1);
        assert_eq!(ctx.m1().unwrap_err(), AuthError::MissingRemoteKey { operation: "m1" });
    }

    #[test]
    fn reset_draws_fresh_randomness() {
        let mut ctx = context(12);
        let r = *ctx.random_key().unwrap();
        let public = ctx.local_dh_keypair().unwrap().public_key().clone();

        ctx.reset();

        assert_ne!(*ctx.random_key().unwrap(), r);
        assert_ne!(*ctx.local_dh_keypair().unwrap().public_key(), public);
    }

    #[test]
    fn reset_keeps_config() {
        let config = AuthConfig { protocol_version: 2, local_dh_key_id: 7 };
        let mut ctx = AuthContext::with_rng(config.clone(), ChaCha20Rng::seed_from_u64(13));
        ctx.reset();
        assert_eq!(ctx.config(), &config);
        assert_eq!(ctx.local_dh_key_id(), 7);
    }

    #[test]
    fn signature_message_needs_identity_proof() {
        let mut ctx = context(14);
        assert_eq!(
            ctx.signature_message().unwrap_err(),
            AuthError::MissingIdentityProof { field: "local_identity_encrypted" }
        );

        ctx.set_local_identity_encrypted(vec![0xAA; 8]);
        assert_eq!(
            ctx.signature_message().unwrap_err(),
            AuthError::MissingIdentityProof { field: "local_identity_mac" }
        );

        ctx.set_local_identity_mac([0x55; MAC_LEN]);
        let message = ctx.signature_message().unwrap();
        assert_eq!(message, SignatureMessage::v2(vec![0xAA; 8], [0x55; MAC_LEN]));
    }

    #[test]
    fn debug_hides_secrets() {
        let mut ctx = keyed_context(15);
        let r = *ctx.random_key().unwrap();
        let debug = format!("{ctx:?}");
        assert!(debug.contains("has_remote_dh_public_key: true"));
        assert!(!debug.contains(&format!("{:?}", &r[..])));
    }
}
