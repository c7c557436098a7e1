//! Diffie-Hellman over the OTR group.
//!
//! OTR v2 fixes the group to the 1536-bit MODP prime from RFC 3526 with
//! generator 2. Private exponents are 320 random bits.

use std::{fmt, sync::OnceLock};

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::{error::CryptoError, random::fill_random};

/// RFC 3526 group 5 prime, big-endian hex.
const MODULUS_HEX: &[u8] = b"\
    FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
    29024E088A67CC74020BBEA63B139B22514A08798E3404DD\
    EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245\
    E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
    EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D\
    C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F\
    83655D23DCA3AD961C62F356208552BB9ED529077096966D\
    670C354E4ABC9804F1746C08CA237327FFFFFFFFFFFFFFFF";

/// Group generator.
const GENERATOR: u32 = 2;

/// Private exponent size in bytes (320 bits).
pub const PRIVATE_KEY_LEN: usize = 40;

/// Size of the group modulus in bytes.
pub const MODULUS_LEN: usize = 192;

/// The group modulus `p`.
pub fn modulus() -> &'static BigUint {
    static MODULUS: OnceLock<BigUint> = OnceLock::new();
    MODULUS.get_or_init(|| {
        let Some(p) = BigUint::parse_bytes(MODULUS_HEX, 16) else {
            unreachable!("RFC 3526 modulus constant is valid hex");
        };
        p
    })
}

/// The group generator `g`.
pub fn generator() -> BigUint {
    BigUint::from(GENERATOR)
}

/// Reject a peer public value outside `[2, p - 2]`.
///
/// Values 0, 1 and `p - 1` confine the shared secret to a trivial subgroup.
pub fn check_public_key(value: &BigUint) -> Result<(), CryptoError> {
    let two = BigUint::from(2u32);
    let upper = modulus() - &two;
    if *value < two || *value > upper {
        return Err(CryptoError::InvalidPublicKey);
    }
    Ok(())
}

/// Shared secret `s` as minimal unsigned big-endian bytes, wiped on drop.
pub type SharedSecret = Zeroizing<Vec<u8>>;

/// Ephemeral Diffie-Hellman key pair.
///
/// The private exponent never leaves this type; callers get the public value
/// and the shared secret only. The exponent is kept as fixed-width bytes and
/// wiped on drop. It is lifted into a `BigUint` only for the duration of one
/// exponentiation.
#[derive(Clone)]
pub struct DhKeyPair {
    private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    public_key: BigUint,
}

impl DhKeyPair {
    /// Generate a fresh key pair from `rng`.
    ///
    /// # Errors
    ///
    /// - `CryptoError::EntropyUnavailable` if the RNG fails
    /// - `CryptoError::DegenerateKey` if the sampled exponent is 0 or 1
    pub fn generate<R>(rng: &mut R) -> Result<Self, CryptoError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut exponent = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        fill_random(rng, exponent.as_mut_slice())?;
        Self::from_private_key(exponent)
    }

    /// Rebuild a key pair from a known big-endian private exponent.
    ///
    /// # Errors
    ///
    /// - `CryptoError::DegenerateKey` if the exponent is 0 or 1
    pub fn from_private_key(
        private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    ) -> Result<Self, CryptoError> {
        let x = exponent(&private_key);
        if x < BigUint::from(2u32) {
            return Err(CryptoError::DegenerateKey);
        }

        let public_key = generator().modpow(&x, modulus());
        Ok(Self { private_key, public_key })
    }

    /// Public value `g^x mod p`.
    #[must_use]
    pub fn public_key(&self) -> &BigUint {
        &self.public_key
    }

    /// Shared secret `peer_public^x mod p`.
    ///
    /// No range check is applied to `peer_public`; see [`check_public_key`].
    #[must_use]
    pub fn shared_secret(&self, peer_public: &BigUint) -> SharedSecret {
        let secret = peer_public.modpow(&exponent(&self.private_key), modulus());
        Zeroizing::new(secret.to_bytes_be())
    }
}

// num-bigint cannot wipe its limbs, so the temporary lives for one call only
fn exponent(private_key: &[u8; PRIVATE_KEY_LEN]) -> BigUint {
    BigUint::from_bytes_be(private_key)
}

// Manual Debug implementation (private exponent stays out of logs)
impl fmt::Debug for DhKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhKeyPair")
            .field("public_key_bits", &self.public_key.bits())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use zeroize::ZeroizeOnDrop;

    use super::*;

    fn exponent_of(value: u64) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        bytes[PRIVATE_KEY_LEN - 8..].copy_from_slice(&value.to_be_bytes());
        bytes
    }

    fn assert_wiped_on_drop<T: ZeroizeOnDrop>(_: &T) {}

    #[test]
    fn modulus_is_1536_bits() {
        assert_eq!(modulus().bits(), 1536);
        assert_eq!(modulus().to_bytes_be().len(), MODULUS_LEN);
    }

    #[test]
    fn modulus_is_odd() {
        assert_eq!(modulus() % 2u32, BigUint::from(1u32));
    }

    #[test]
    fn small_exponent_vector() {
        let pair = DhKeyPair::from_private_key(exponent_of(10)).unwrap();
        assert_eq!(*pair.public_key(), BigUint::from(1024u32));
    }

    #[test]
    fn reject_degenerate_exponent() {
        assert_eq!(
            DhKeyPair::from_private_key(exponent_of(1)).unwrap_err(),
            CryptoError::DegenerateKey
        );
        assert_eq!(
            DhKeyPair::from_private_key(exponent_of(0)).unwrap_err(),
            CryptoError::DegenerateKey
        );
    }

    #[test]
    fn generated_public_key_is_in_range() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let pair = DhKeyPair::generate(&mut rng).unwrap();
        assert!(check_public_key(pair.public_key()).is_ok());
    }

    #[test]
    fn generate_is_deterministic_for_seed() {
        let a = DhKeyPair::generate(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let b = DhKeyPair::generate(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn successive_pairs_differ() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let a = DhKeyPair::generate(&mut rng).unwrap();
        let b = DhKeyPair::generate(&mut rng).unwrap();
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn shared_secret_is_symmetric() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let alice = DhKeyPair::generate(&mut rng).unwrap();
        let bob = DhKeyPair::generate(&mut rng).unwrap();

        assert_eq!(alice.shared_secret(bob.public_key()), bob.shared_secret(alice.public_key()));
    }

    #[test]
    fn exponent_with_only_high_bytes_is_accepted() {
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        bytes[0] = 0x01;
        assert!(DhKeyPair::from_private_key(bytes).is_ok());
    }

    #[test]
    fn shared_secret_matches_modpow() {
        let alice = DhKeyPair::from_private_key(exponent_of(3)).unwrap();
        let bob = DhKeyPair::from_private_key(exponent_of(5)).unwrap();

        // 2^(3*5) = 32768
        let secret = alice.shared_secret(bob.public_key());
        assert_eq!(secret.as_slice(), &[0x80, 0x00]);
        assert_eq!(secret, bob.shared_secret(alice.public_key()));
    }

    #[test]
    fn secret_material_is_wiped_on_drop() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let alice = DhKeyPair::generate(&mut rng).unwrap();
        let bob = DhKeyPair::generate(&mut rng).unwrap();

        assert_wiped_on_drop(&alice.private_key);
        assert_wiped_on_drop(&alice.shared_secret(bob.public_key()));
    }

    #[test]
    fn public_key_range_bounds() {
        let p = modulus();
        assert_eq!(check_public_key(&BigUint::from(0u32)), Err(CryptoError::InvalidPublicKey));
        assert_eq!(check_public_key(&BigUint::from(1u32)), Err(CryptoError::InvalidPublicKey));
        assert_eq!(check_public_key(&BigUint::from(2u32)), Ok(()));
        assert_eq!(check_public_key(&(p - 2u32)), Ok(()));
        assert_eq!(check_public_key(&(p - 1u32)), Err(CryptoError::InvalidPublicKey));
        assert_eq!(check_public_key(p), Err(CryptoError::InvalidPublicKey));
    }

    #[test]
    fn debug_hides_private_key() {
        let pair = DhKeyPair::from_private_key(exponent_of(12345)).unwrap();
        let debug = format!("{pair:?}");
        assert!(!debug.contains("12345"));
        assert!(!debug.contains("private"));
    }
}
