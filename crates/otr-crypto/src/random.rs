//! Secure random bytes

use rand::{CryptoRng, RngCore};

use crate::error::CryptoError;

/// Fill `buf` from a cryptographically secure RNG.
///
/// Uses the fallible RNG entry point so an exhausted or missing OS source
/// surfaces as an error instead of a panic. With `OsRng` this may block until
/// the kernel pool is seeded.
pub fn fill_random<R>(rng: &mut R, buf: &mut [u8]) -> Result<(), CryptoError>
where
    R: RngCore + CryptoRng + ?Sized,
{
    rng.try_fill_bytes(buf)
        .map_err(|e| CryptoError::EntropyUnavailable { reason: e.to_string() })
}
