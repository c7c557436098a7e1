//! Key derivation from the DH shared secret.
//!
//! `h2(b, s) = SHA256(b || MPI(s))`. Every key the AKE uses comes out of
//! this one function with a different prefix byte.

use num_bigint::BigUint;
use otr_crypto::{SHA256_LEN, dh::MODULUS_LEN, sha256};
use otr_proto::codec;
use zeroize::Zeroizing;

/// Prefix for `c || c'` (both AES keys come from this single hash)
pub const C_PREFIX: u8 = 0x01;

/// Prefix for `m1`
pub const M1_PREFIX: u8 = 0x02;

/// Prefix for `m2`
pub const M2_PREFIX: u8 = 0x03;

/// Prefix for `m1'`
pub const M1P_PREFIX: u8 = 0x04;

/// Prefix for `m2'`
pub const M2P_PREFIX: u8 = 0x05;

/// Derive 32 bytes from `secret` under `prefix`.
///
/// The secret is encoded exactly as an `mpi` wire field: 4-byte big-endian
/// length, then the minimal magnitude with a `0x00` pad when the high bit is
/// set. Pure and deterministic.
pub fn kdf(prefix: u8, secret: &BigUint) -> [u8; SHA256_LEN] {
    let bytes = Zeroizing::new(secret.to_bytes_be());
    kdf_from_bytes(prefix, &bytes)
}

/// [`kdf`] over a secret given as unsigned big-endian bytes.
///
/// Leading zero bytes are ignored, so any width of the same value derives the
/// same key. This is the path the authentication context uses, since it keeps
/// the shared secret as wiped bytes rather than a big integer.
pub fn kdf_from_bytes(prefix: u8, secret: &[u8]) -> [u8; SHA256_LEN] {
    let start = secret.iter().position(|&b| b != 0).unwrap_or(secret.len());
    let magnitude = &secret[start..];
    let pad = magnitude.first().is_some_and(|b| b & 0x80 != 0);

    // prefix + length + sign pad + magnitude
    let mut input = Zeroizing::new(Vec::with_capacity(1 + 4 + 1 + MODULUS_LEN));
    input.push(prefix);
    codec::put_int(&mut *input, (magnitude.len() + usize::from(pad)) as u32);
    if pad {
        input.push(0x00);
    }
    input.extend_from_slice(magnitude);

    sha256(&input)
}
