//! AES-128 in counter mode with a zero initial counter.
//!
//! OTR never transmits an IV for AKE ciphertexts; both sides start the
//! counter at zero. Encryption and decryption are the same keystream XOR.

use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// AES-128 key size in bytes.
pub const AES_KEY_LEN: usize = 16;

/// Initial counter block.
const ZERO_COUNTER: [u8; 16] = [0u8; 16];

/// Encrypt `plaintext` under `key`.
#[must_use]
pub fn aes_ctr_encrypt(key: &[u8; AES_KEY_LEN], plaintext: &[u8]) -> Vec<u8> {
    let mut buf = plaintext.to_vec();
    apply_keystream(key, &mut buf);
    buf
}

/// Decrypt `ciphertext` under `key`.
#[must_use]
pub fn aes_ctr_decrypt(key: &[u8; AES_KEY_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut buf = ciphertext.to_vec();
    apply_keystream(key, &mut buf);
    buf
}

fn apply_keystream(key: &[u8; AES_KEY_LEN], buf: &mut [u8]) {
    let mut cipher = Aes128Ctr::new(key.into(), &ZERO_COUNTER.into());
    cipher.apply_keystream(buf);
}
