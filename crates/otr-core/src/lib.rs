//! OTR Authenticated Key Exchange Core
//!
//! Cryptographic bookkeeping for one OTR v2 AKE attempt. The handshake driver
//! (not part of this crate) decides which message to send next; this crate
//! holds the material those messages are built from.
//!
//! # Key Schedule
//!
//! ```text
//! local x (320 bits) ──┐
//!                      ├── s = (g^y)^x mod p
//! remote g^y ──────────┘
//!        │
//!        ▼
//! h2(b) = SHA256(b || MPI(s))
//!        │
//!        ├── b = 0x01 → c  || c'    (AES-128 keys, one hash split in half)
//!        ├── b = 0x02 → m1          (HMAC-SHA256 keys, one hash each)
//!        ├── b = 0x03 → m2
//!        ├── b = 0x04 → m1'
//!        └── b = 0x05 → m2'
//! ```
//!
//! Every value in [`AuthContext`] is computed lazily on first access and
//! cached until [`AuthContext::reset`]. A reset discards everything,
//! including the random key `r` and the ephemeral key pair, so a restarted
//! handshake never reuses randomness.
//!
//! # Usage
//!
//! ```
//! use otr_core::{AuthConfig, AuthContext};
//!
//! let mut alice = AuthContext::new(AuthConfig::default());
//! let mut bob = AuthContext::new(AuthConfig::default());
//!
//! let alice_public = alice.local_dh_keypair()?.public_key().clone();
//! let bob_public = bob.local_dh_keypair()?.public_key().clone();
//! alice.set_remote_dh_public_key(bob_public);
//! bob.set_remote_dh_public_key(alice_public);
//!
//! assert_eq!(alice.c()?, bob.c()?);
//! # Ok::<(), otr_core::AuthError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod identity;
pub mod kdf;
pub mod state;

pub use auth::AuthContext;
pub use config::AuthConfig;
pub use error::AuthError;
pub use identity::LongTermKeyPair;
pub use kdf::kdf;
pub use state::AuthState;
