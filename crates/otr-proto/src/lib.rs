//! OTR Wire Protocol
//!
//! Binary encodings for the Off-the-Record v2 authenticated key exchange.
//! Every AKE message is a sequence of primitive fields written big-endian:
//!
//! ```text
//! short : u16
//! byte  : u8
//! int   : u32
//! data  : u32 length || bytes
//! mpi   : u32 length || minimal big-endian magnitude
//! mac   : 20 bytes (HMAC-SHA256 truncated to 160 bits), no length prefix
//! ```
//!
//! [`codec`] holds the field encoders and the bounds-checked [`WireReader`].
//! Message types built from those fields live in their own modules; the
//! Signature message is the one carrying the encrypted identity proof.
//!
//! # Security
//!
//! Decoding is structural only. Nothing here checks MAC correctness or
//! whether a message type tag is the one the caller expected. Those checks
//! belong to the handshake logic, which holds the keys.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod codec;
pub mod error_message;
pub mod errors;
pub mod message_type;
pub mod signature;

pub use codec::{MAC_LEN, MAX_DATA_LEN, WireReader, mpi_magnitude};
pub use error_message::ErrorMessage;
pub use errors::{ProtocolError, Result};
pub use message_type::MessageType;
pub use signature::SignatureMessage;

/// OTR protocol version 2, the version whose AKE these messages implement.
pub const PROTOCOL_VERSION_2: u16 = 2;
