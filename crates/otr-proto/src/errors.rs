//! Error types for wire decoding and encoding.

use thiserror::Error;

/// Result alias used throughout the wire codec.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while encoding or decoding OTR wire fields.
///
/// Every variant is fatal to the message being processed. The handshake that
/// received it should be aborted or reset by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Fewer bytes remain than the field requires
    #[error("truncated input: {field} needs {needed} bytes, {available} available")]
    TruncatedInput {
        /// Field being read
        field: &'static str,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Declared length is above the codec limit or past the end of the buffer
    #[error("malformed length: {field} declares {declared} bytes, limit is {limit}")]
    MalformedLength {
        /// Field being read or written
        field: &'static str,
        /// Length found in (or destined for) the length prefix
        declared: usize,
        /// Largest length that would have been accepted
        limit: usize,
    },
}

impl ProtocolError {
    /// Returns true if the buffer simply ended early.
    ///
    /// A truncated buffer may be the result of a transport that delivered a
    /// partial message. A malformed length is never recoverable by waiting
    /// for more bytes once it exceeds the codec limit.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
