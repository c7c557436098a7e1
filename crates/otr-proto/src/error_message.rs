//! Plaintext OTR error messages (`?OTR Error:...`).
//!
//! Unlike the AKE messages these are not binary-encoded. A peer that cannot
//! process something we sent answers with a plain chat line starting with
//! [`ErrorMessage::PREFIX`].

use std::fmt;

/// Human-readable error reported by the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Text after the prefix, verbatim
    pub error: String,
}

impl ErrorMessage {
    /// Marker that starts every OTR error message.
    pub const PREFIX: &'static str = "?OTR Error:";

    /// Wrap an error text for sending.
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }

    /// Recognize an error message. `None` if `text` lacks the prefix.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        text.strip_prefix(Self::PREFIX).map(Self::new)
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.error)
    }
}
