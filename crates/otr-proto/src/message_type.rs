//! Message type tags carried in the `byte` field after the protocol version.

/// OTR v2 encoded message types.
///
/// The four AKE messages run in order DH-Commit, DH-Key, Reveal-Signature,
/// Signature. Data messages follow once the AKE completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    /// First AKE message: encrypted `g^x` and its hash
    DhCommit = 0x02,
    /// Encrypted conversation data
    Data = 0x03,
    /// Second AKE message: plaintext `g^y`
    DhKey = 0x0a,
    /// Third AKE message: revealed `r` plus the responder's identity proof
    RevealSignature = 0x11,
    /// Fourth AKE message: the initiator's identity proof
    Signature = 0x12,
}

impl MessageType {
    /// Wire tag for this message type.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Message type for a wire tag. `None` if unrecognized.
    #[must_use]
    pub const fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0x02 => Some(Self::DhCommit),
            0x03 => Some(Self::Data),
            0x0a => Some(Self::DhKey),
            0x11 => Some(Self::RevealSignature),
            0x12 => Some(Self::Signature),
            _ => None,
        }
    }

    /// True for the four messages of the authenticated key exchange.
    #[must_use]
    pub const fn is_ake(self) -> bool {
        !matches!(self, Self::Data)
    }
}
