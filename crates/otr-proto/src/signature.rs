//! Signature message: the last step of the AKE.
//!
//! Layout on the wire:
//! `[version: short] [type: byte] [encrypted identity: data] [mac: mac]`
//!
//! The encrypted identity is the sender's signed proof of its long-term key,
//! encrypted under `c'`. The MAC is HMAC-SHA256-160 keyed with `m2'` over the
//! encrypted identity. Both keys come from the authentication context; this
//! type only carries the bytes.

use bytes::BufMut;

use crate::{
    MessageType, PROTOCOL_VERSION_2,
    codec::{self, MAC_LEN, MAX_DATA_LEN, WireReader},
    errors::{ProtocolError, Result},
};

/// Fixed bytes around the variable payload: version, type, length prefix, MAC.
const FIXED_OVERHEAD: usize = 2 + 1 + 4 + MAC_LEN;

/// Signature message carrying an encrypted identity proof.
///
/// `Default` yields the empty message that [`SignatureMessage::decode`]
/// fills in; use [`SignatureMessage::new`] when sending.
///
/// # Invariants
///
/// - Round Trip: `decode(encode(m))` reproduces every field of `m` exactly,
///   including a `message_type` other than the signature tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignatureMessage {
    /// Protocol version (2 for messages this crate builds)
    pub protocol_version: u16,
    /// Raw message type tag; `0x12` for a well-formed signature message
    pub message_type: u8,
    /// Identity proof encrypted under `c'`
    pub encrypted_identity: Vec<u8>,
    /// Truncated HMAC over the encrypted identity, keyed with `m2'`
    pub identity_mac: [u8; MAC_LEN],
}

impl SignatureMessage {
    /// Create a signature message with the signature type tag set.
    pub fn new(
        protocol_version: u16,
        encrypted_identity: impl Into<Vec<u8>>,
        identity_mac: [u8; MAC_LEN],
    ) -> Self {
        Self {
            protocol_version,
            message_type: MessageType::Signature.to_u8(),
            encrypted_identity: encrypted_identity.into(),
            identity_mac,
        }
    }

    /// Create a version 2 signature message.
    pub fn v2(encrypted_identity: impl Into<Vec<u8>>, identity_mac: [u8; MAC_LEN]) -> Self {
        Self::new(PROTOCOL_VERSION_2, encrypted_identity, identity_mac)
    }

    /// Message type as enum. `None` if the tag is unrecognized.
    #[must_use]
    pub fn message_type_enum(&self) -> Option<MessageType> {
        MessageType::from_u8(self.message_type)
    }

    /// Size of the encoded message in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        FIXED_OVERHEAD + self.encrypted_identity.len()
    }

    /// Encode into `dst` in wire order.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::MalformedLength` if the encrypted identity exceeds
    ///   [`MAX_DATA_LEN`]. Nothing is written in that case.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        if self.encrypted_identity.len() > MAX_DATA_LEN {
            return Err(ProtocolError::MalformedLength {
                field: "data",
                declared: self.encrypted_identity.len(),
                limit: MAX_DATA_LEN,
            });
        }

        codec::put_short(dst, self.protocol_version);
        codec::put_byte(dst, self.message_type);
        codec::put_data(dst, &self.encrypted_identity)?;
        codec::put_mac(dst, &self.identity_mac);
        Ok(())
    }

    /// Encode into a freshly allocated buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode from wire bytes.
    ///
    /// Reads the four fields in order; bytes after the MAC are ignored.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::TruncatedInput` if the buffer ends inside a field
    /// - `ProtocolError::MalformedLength` if the encrypted identity length is
    ///   over the codec limit or runs past the buffer
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut message = Self::default();
        message.read_from(&mut WireReader::new(bytes))?;
        Ok(message)
    }

    /// Populate this message from `reader`, consuming exactly its fields.
    pub fn read_from(&mut self, reader: &mut WireReader<'_>) -> Result<()> {
        self.protocol_version = reader.read_short()?;
        self.message_type = reader.read_byte()?;
        self.encrypted_identity = reader.read_data()?;
        self.identity_mac = reader.read_mac()?;
        Ok(())
    }
}
