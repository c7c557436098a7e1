//! Primitive field encodings.
//!
//! Writers append to any [`BufMut`]; reading goes through [`WireReader`],
//! which checks the remaining length before every field so a hostile buffer
//! can only ever produce an error, never a panic or an over-read.

use bytes::{Buf, BufMut};
use num_bigint::BigUint;

use crate::errors::{ProtocolError, Result};

/// Width of the wire `mac` field: HMAC-SHA256 truncated to 160 bits.
pub const MAC_LEN: usize = 20;

/// Largest `data` or `mpi` body the codec will write or accept (1 MiB).
///
/// AKE payloads are a few hundred bytes. The bound keeps a forged length
/// prefix from turning into a large allocation.
pub const MAX_DATA_LEN: usize = 1024 * 1024;

/// Size of the length prefix on `data` and `mpi` fields.
const LENGTH_PREFIX_LEN: usize = 4;

/// Write a `short` (2 bytes, big-endian).
pub fn put_short(dst: &mut impl BufMut, value: u16) {
    dst.put_u16(value);
}

/// Write a `byte`.
pub fn put_byte(dst: &mut impl BufMut, value: u8) {
    dst.put_u8(value);
}

/// Write an `int` (4 bytes, big-endian).
pub fn put_int(dst: &mut impl BufMut, value: u32) {
    dst.put_u32(value);
}

/// Write a `data` field: 4-byte length followed by the raw bytes.
///
/// # Errors
///
/// - `ProtocolError::MalformedLength` if `data` is longer than
///   [`MAX_DATA_LEN`]
pub fn put_data(dst: &mut impl BufMut, data: &[u8]) -> Result<()> {
    put_length_prefixed(dst, "data", data)
}

/// Write a `mac` field (fixed width, no length prefix).
pub fn put_mac(dst: &mut impl BufMut, mac: &[u8; MAC_LEN]) {
    dst.put_slice(mac);
}

/// Write an `mpi` field: 4-byte length followed by [`mpi_magnitude`].
///
/// # Errors
///
/// - `ProtocolError::MalformedLength` if the magnitude is longer than
///   [`MAX_DATA_LEN`]
pub fn put_mpi(dst: &mut impl BufMut, value: &BigUint) -> Result<()> {
    put_length_prefixed(dst, "mpi", &mpi_magnitude(value))
}

/// Minimal big-endian magnitude of `value` as carried in an MPI body.
///
/// A single `0x00` byte is prepended when the top bit of the leading byte is
/// set, so the encoding never reads as negative. Zero has an empty body.
#[must_use]
pub fn mpi_magnitude(value: &BigUint) -> Vec<u8> {
    if value.bits() == 0 {
        return Vec::new();
    }

    let mut bytes = value.to_bytes_be();
    if bytes.first().is_some_and(|b| b & 0x80 != 0) {
        bytes.insert(0, 0x00);
    }
    bytes
}

fn put_length_prefixed(dst: &mut impl BufMut, field: &'static str, body: &[u8]) -> Result<()> {
    if body.len() > MAX_DATA_LEN {
        return Err(ProtocolError::MalformedLength {
            field,
            declared: body.len(),
            limit: MAX_DATA_LEN,
        });
    }

    // Bounded by MAX_DATA_LEN above, so the length fits in u32.
    dst.put_u32(body.len() as u32);
    dst.put_slice(body);
    Ok(())
}

/// Bounds-checked cursor over a received message.
///
/// Each `read_*` method consumes exactly the bytes of one field. On error the
/// cursor position is unspecified; the message should be discarded.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    /// Start reading at the beginning of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// True once every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Read a `short`.
    pub fn read_short(&mut self) -> Result<u16> {
        self.require("short", 2)?;
        Ok(self.buf.get_u16())
    }

    /// Read a `byte`.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.require("byte", 1)?;
        Ok(self.buf.get_u8())
    }

    /// Read an `int`.
    pub fn read_int(&mut self) -> Result<u32> {
        self.require("int", 4)?;
        Ok(self.buf.get_u32())
    }

    /// Read a `data` field.
    ///
    /// # Errors
    ///
    /// - `ProtocolError::TruncatedInput` if the length prefix is cut short
    /// - `ProtocolError::MalformedLength` if the declared length exceeds
    ///   [`MAX_DATA_LEN`] or the bytes remaining after the prefix
    pub fn read_data(&mut self) -> Result<Vec<u8>> {
        self.read_length_prefixed("data")
    }

    /// Read a fixed-width `mac` field.
    pub fn read_mac(&mut self) -> Result<[u8; MAC_LEN]> {
        self.require("mac", MAC_LEN)?;
        let mut mac = [0u8; MAC_LEN];
        self.buf.copy_to_slice(&mut mac);
        Ok(mac)
    }

    /// Read an `mpi` field.
    ///
    /// Leading zero bytes in the body are accepted; the value is the unsigned
    /// big-endian interpretation of the body.
    pub fn read_mpi(&mut self) -> Result<BigUint> {
        let body = self.read_length_prefixed("mpi")?;
        Ok(BigUint::from_bytes_be(&body))
    }

    fn read_length_prefixed(&mut self, field: &'static str) -> Result<Vec<u8>> {
        self.require(field, LENGTH_PREFIX_LEN)?;
        let declared = self.buf.get_u32() as usize;

        let limit = MAX_DATA_LEN.min(self.buf.remaining());
        if declared > limit {
            return Err(ProtocolError::MalformedLength { field, declared, limit });
        }

        let mut body = vec![0u8; declared];
        self.buf.copy_to_slice(&mut body);
        Ok(body)
    }

    fn require(&self, field: &'static str, needed: usize) -> Result<()> {
        let available = self.buf.remaining();
        if available < needed {
            return Err(ProtocolError::TruncatedInput { field, needed, available });
        }
        Ok(())
    }
}
