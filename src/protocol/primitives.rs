//! Big-endian integer helpers and the length-prefixed field idiom.
//!
//! Every variable-length payload field is written as a 2-byte big-endian
//! length followed by that many bytes.

use super::{Error, Result};

/// Width of a 16-bit integer on the wire
pub const U16_SIZE: usize = 2;
/// Width of a 32-bit integer on the wire
pub const U32_SIZE: usize = 4;
/// Width of a 64-bit integer on the wire
pub const U64_SIZE: usize = 8;

/// Encode a `u16` as 2 big-endian bytes.
#[inline]
#[must_use]
pub const fn u16_to_bytes(value: u16) -> [u8; U16_SIZE] {
    value.to_be_bytes()
}

/// Encode a `u32` as 4 big-endian bytes.
#[inline]
#[must_use]
pub const fn u32_to_bytes(value: u32) -> [u8; U32_SIZE] {
    value.to_be_bytes()
}

/// Encode a `u64` as 8 big-endian bytes.
#[inline]
#[must_use]
pub const fn u64_to_bytes(value: u64) -> [u8; U64_SIZE] {
    value.to_be_bytes()
}

/// Read a big-endian `u16` from the front of `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than 2 bytes. Callers check length first.
#[inline]
#[must_use]
pub fn u16_from_bytes(buf: &[u8]) -> u16 {
    u16::from_be_bytes([buf[0], buf[1]])
}

/// Read a big-endian `u32` from the front of `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than 4 bytes. Callers check length first.
#[inline]
#[must_use]
pub fn u32_from_bytes(buf: &[u8]) -> u32 {
    u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Read a big-endian `u64` from the front of `buf`.
///
/// # Panics
///
/// Panics if `buf` is shorter than 8 bytes. Callers check length first.
#[inline]
#[must_use]
pub fn u64_from_bytes(buf: &[u8]) -> u64 {
    let mut raw = [0u8; U64_SIZE];
    raw.copy_from_slice(&buf[..U64_SIZE]);
    u64::from_be_bytes(raw)
}

/// Append `field` to `out` behind a 2-byte length prefix.
pub fn put_prefixed(out: &mut Vec<u8>, name: &'static str, field: &[u8]) -> Result<()> {
    let len = u16::try_from(field.len()).map_err(|_| Error::FieldTooLong {
        field: name,
        len: field.len(),
    })?;
    out.extend_from_slice(&u16_to_bytes(len));
    out.extend_from_slice(field);
    Ok(())
}

/// Bounds-checked cursor over a received payload.
///
/// Every read checks the remaining length first and fails with
/// [`Error::ShortBuffer`] instead of panicking.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the front of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Bytes consumed so far.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Everything not yet consumed, without advancing.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Take exactly `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::ShortBuffer {
                needed: self.offset + len,
                got: self.buf.len(),
            });
        }
        let slice = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.take(U16_SIZE).map(u16_from_bytes)
    }

    /// Read a big-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.take(U32_SIZE).map(u32_from_bytes)
    }

    /// Read a big-endian `u64`.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.take(U64_SIZE).map(u64_from_bytes)
    }

    /// Read a 2-byte length prefix and then exactly that many bytes.
    pub fn read_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u16()?;
        self.take(usize::from(len))
    }
}
