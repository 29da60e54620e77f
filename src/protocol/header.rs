//! BMail frame header
//!
//! The header is 10 bytes, big-endian, and precedes every payload.

use super::primitives::{U16_SIZE, U32_SIZE, u16_from_bytes, u32_from_bytes};
use super::{CryptType, Error, HEADER_SIZE, MessageType, PROTOCOL_VERSION, Result};

/// BMail frame header (10 bytes)
///
/// # Wire Format
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Version (2)          |         Crypt Type (2)        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |       Message Type (2)        |                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               +
/// |                       Payload Length (4)                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameHeader {
    version: u16,
    crypt_type: u16,
    msg_type: u16,
    payload_len: u32,
}

impl FrameHeader {
    /// Create a header for the current protocol version and crypt scheme
    #[must_use]
    pub const fn new(msg_type: MessageType, payload_len: u32) -> Self {
        Self::with_tag(msg_type.as_u16(), payload_len)
    }

    /// Create a header from a raw type tag without validating it
    #[must_use]
    pub const fn with_tag(msg_type: u16, payload_len: u32) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            crypt_type: CryptType::Ed25519.as_u16(),
            msg_type,
            payload_len,
        }
    }

    /// Get protocol version
    #[must_use]
    pub const fn version(&self) -> u16 {
        self.version
    }

    /// Get crypt type tag
    #[must_use]
    pub const fn crypt_type(&self) -> u16 {
        self.crypt_type
    }

    /// Get message type tag
    #[must_use]
    pub const fn msg_type_tag(&self) -> u16 {
        self.msg_type
    }

    /// Get message type
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_u16(self.msg_type)
    }

    /// Get declared payload length
    #[must_use]
    pub const fn payload_len(&self) -> u32 {
        self.payload_len
    }

    pub(crate) fn set_payload_len(&mut self, payload_len: u32) {
        self.payload_len = payload_len;
    }

    /// Total frame size (header + declared payload)
    #[must_use]
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + self.payload_len as usize
    }

    /// Validate the type tag against the open interval `(MIN_TYPE, MAX_TYPE)`
    pub fn validate(&self) -> Result<MessageType> {
        MessageType::try_from(self.msg_type)
    }

    /// Convert to bytes (big-endian)
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];

        bytes[0..2].copy_from_slice(&self.version.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.crypt_type.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.msg_type.to_be_bytes());
        bytes[6..10].copy_from_slice(&self.payload_len.to_be_bytes());

        bytes
    }

    /// Parse from bytes (big-endian)
    ///
    /// Only the first [`HEADER_SIZE`] bytes are looked at; the payload
    /// may or may not follow.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::ShortBuffer {
                needed: HEADER_SIZE,
                got: bytes.len(),
            });
        }

        let mut offset = 0;
        let version = u16_from_bytes(&bytes[offset..]);
        offset += U16_SIZE;
        let crypt_type = u16_from_bytes(&bytes[offset..]);
        offset += U16_SIZE;
        let msg_type = u16_from_bytes(&bytes[offset..]);
        offset += U16_SIZE;
        let payload_len = u32_from_bytes(&bytes[offset..]);
        debug_assert_eq!(offset + U32_SIZE, HEADER_SIZE);

        let header = Self {
            version,
            crypt_type,
            msg_type,
            payload_len,
        };

        header.validate()?;
        Ok(header)
    }
}
