//! BMail codec error types

use thiserror::Error;

use super::MessageType;

/// BMail codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Fewer bytes available than the field being read requires
    #[error("short buffer: need {needed} bytes, got {got}")]
    ShortBuffer {
        /// Bytes required
        needed: usize,
        /// Bytes available
        got: usize,
    },

    /// Declared length disagrees with the bytes actually present
    #[error("length mismatch: declared {declared} bytes, found {actual}")]
    LengthMismatch {
        /// Length carried on the wire or in the header
        declared: usize,
        /// Length actually present
        actual: usize,
    },

    /// Message type tag outside the valid range
    #[error("invalid message type: {tag}")]
    InvalidType {
        /// Raw tag
        tag: u16,
    },

    /// Message type is reserved and has no payload codec
    #[error("unimplemented message type: {0}")]
    UnimplementedMessageType(MessageType),

    /// Frame carries a different message type than the decoder expects
    #[error("unexpected message type: expected {expected}, found tag {found}")]
    UnexpectedMessageType {
        /// Type the decoder handles
        expected: MessageType,
        /// Tag found in the frame header
        found: u16,
    },

    /// Serial number length prefix disagrees with the remaining bytes
    #[error("serial number length mismatch: declared {declared} bytes, found {actual}")]
    SerialNumberLengthMismatch {
        /// Length prefix value
        declared: usize,
        /// Bytes following the prefix
        actual: usize,
    },

    /// Variable-length field does not fit a 16-bit length prefix
    #[error("field `{field}` too long: {len} bytes (max 65535)")]
    FieldTooLong {
        /// Field name
        field: &'static str,
        /// Field length
        len: usize,
    },

    /// Payload too large
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Mail address is not valid UTF-8
    #[error("invalid UTF-8 in mail address: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
