//! BMail transport layer
//!
//! This module provides the frame header, the type registry, the primitive
//! big-endian helpers and the frame codec.

pub mod primitives;
mod codec;
mod error;
mod frame;
mod header;
#[cfg(feature = "metrics")]
mod metrics;
mod types;

pub(crate) use codec::reject;
pub use codec::{pack, unpack, unpack_head, unpack_head_with, unpack_with};
pub use error::{Error, Result};
pub use frame::Frame;
pub use header::FrameHeader;
#[cfg(feature = "metrics")]
pub use metrics::{MetricsSnapshot, metrics_snapshot};
pub use types::{CryptType, MAX_TYPE, MIN_TYPE, MessageType, PayloadCodec};

/// Current protocol version carried in every frame
pub const PROTOCOL_VERSION: u16 = 1;

/// Header size in bytes
pub const HEADER_SIZE: usize = 10;

/// Default payload cap of [`FrameLimits::default`] (16 MB)
pub const DEFAULT_MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

/// Limits applied while parsing frames received from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLimits {
    /// Largest payload length a header may declare.
    pub max_payload_len: u32,
}

impl FrameLimits {
    /// Create limits with an explicit payload cap.
    #[must_use]
    pub const fn new(max_payload_len: u32) -> Self {
        Self { max_payload_len }
    }

    /// Accept any length a 32-bit header can declare.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::new(u32::MAX)
    }
}

impl Default for FrameLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PAYLOAD_SIZE)
    }
}
