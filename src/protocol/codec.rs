//! BMail frame codec (pack/unpack)
//!
//! Receiving is two-step: [`unpack_head`] parses the fixed header so the
//! transport knows how many payload bytes to wait for, and [`unpack`]
//! checks that exactly that many bytes follow.

use bytes::Bytes;
use tracing::{debug, trace};

#[cfg(feature = "metrics")]
use super::metrics::{FrameDirection, Metrics};
use super::{Error, Frame, FrameHeader, FrameLimits, HEADER_SIZE, Result};

/// Pack a frame to bytes
///
/// # Format
///
/// ```text
/// [VERSION (2)] [CRYPT TYPE (2)] [MESSAGE TYPE (2)] [PAYLOAD LENGTH (4)] [PAYLOAD (variable)]
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The type tag is outside `(MIN_TYPE, MAX_TYPE)`
/// - The payload does not fit a 32-bit length
/// - The header's length field disagrees with the payload
pub fn pack(frame: &Frame) -> Result<Vec<u8>> {
    let header = frame.header();
    let payload = frame.payload();

    let msg_type = header.validate().map_err(reject)?;

    if u32::try_from(payload.len()).is_err() {
        return Err(reject(Error::PayloadTooLarge {
            size: payload.len(),
            max: u32::MAX as usize,
        }));
    }

    if header.payload_len() as usize != payload.len() {
        return Err(reject(Error::LengthMismatch {
            declared: header.payload_len() as usize,
            actual: payload.len(),
        }));
    }

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&header.to_bytes());
    bytes.extend_from_slice(payload);

    #[cfg(feature = "metrics")]
    Metrics::record_frame(FrameDirection::Packed, msg_type);
    trace!(%msg_type, payload_len = payload.len(), "packed frame");

    Ok(bytes)
}

/// Parse the frame header
///
/// Returns the header and the offset where payload bytes begin. Any
/// payload length that [`pack`] can produce is accepted; use
/// [`unpack_head_with`] to cap it.
pub fn unpack_head(bytes: &[u8]) -> Result<(FrameHeader, usize)> {
    unpack_head_with(bytes, &FrameLimits::unlimited())
}

/// Parse the frame header, rejecting declared payloads over `limits`
pub fn unpack_head_with(bytes: &[u8], limits: &FrameLimits) -> Result<(FrameHeader, usize)> {
    let header = FrameHeader::from_bytes(bytes).map_err(reject)?;

    if header.payload_len() > limits.max_payload_len {
        return Err(reject(Error::PayloadTooLarge {
            size: header.payload_len() as usize,
            max: limits.max_payload_len as usize,
        }));
    }

    Ok((header, HEADER_SIZE))
}

/// Unpack a complete frame without a payload cap
///
/// # Errors
///
/// Returns an error if:
/// - Fewer than `HEADER_SIZE` bytes are given
/// - The type tag is outside `(MIN_TYPE, MAX_TYPE)`
/// - The bytes after the header are not exactly the declared payload length
pub fn unpack(bytes: &[u8]) -> Result<(Frame, usize)> {
    unpack_with(bytes, &FrameLimits::unlimited())
}

/// Unpack a complete frame, rejecting declared payloads over `limits`
pub fn unpack_with(bytes: &[u8], limits: &FrameLimits) -> Result<(Frame, usize)> {
    let (header, offset) = unpack_head_with(bytes, limits)?;

    let declared = header.payload_len() as usize;
    let actual = bytes.len() - offset;
    if declared != actual {
        return Err(reject(Error::LengthMismatch { declared, actual }));
    }

    // Copy so the caller may reuse its receive buffer.
    let payload = Bytes::copy_from_slice(&bytes[offset..]);

    if let Some(msg_type) = header.message_type() {
        #[cfg(feature = "metrics")]
        Metrics::record_frame(FrameDirection::Unpacked, msg_type);
        trace!(%msg_type, payload_len = declared, "unpacked frame");
    }

    Ok((Frame::from_parts(header, payload), offset))
}

pub(crate) fn reject(err: Error) -> Error {
    #[cfg(feature = "metrics")]
    Metrics::record_error();
    debug!(error = %err, "rejected input");
    err
}
