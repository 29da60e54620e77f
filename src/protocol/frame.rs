//! BMail transport frame

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use super::{FrameHeader, MessageType};

/// BMail frame: header plus opaque payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame header
    header: FrameHeader,
    /// Frame payload
    payload: Bytes,
}

impl Frame {
    /// Create a new frame; the length field follows the payload
    pub fn new(msg_type: MessageType, payload: impl Into<Bytes>) -> Self {
        Self::from_raw(msg_type.as_u16(), payload)
    }

    /// Create a frame from a raw type tag
    ///
    /// The tag is not checked here; [`Frame::pack`] rejects it if invalid.
    pub fn from_raw(tag: u16, payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();
        // Saturates past 4 GiB; `pack` then fails with `PayloadTooLarge`.
        let payload_len = u32::try_from(payload.len()).unwrap_or(u32::MAX);
        Self {
            header: FrameHeader::with_tag(tag, payload_len),
            payload,
        }
    }

    /// Create a frame from an existing header and payload, as-is
    #[must_use]
    pub fn from_parts(header: FrameHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// Get message type
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        self.header.message_type()
    }

    /// Get payload
    #[must_use]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Replace the payload, keeping the length field in sync
    pub fn set_payload(&mut self, payload: impl Into<Bytes>) {
        self.payload = payload.into();
        // Saturates like `from_raw`; `pack` rejects the oversized payload.
        self.header
            .set_payload_len(u32::try_from(self.payload.len()).unwrap_or(u32::MAX));
    }

    /// Consume the frame, returning its payload
    #[must_use]
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Get header
    #[must_use]
    pub const fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Pack frame to bytes
    pub fn pack(&self) -> super::Result<Vec<u8>> {
        super::pack(self)
    }

    /// Unpack frame from bytes
    pub fn unpack(bytes: &[u8]) -> super::Result<Self> {
        super::unpack(bytes).map(|(frame, _)| frame)
    }

    /// Header fields on one line
    #[must_use]
    pub fn head_string(&self) -> String {
        format!(
            "Version: {:<4}CryptType: {:<4}MsgType: {:<4}DataLength: {:<8}",
            self.header.version(),
            self.header.crypt_type(),
            self.header.msg_type_tag(),
            self.header.payload_len()
        )
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.head_string())?;
        write!(f, "{}", STANDARD.encode(&self.payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(MessageType::HelloAck, vec![0x00, 0x01, 0x07]);

        assert_eq!(frame.message_type(), Some(MessageType::HelloAck));
        assert_eq!(frame.payload().as_ref(), &[0x00, 0x01, 0x07]);
        assert_eq!(frame.header().payload_len(), 3);
    }

    #[test]
    fn test_set_payload_updates_length() {
        let mut frame = Frame::new(MessageType::Hello, Bytes::new());
        frame.set_payload(vec![1u8; 12]);
        assert_eq!(frame.header().payload_len(), 12);
    }

    #[test]
    fn test_frame_roundtrip() {
        let original = Frame::new(MessageType::ValidateSignature, b"\x00\x02ok".to_vec());
        let packed = original.pack().unwrap();
        let decoded = Frame::unpack(&packed).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_display() {
        let frame = Frame::new(MessageType::Hello, b"hi".to_vec());
        let text = frame.to_string();

        assert!(text.starts_with("Version: 1   CryptType: 1   MsgType: 1   DataLength: 2"));
        assert!(text.ends_with("aGk="));
    }
}
