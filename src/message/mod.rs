//! BMail message variants
//!
//! Each variant serializes itself to a payload and is wrapped in a
//! [`Frame`] tagged with its [`MessageType`]. On receipt the frame's tag
//! picks the decoder through [`Message::decode`].

mod hello;
mod signature;

use crate::protocol::primitives::{Reader, put_prefixed};
use crate::protocol::{Error, Frame, FrameLimits, MessageType, Result, reject};

pub use hello::{Hello, HelloAck};
pub use signature::{SendSignature, ValidateSignature, now_millis};

/// A payload format bound to one message type.
pub trait WireMessage: Sized {
    /// Tag written into the frame header
    const MESSAGE_TYPE: MessageType;

    /// Serialize the payload (without frame header).
    fn encode_payload(&self) -> Result<Vec<u8>>;

    /// Deserialize the payload, returning the value and the bytes consumed.
    fn decode_payload(payload: &[u8]) -> Result<(Self, usize)>;

    /// Wrap the payload in a frame.
    fn to_frame(&self) -> Result<Frame> {
        Ok(Frame::new(Self::MESSAGE_TYPE, self.encode_payload()?))
    }

    /// Pack into a complete frame.
    fn pack(&self) -> Result<Vec<u8>> {
        self.to_frame()?.pack()
    }

    /// Decode from a frame that must carry [`Self::MESSAGE_TYPE`].
    fn from_frame(frame: &Frame) -> Result<Self> {
        let found = frame.header().msg_type_tag();
        if found != Self::MESSAGE_TYPE.as_u16() {
            return Err(Error::UnexpectedMessageType {
                expected: Self::MESSAGE_TYPE,
                found,
            });
        }
        Self::decode_payload(frame.payload()).map(|(message, _)| message)
    }

    /// Unpack a complete frame of this type.
    fn unpack(bytes: &[u8]) -> Result<Self> {
        Self::from_frame(&Frame::unpack(bytes)?)
    }
}

/// Any message this crate can decode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Connection opener
    Hello(Hello),
    /// Hello reply
    HelloAck(HelloAck),
    /// Signed address proof
    SendSignature(SendSignature),
    /// Signature verdict
    ValidateSignature(ValidateSignature),
}

impl Message {
    /// Get message type
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Self::Hello(_) => Hello::MESSAGE_TYPE,
            Self::HelloAck(_) => HelloAck::MESSAGE_TYPE,
            Self::SendSignature(_) => SendSignature::MESSAGE_TYPE,
            Self::ValidateSignature(_) => ValidateSignature::MESSAGE_TYPE,
        }
    }

    /// Decode the payload of an already unpacked frame
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The type tag is outside `(MIN_TYPE, MAX_TYPE)`
    /// - The type is reserved and has no codec
    /// - The payload is malformed for its type
    pub fn decode(frame: &Frame) -> Result<Self> {
        let msg_type = frame.header().validate().map_err(reject)?;
        let payload = frame.payload();

        let decoded = match msg_type {
            MessageType::Hello => Hello::decode_payload(payload).map(|(m, _)| Self::Hello(m)),
            MessageType::HelloAck => {
                HelloAck::decode_payload(payload).map(|(m, _)| Self::HelloAck(m))
            }
            MessageType::SendSignature => {
                SendSignature::decode_payload(payload).map(|(m, _)| Self::SendSignature(m))
            }
            MessageType::ValidateSignature => {
                ValidateSignature::decode_payload(payload).map(|(m, _)| Self::ValidateSignature(m))
            }
            MessageType::SendEnvelope
            | MessageType::RespEnvelope
            | MessageType::SendEnvelopeFailed
            | MessageType::RespSendEnvelopeFailed
            | MessageType::Stat
            | MessageType::StatResp
            | MessageType::List
            | MessageType::ListResp
            | MessageType::Latest
            | MessageType::LatestResp => Err(Error::UnimplementedMessageType(msg_type)),
        };

        decoded.map_err(reject)
    }

    /// Unpack a complete frame and decode its payload
    pub fn unpack(bytes: &[u8]) -> Result<Self> {
        Self::decode(&Frame::unpack(bytes)?)
    }

    /// Unpack a complete frame under explicit limits and decode its payload
    pub fn unpack_with(bytes: &[u8], limits: &FrameLimits) -> Result<Self> {
        let (frame, _) = crate::protocol::unpack_with(bytes, limits)?;
        Self::decode(&frame)
    }

    /// Wrap the payload in a frame
    pub fn to_frame(&self) -> Result<Frame> {
        match self {
            Self::Hello(m) => m.to_frame(),
            Self::HelloAck(m) => m.to_frame(),
            Self::SendSignature(m) => m.to_frame(),
            Self::ValidateSignature(m) => m.to_frame(),
        }
    }

    /// Pack into a complete frame
    pub fn pack(&self) -> Result<Vec<u8>> {
        self.to_frame()?.pack()
    }
}

impl From<Hello> for Message {
    fn from(m: Hello) -> Self {
        Self::Hello(m)
    }
}

impl From<HelloAck> for Message {
    fn from(m: HelloAck) -> Self {
        Self::HelloAck(m)
    }
}

impl From<SendSignature> for Message {
    fn from(m: SendSignature) -> Self {
        Self::SendSignature(m)
    }
}

impl From<ValidateSignature> for Message {
    fn from(m: ValidateSignature) -> Self {
        Self::ValidateSignature(m)
    }
}

/// Serial number payload shared by `HelloAck` and `ValidateSignature`.
fn encode_serial_number(serial_number: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(2 + serial_number.len());
    put_prefixed(&mut out, "serial_number", serial_number)?;
    Ok(out)
}

/// The serial number is everything after the prefix, and the prefix must
/// agree with it.
fn decode_serial_number(payload: &[u8]) -> Result<(Vec<u8>, usize)> {
    let mut reader = Reader::new(payload);
    let declared = usize::from(reader.read_u16()?);
    let serial_number = reader.rest();

    if declared != serial_number.len() {
        return Err(Error::SerialNumberLengthMismatch {
            declared,
            actual: serial_number.len(),
        });
    }

    Ok((serial_number.to_vec(), reader.offset() + serial_number.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::FrameHeader;
    use bytes::Bytes;

    #[test]
    fn test_dispatch_all_variants() {
        let mut signed = SendSignature::with_timestamp(vec![0xAA], "a@b", 1000);
        signed.attach_signature(vec![0xFF, 0xFF]);

        let messages: [Message; 4] = [
            Hello::new().into(),
            HelloAck::new(vec![1, 2, 3]).into(),
            signed.into(),
            ValidateSignature::new(vec![9, 8]).into(),
        ];

        for message in messages {
            let packed = message.pack().unwrap();
            let decoded = Message::unpack(&packed).unwrap();
            assert_eq!(decoded.message_type(), message.message_type());
            assert_eq!(decoded, message);
        }
    }

    #[test]
    fn test_reserved_types_unimplemented() {
        for msg_type in MessageType::ALL {
            if msg_type.payload_codec() == crate::protocol::PayloadCodec::Implemented {
                continue;
            }
            let packed = Frame::new(msg_type, vec![0x00, 0x00]).pack().unwrap();
            assert_eq!(
                Message::unpack(&packed),
                Err(Error::UnimplementedMessageType(msg_type))
            );
        }
    }

    #[test]
    fn test_decode_rejects_invalid_tag() {
        let frame = Frame::from_parts(FrameHeader::with_tag(0, 0), Bytes::new());
        assert_eq!(Message::decode(&frame), Err(Error::InvalidType { tag: 0 }));
    }

    #[test]
    fn test_from_frame_type_check() {
        let frame = HelloAck::new(vec![1]).to_frame().unwrap();
        assert_eq!(
            ValidateSignature::from_frame(&frame),
            Err(Error::UnexpectedMessageType {
                expected: MessageType::ValidateSignature,
                found: MessageType::HelloAck.as_u16(),
            })
        );
    }

    #[test]
    fn test_unpack_with_limits() {
        let packed = HelloAck::new(vec![7u8; 100]).pack().unwrap();
        assert_eq!(
            Message::unpack_with(&packed, &FrameLimits::new(10)),
            Err(Error::PayloadTooLarge { size: 102, max: 10 })
        );
    }

    #[test]
    fn test_serial_number_helpers() {
        let encoded = encode_serial_number(&[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(encoded, [0x00, 0x03, 0x01, 0x02, 0x03]);
        assert_eq!(
            decode_serial_number(&encoded).unwrap(),
            (vec![0x01, 0x02, 0x03], 5)
        );
        assert!(matches!(
            decode_serial_number(&[0x00]),
            Err(Error::ShortBuffer { .. })
        ));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_payload_rejections_are_counted() {
        use crate::protocol::metrics_snapshot;

        let packed = Frame::new(MessageType::HelloAck, vec![0x00, 0x09, 0x01])
            .pack()
            .unwrap();
        let before = metrics_snapshot().rejected_frames;
        assert!(Message::unpack(&packed).is_err());
        assert!(metrics_snapshot().rejected_frames > before);
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use crate::protocol::HEADER_SIZE;
        use proptest::prelude::*;

        fn field_strategy() -> impl Strategy<Value = Vec<u8>> {
            prop::collection::vec(any::<u8>(), 0..=usize::from(u16::MAX))
        }

        fn message_strategy() -> impl Strategy<Value = Message> {
            prop_oneof![
                Just(Message::Hello(Hello)),
                field_strategy().prop_map(|sn| HelloAck::new(sn).into()),
                field_strategy().prop_map(|sn| ValidateSignature::new(sn).into()),
                (
                    field_strategy(),
                    "\\PC{0,64}",
                    any::<u64>(),
                    field_strategy(),
                )
                    .prop_map(|(sn, address, timestamp, signature)| {
                        let mut message = SendSignature::with_timestamp(sn, address, timestamp);
                        message.attach_signature(signature);
                        message.into()
                    }),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            /// Property: every message variant round-trips through a frame
            #[test]
            fn prop_message_roundtrip(message in message_strategy()) {
                let packed = message.pack().unwrap();
                let decoded = Message::unpack(&packed).unwrap();

                prop_assert_eq!(&decoded, &message);
                prop_assert_eq!(decoded.pack().unwrap(), packed);
            }

            /// Property: a frame cut short anywhere past its header is a length mismatch
            #[test]
            fn prop_truncated_message_rejected(
                message in message_strategy(),
                cut in 1usize..=usize::from(u16::MAX),
            ) {
                let packed = message.pack().unwrap();
                let payload_len = packed.len() - HEADER_SIZE;
                prop_assume!(payload_len > 0);

                let keep = packed.len() - 1 - (cut - 1) % payload_len;
                let result = Message::unpack(&packed[..keep]);
                let is_mismatch = matches!(result, Err(Error::LengthMismatch { .. }));
                prop_assert!(is_mismatch);
            }
        }
    }
}
