//! Handshake messages: `Hello` and `HelloAck`.

use super::{WireMessage, decode_serial_number, encode_serial_number};
use crate::protocol::{MessageType, Result};

/// Connection opener. Carries no data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hello;

impl Hello {
    /// Create a hello
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl WireMessage for Hello {
    const MESSAGE_TYPE: MessageType = MessageType::Hello;

    fn encode_payload(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    /// Accepts any payload and consumes nothing.
    fn decode_payload(_payload: &[u8]) -> Result<(Self, usize)> {
        Ok((Self, 0))
    }
}

/// Reply to [`Hello`] carrying the session serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelloAck {
    serial_number: Vec<u8>,
}

impl HelloAck {
    /// Create an ack for `serial_number`
    pub fn new(serial_number: impl Into<Vec<u8>>) -> Self {
        Self {
            serial_number: serial_number.into(),
        }
    }

    /// Get serial number
    #[must_use]
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    /// Consume the ack, returning the serial number
    #[must_use]
    pub fn into_serial_number(self) -> Vec<u8> {
        self.serial_number
    }
}

impl WireMessage for HelloAck {
    const MESSAGE_TYPE: MessageType = MessageType::HelloAck;

    fn encode_payload(&self) -> Result<Vec<u8>> {
        encode_serial_number(&self.serial_number)
    }

    fn decode_payload(payload: &[u8]) -> Result<(Self, usize)> {
        let (serial_number, consumed) = decode_serial_number(payload)?;
        Ok((Self { serial_number }, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Error, HEADER_SIZE};

    #[test]
    fn test_hello_pack() {
        let packed = Hello::new().pack().unwrap();
        assert_eq!(packed, [0x00, 0x01, 0x00, 0x01, 0x00, 0x01, 0, 0, 0, 0]);
        assert_eq!(Hello::unpack(&packed).unwrap(), Hello);
    }

    #[test]
    fn test_hello_ignores_payload() {
        assert_eq!(Hello::decode_payload(&[1, 2, 3]).unwrap(), (Hello, 0));
        assert_eq!(Hello::decode_payload(&[]).unwrap(), (Hello, 0));
    }

    #[test]
    fn test_hello_ack_payload() {
        let ack = HelloAck::new(vec![0x01, 0x02, 0x03]);
        let frame = ack.to_frame().unwrap();

        assert_eq!(frame.message_type(), Some(MessageType::HelloAck));
        assert_eq!(frame.payload().as_ref(), &[0x00, 0x03, 0x01, 0x02, 0x03]);

        let packed = ack.pack().unwrap();
        assert_eq!(&packed[HEADER_SIZE..], &[0x00, 0x03, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_hello_ack_decode() {
        let (ack, consumed) = HelloAck::decode_payload(&[0x00, 0x03, 0x01, 0x02, 0x03]).unwrap();
        assert_eq!(ack.serial_number(), &[0x01, 0x02, 0x03]);
        assert_eq!(consumed, 5);
    }

    #[test]
    fn test_hello_ack_declared_length_mismatch() {
        assert_eq!(
            HelloAck::decode_payload(&[0x00, 0x04, 0x01, 0x02, 0x03]),
            Err(Error::SerialNumberLengthMismatch {
                declared: 4,
                actual: 3
            })
        );
        assert_eq!(
            HelloAck::decode_payload(&[0x00, 0x01, 0x01, 0x02]),
            Err(Error::SerialNumberLengthMismatch {
                declared: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_hello_ack_short_payload() {
        assert_eq!(
            HelloAck::decode_payload(&[0x00]),
            Err(Error::ShortBuffer { needed: 2, got: 1 })
        );
        assert!(HelloAck::decode_payload(&[]).is_err());
    }

    #[test]
    fn test_hello_ack_empty_serial() {
        let packed = HelloAck::new(Vec::new()).pack().unwrap();
        let decoded = HelloAck::unpack(&packed).unwrap();
        assert!(decoded.serial_number().is_empty());
    }

    #[test]
    fn test_hello_ack_oversized_serial() {
        let ack = HelloAck::new(vec![0u8; 70_000]);
        assert!(matches!(ack.pack(), Err(Error::FieldTooLong { .. })));
    }
}
