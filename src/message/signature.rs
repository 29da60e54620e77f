//! Signature exchange messages: `SendSignature` and `ValidateSignature`.
//!
//! Sending a signature is a three-step affair: build the message, hand
//! [`SendSignature::for_signing_bytes`] to the signer, then attach the
//! result with [`SendSignature::attach_signature`] before packing. This
//! crate never signs or verifies anything itself.

use std::time::{SystemTime, UNIX_EPOCH};

use super::{WireMessage, decode_serial_number, encode_serial_number};
use crate::protocol::primitives::{Reader, U16_SIZE, U64_SIZE, put_prefixed, u64_to_bytes};
use crate::protocol::{Error, MessageType, Result};

/// Milliseconds since the Unix epoch, from the system clock.
#[must_use]
pub fn now_millis() -> u64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Signed proof that the sender owns `mail_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SendSignature {
    serial_number: Vec<u8>,
    mail_address: String,
    timestamp_millis: u64,
    signature: Vec<u8>,
}

impl SendSignature {
    /// Create an unsigned message stamped with the current time
    pub fn new(serial_number: impl Into<Vec<u8>>, mail_address: impl Into<String>) -> Self {
        Self::with_timestamp(serial_number, mail_address, now_millis())
    }

    /// Create an unsigned message with an explicit timestamp
    pub fn with_timestamp(
        serial_number: impl Into<Vec<u8>>,
        mail_address: impl Into<String>,
        timestamp_millis: u64,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            mail_address: mail_address.into(),
            timestamp_millis,
            signature: Vec::new(),
        }
    }

    /// Get serial number
    #[must_use]
    pub fn serial_number(&self) -> &[u8] {
        &self.serial_number
    }

    /// Get mail address
    #[must_use]
    pub fn mail_address(&self) -> &str {
        &self.mail_address
    }

    /// Get timestamp in milliseconds
    #[must_use]
    pub const fn timestamp_millis(&self) -> u64 {
        self.timestamp_millis
    }

    /// Get attached signature (empty until attached)
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Bytes the external signer must sign
    ///
    /// ```text
    /// [SN LEN (2)] [SN] [ADDR LEN (2)] [ADDR] [TIMESTAMP (8)]
    /// ```
    pub fn for_signing_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(
            U16_SIZE + self.serial_number.len() + U16_SIZE + self.mail_address.len() + U64_SIZE,
        );
        put_prefixed(&mut out, "serial_number", &self.serial_number)?;
        put_prefixed(&mut out, "mail_address", self.mail_address.as_bytes())?;
        out.extend_from_slice(&u64_to_bytes(self.timestamp_millis));
        Ok(out)
    }

    /// Attach the signature computed over [`Self::for_signing_bytes`]
    pub fn attach_signature(&mut self, signature: impl Into<Vec<u8>>) {
        self.signature = signature.into();
    }
}

impl WireMessage for SendSignature {
    const MESSAGE_TYPE: MessageType = MessageType::SendSignature;

    fn encode_payload(&self) -> Result<Vec<u8>> {
        let mut out = self.for_signing_bytes()?;
        put_prefixed(&mut out, "signature", &self.signature)?;
        Ok(out)
    }

    /// The signature is exactly its declared length; trailing bytes after
    /// it are rejected.
    fn decode_payload(payload: &[u8]) -> Result<(Self, usize)> {
        let mut reader = Reader::new(payload);

        let serial_number = reader.read_prefixed()?.to_vec();
        let mail_address = String::from_utf8(reader.read_prefixed()?.to_vec())?;
        let timestamp_millis = reader.read_u64()?;
        let signature = reader.read_prefixed()?.to_vec();

        if reader.remaining() != 0 {
            return Err(Error::LengthMismatch {
                declared: reader.offset(),
                actual: payload.len(),
            });
        }

        let message = Self {
            serial_number,
            mail_address,
            timestamp_millis,
            signature,
        };
        Ok((message, reader.offset()))
    }
}

/// Server verdict on a [`SendSignature`], echoing the serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidateSignature {
    serial_number: Vec<u8>,
}

impl ValidateSignature {
    /// Create a verdict for `serial_number`
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
}

impl WireMessage for ValidateSignature {
    const MESSAGE_TYPE: MessageType = MessageType::ValidateSignature;

    fn encode_payload(&self) -> Result<Vec<u8>> {
        encode_serial_number(&self.serial_number)
    }

    fn decode_payload(payload: &[u8]) -> Result<(Self, usize)> {
        let (serial_number, consumed) = decode_serial_number(payload)?;
        Ok((Self { serial_number }, consumed))
    }
}
