//! BMail message types and crypt schemes

use std::fmt;

/// Lower sentinel of the type tag range. Never a valid tag.
pub const MIN_TYPE: u16 = 0;

/// Upper sentinel of the type tag range. Never a valid tag.
pub const MAX_TYPE: u16 = 15;

/// BMail message types
///
/// Valid tags lie strictly between [`MIN_TYPE`] and [`MAX_TYPE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum MessageType {
    /// Connection opener, no payload
    Hello = 1,
    /// Reply to Hello carrying a serial number
    HelloAck = 2,

    /// Signed proof of mail address ownership
    SendSignature = 3,
    /// Server verdict on a SendSignature
    ValidateSignature = 4,

    /// Envelope upload
    SendEnvelope = 5,
    /// Envelope upload response
    RespEnvelope = 6,
    /// Envelope upload failure
    SendEnvelopeFailed = 7,
    /// Response to an envelope upload failure
    RespSendEnvelopeFailed = 8,

    /// Mailbox status request
    Stat = 9,
    /// Mailbox status response
    StatResp = 10,
    /// Mailbox listing request
    List = 11,
    /// Mailbox listing response
    ListResp = 12,
    /// Latest mail request
    Latest = 13,
    /// Latest mail response
    LatestResp = 14,
}

/// Whether a message type has a payload codec in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadCodec {
    /// A message variant exists for this tag
    Implemented,
    /// Tag is reserved; dispatching it fails
    Reserved,
}

impl MessageType {
    /// All valid message types in tag order
    pub const ALL: [Self; 14] = [
        Self::Hello,
        Self::HelloAck,
        Self::SendSignature,
        Self::ValidateSignature,
        Self::SendEnvelope,
        Self::RespEnvelope,
        Self::SendEnvelopeFailed,
        Self::RespSendEnvelopeFailed,
        Self::Stat,
        Self::StatResp,
        Self::List,
        Self::ListResp,
        Self::Latest,
        Self::LatestResp,
    ];

    /// Convert from a wire tag
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Hello),
            2 => Some(Self::HelloAck),
            3 => Some(Self::SendSignature),
            4 => Some(Self::ValidateSignature),
            5 => Some(Self::SendEnvelope),
            6 => Some(Self::RespEnvelope),
            7 => Some(Self::SendEnvelopeFailed),
            8 => Some(Self::RespSendEnvelopeFailed),
            9 => Some(Self::Stat),
            10 => Some(Self::StatResp),
            11 => Some(Self::List),
            12 => Some(Self::ListResp),
            13 => Some(Self::Latest),
            14 => Some(Self::LatestResp),
            _ => None,
        }
    }

    /// Convert to a wire tag
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Check whether a raw tag lies in the open interval `(MIN_TYPE, MAX_TYPE)`
    #[must_use]
    pub const fn is_valid_tag(tag: u16) -> bool {
        tag > MIN_TYPE && tag < MAX_TYPE
    }

    /// Whether this crate can encode and decode the payload
    #[must_use]
    pub const fn payload_codec(self) -> PayloadCodec {
        match self {
            Self::Hello | Self::HelloAck | Self::SendSignature | Self::ValidateSignature => {
                PayloadCodec::Implemented
            }
            Self::SendEnvelope
            | Self::RespEnvelope
            | Self::SendEnvelopeFailed
            | Self::RespSendEnvelopeFailed
            | Self::Stat
            | Self::StatResp
            | Self::List
            | Self::ListResp
            | Self::Latest
            | Self::LatestResp => PayloadCodec::Reserved,
        }
    }

    /// Short upper-case name as used in protocol documents
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hello => "HELLO",
            Self::HelloAck => "HELLO_ACK",
            Self::SendSignature => "SEND_SIGNATURE",
            Self::ValidateSignature => "VALIDATE_SIGNATURE",
            Self::SendEnvelope => "SEND_ENVELOPE",
            Self::RespEnvelope => "RESP_ENVELOPE",
            Self::SendEnvelopeFailed => "SEND_ENVELOPE_FAILED",
            Self::RespSendEnvelopeFailed => "RESP_SEND_ENVELOPE_FAILED",
            Self::Stat => "STAT",
            Self::StatResp => "STAT_RESP",
            Self::List => "LIST",
            Self::ListResp => "LIST_RESP",
            Self::Latest => "LATEST",
            Self::LatestResp => "LATEST_RESP",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<u16> for MessageType {
    type Error = super::Error;

    fn try_from(tag: u16) -> super::Result<Self> {
        Self::from_u16(tag).ok_or(super::Error::InvalidType { tag })
    }
}

/// Signature scheme tag carried in every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum CryptType {
    /// Ed25519 signatures
    #[default]
    Ed25519 = 1,
}

impl CryptType {
    /// Convert from a wire tag
    #[must_use]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Ed25519),
            _ => None,
        }
    }

    /// Convert to a wire tag
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}
