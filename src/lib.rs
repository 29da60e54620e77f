//! BMail protocol - wire framing and message codecs for the BMail transport
//!
//! This library turns the handshake and signature-exchange messages of the
//! BMail store-and-forward protocol into bytes and back. It is a pure codec:
//! no sockets, no session state, no cryptography.
//!
//! # Quick Start
//!
//! ```rust
//! use bmail_protocol::{HelloAck, Message, WireMessage};
//!
//! // Build and pack a message into a complete frame
//! let ack = HelloAck::new(vec![0x01, 0x02, 0x03]);
//! let bytes = ack.pack()?;
//!
//! // Unpack the frame and dispatch on its type tag
//! let decoded = Message::unpack(&bytes)?;
//! assert_eq!(decoded, Message::HelloAck(ack));
//! # Ok::<(), bmail_protocol::Error>(())
//! ```
//!
//! # Wire Format
//!
//! ```text
//! [VERSION (2)] [CRYPT TYPE (2)] [MESSAGE TYPE (2)] [PAYLOAD LENGTH (4)] [PAYLOAD (variable)]
//! ```
//!
//! All integers are big-endian.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod message;
pub mod protocol;

pub use message::{
    Hello, HelloAck, Message, SendSignature, ValidateSignature, WireMessage, now_millis,
};
pub use protocol::{
    CryptType, DEFAULT_MAX_PAYLOAD_SIZE, Error, Frame, FrameHeader, FrameLimits, HEADER_SIZE,
    MessageType, PROTOCOL_VERSION, Result,
};
