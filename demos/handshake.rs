//! Walk through the BMail handshake and signature exchange in memory

use bmail_protocol::{Hello, HelloAck, Message, SendSignature, ValidateSignature, WireMessage};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let wire = Hello::new().pack()?;
    info!(bytes = wire.len(), "client sends HELLO");
    let Message::Hello(_) = Message::unpack(&wire)? else {
        return Err("expected HELLO".into());
    };

    let wire = HelloAck::new(vec![0x13, 0x37]).pack()?;
    info!(bytes = wire.len(), "server sends HELLO_ACK");
    let Message::HelloAck(ack) = Message::unpack(&wire)? else {
        return Err("expected HELLO_ACK".into());
    };

    let mut proof = SendSignature::new(ack.into_serial_number(), "alice@bmail");
    // A real client signs these bytes with its Ed25519 key.
    let to_sign = proof.for_signing_bytes()?;
    proof.attach_signature(to_sign.iter().rev().copied().collect::<Vec<u8>>());

    let frame = proof.to_frame()?;
    info!("client sends SEND_SIGNATURE\n{frame}");
    let wire = frame.pack()?;
    let Message::SendSignature(received) = Message::unpack(&wire)? else {
        return Err("expected SEND_SIGNATURE".into());
    };
    info!(
        address = received.mail_address(),
        timestamp = received.timestamp_millis(),
        "server received signature"
    );

    let wire = ValidateSignature::new(received.serial_number()).pack()?;
    info!(bytes = wire.len(), "server sends VALIDATE_SIGNATURE");
    let verdict = ValidateSignature::unpack(&wire)?;
    info!(serial = ?verdict.serial_number(), "handshake complete");

    Ok(())
}
