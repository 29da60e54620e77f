use bmail_protocol::{Frame, HelloAck, Message, MessageType, SendSignature, WireMessage};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

fn signed(signature_len: usize) -> SendSignature {
    let mut message = SendSignature::with_timestamp(vec![0x42; 32], "bench@bmail", 1_000);
    message.attach_signature(vec![0xEE; signature_len]);
    message
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    for size in [64usize, 1024, 64 * 1024] {
        let frame = Frame::new(MessageType::SendEnvelope, vec![0u8; size]);
        let packed = frame.pack().unwrap();

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("pack_{size}b"), |b| {
            b.iter(|| black_box(frame.pack().unwrap()));
        });
        group.bench_function(format!("unpack_{size}b"), |b| {
            b.iter(|| black_box(Frame::unpack(&packed).unwrap()));
        });
    }

    group.finish();
}

fn bench_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("message");

    let ack = HelloAck::new(vec![0x42; 32]);
    let ack_packed = ack.pack().unwrap();
    group.bench_function("hello_ack_pack", |b| {
        b.iter(|| black_box(ack.pack().unwrap()));
    });
    group.bench_function("hello_ack_unpack", |b| {
        b.iter(|| black_box(Message::unpack(&ack_packed).unwrap()));
    });

    let proof = signed(64);
    let proof_packed = proof.pack().unwrap();
    group.bench_function("send_signature_pack", |b| {
        b.iter(|| black_box(proof.pack().unwrap()));
    });
    group.bench_function("send_signature_unpack", |b| {
        b.iter(|| black_box(Message::unpack(&proof_packed).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_frame, bench_messages);
criterion_main!(benches);
