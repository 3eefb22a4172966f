use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId, Throughput};
use qsp_guard::{
    Frame,
    QspSession,
    RawFrame,
    LegacyFrame,
    StructuredRecord,
};

fn setup_established(sid: u64) -> QspSession {
    let mut session = QspSession::new();
    session.accept_frame(Frame::handshake(sid, 1)).unwrap();
    session
}

fn benchmark_handshake(c: &mut Criterion) {
    let mut group = c.benchmark_group("handshake");

    group.bench_function("structured", |b| {
        b.iter(|| {
            let mut session = QspSession::new();
            black_box(session.accept_frame(Frame::handshake(777, 1).with_mode("PQC+QKD")).unwrap());
        });
    });

    group.bench_function("legacy_with_marker", |b| {
        let raw = RawFrame::Legacy(LegacyFrame::new("HS", b"MODE=PQC+QKD;", 777u64, 0u64));
        b.iter(|| {
            let mut session = QspSession::new();
            black_box(session.ingest(&raw).unwrap());
        });
    });

    group.finish();
}

fn benchmark_app_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("app_data");

    for size in [0usize, 64, 1024, 16384] {
        let payload = vec![0x42u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("canonical", size), &payload, |b, payload| {
            let mut session = setup_established(888);
            b.iter(|| {
                black_box(session.accept_frame(Frame::app_data(888, 1).with_payload(payload.clone())).unwrap());
            });
        });

        group.bench_with_input(BenchmarkId::new("structured_record", size), &payload, |b, payload| {
            let mut session = setup_established(888);
            let raw = RawFrame::Structured(StructuredRecord::new("APP_DATA", 888u64, 1u64).with_payload(payload.clone()));
            b.iter(|| {
                black_box(session.ingest(&raw).unwrap());
            });
        });
    }

    group.finish();
}

fn benchmark_rekey_chain(c: &mut Criterion) {
    c.bench_function("rekey_chain_100", |b| {
        b.iter_with_setup(
            || setup_established(6061),
            |mut session| {
                for epoch in 2..102u64 {
                    black_box(session.accept_frame(Frame::rekey(6061, epoch)).unwrap());
                }
            },
        );
    });
}

criterion_group!(benches, benchmark_handshake, benchmark_app_data, benchmark_rekey_chain);
criterion_main!(benches);
