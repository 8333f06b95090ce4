use std::hint::black_box;

use bytes::BytesMut;
use criterion::{BatchSize, BenchmarkId, Criterion};

use diswire::batch::{Attribute, BatchReply, BatchRequest, RequestBody};
use diswire::codec::DEFAULT_MAX_STRING_LENGTH;

fn hold_request(attribute_count: usize) -> BatchRequest {
    BatchRequest::new(
        "alice",
        RequestBody::HoldJob {
            job_id: "4242.serverA".to_string(),
            attributes: (0..attribute_count)
                .map(|i| Attribute::set(&format!("Hold_Types{i}"), "u"))
                .collect(),
        },
    )
}

fn bench_encode_request(c: &mut Criterion) {
    for attribute_count in [1, 100, 10_000] {
        c.bench_with_input(
            BenchmarkId::new("encode hold request", attribute_count),
            &attribute_count,
            |b, &attribute_count| {
                b.iter_batched_ref(
                    || (hold_request(attribute_count), BytesMut::new()),
                    |(request, buffer)| request.encode(buffer),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_decode_request(c: &mut Criterion) {
    for attribute_count in [1, 100, 10_000] {
        let mut encoded = BytesMut::new();
        hold_request(attribute_count).encode(&mut encoded);
        let encoded = encoded.freeze();
        c.bench_with_input(
            BenchmarkId::new("decode hold request", attribute_count),
            &encoded,
            |b, encoded| {
                b.iter(|| {
                    let mut input: &[u8] = encoded;
                    black_box(BatchRequest::decode(&mut input, DEFAULT_MAX_STRING_LENGTH).ok());
                });
            },
        );
    }
}

fn bench_decode_reply(c: &mut Criterion) {
    let mut encoded = BytesMut::new();
    BatchReply::error(15001, Some("Unknown Job Id 4242.serverA")).encode(&mut encoded);
    let encoded = encoded.freeze();
    c.bench_function("decode text reply", |b| {
        b.iter(|| {
            let mut input: &[u8] = &encoded;
            black_box(BatchReply::decode(&mut input, DEFAULT_MAX_STRING_LENGTH).ok());
        });
    });
}

pub fn benchmark(c: &mut Criterion) {
    bench_encode_request(c);
    bench_decode_request(c);
    bench_decode_reply(c);
}
