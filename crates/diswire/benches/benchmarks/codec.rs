use std::hint::black_box;

use bytes::BytesMut;
use criterion::{BatchSize, BenchmarkId, Criterion};

use diswire::codec::{
    PrecisionTable, decode_f64, decode_signed, decode_unsigned, encode_f64, encode_signed,
    encode_unsigned,
};

fn bench_encode_unsigned(c: &mut Criterion) {
    for value in [7u64, 123_456, u64::MAX] {
        c.bench_with_input(
            BenchmarkId::new("encode unsigned", value),
            &value,
            |b, &value| {
                b.iter_batched_ref(
                    || BytesMut::with_capacity(64),
                    |buffer| encode_unsigned(buffer, black_box(value)),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_decode_unsigned(c: &mut Criterion) {
    for value in [7u64, 123_456, u64::MAX] {
        let mut encoded = BytesMut::new();
        encode_unsigned(&mut encoded, value);
        let encoded = encoded.freeze();
        c.bench_with_input(
            BenchmarkId::new("decode unsigned", value),
            &encoded,
            |b, encoded| {
                b.iter(|| {
                    let mut input: &[u8] = encoded;
                    black_box(decode_unsigned(&mut input).ok());
                });
            },
        );
    }
}

fn bench_decode_signed_list(c: &mut Criterion) {
    for count in [10, 1_000, 100_000] {
        let mut encoded = BytesMut::new();
        for i in 0..count {
            encode_signed(&mut encoded, i * 7919 - count * 3000);
        }
        let encoded = encoded.freeze();
        c.bench_with_input(
            BenchmarkId::new("decode signed list", count),
            &encoded,
            |b, encoded| {
                b.iter(|| {
                    let mut input: &[u8] = encoded;
                    let mut sum = 0i64;
                    while !input.is_empty() {
                        sum = sum.wrapping_add(decode_signed(&mut input).unwrap_or_default());
                    }
                    black_box(sum);
                });
            },
        );
    }
}

fn bench_float(c: &mut Criterion) {
    for value in [0.5f64, 6.02214076e23, 1.5e-300] {
        let mut encoded = BytesMut::new();
        encode_f64(&mut encoded, value).unwrap();
        let encoded = encoded.freeze();
        c.bench_with_input(
            BenchmarkId::new("decode f64", value),
            &encoded,
            |b, encoded| {
                b.iter(|| {
                    let mut input: &[u8] = encoded;
                    black_box(decode_f64(&mut input).ok());
                });
            },
        );
    }
    c.bench_function("scale by power of ten", |b| {
        let table = PrecisionTable::get();
        b.iter(|| black_box(table.scale(black_box(1.25), black_box(-287))));
    });
}

pub fn benchmark(c: &mut Criterion) {
    bench_encode_unsigned(c);
    bench_decode_unsigned(c);
    bench_decode_signed_list(c);
    bench_float(c);
}
