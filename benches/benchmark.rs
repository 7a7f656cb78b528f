//! Benchmarks for MUGI keystream operations.
//!
//! Measures key/IV setup, single-word generation, batched `get`, and
//! payload XOR throughput across several payload sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mugi::image::xor_cipher;
use mugi::{BitWord, Generator};

/// Key used consistently across all benchmarks.
const BENCH_KEY: u128 = 0x0001_0203_0405_0607_0809_0a0b_0c0d_0e0f;

/// IV used consistently across all benchmarks.
const BENCH_IV: u128 = 0xf0e0_d0c0_b0a0_9080_7060_5040_3020_1000;

/// Keystream word size in bytes.
const WORD_SIZE_BYTES: u64 = 8;

/// Benchmarks `Generator::new()`, which runs the full 48-round setup.
fn bench_setup(c: &mut Criterion) {
    c.bench_function("setup", |b| {
        b.iter(|| Generator::new(black_box(BENCH_KEY), black_box(BENCH_IV)));
    });
}

/// Benchmarks single-word generation.
///
/// The generator is keyed once and advances naturally between iterations.
fn bench_next(c: &mut Criterion) {
    let mut generator = Generator::new(BENCH_KEY, BENCH_IV);

    let mut group = c.benchmark_group("next_single_word");
    group.throughput(Throughput::Bytes(WORD_SIZE_BYTES));

    group.bench_function("next_u64", |b| {
        b.iter(|| black_box(generator.next_u64()));
    });

    group.bench_function("next_word", |b| {
        b.iter(|| black_box(generator.next_word()));
    });

    group.finish();
}

/// Benchmarks `get(n)` for a 1 KiB batch of words.
fn bench_get(c: &mut Criterion) {
    let mut generator = Generator::new(BENCH_KEY, BENCH_IV);

    let mut group = c.benchmark_group("get_batch");
    group.throughput(Throughput::Bytes(128 * WORD_SIZE_BYTES));

    group.bench_function("128_words", |b| {
        b.iter(|| black_box(generator.get(black_box(128))));
    });

    group.finish();
}

/// Benchmarks `xor_cipher()` across payload sizes, including setup cost.
fn bench_xor_cipher_scaling(c: &mut Criterion) {
    let sizes: &[usize] = &[64, 4096, 65536];
    let key = BitWord::from(BENCH_KEY);
    let iv = BitWord::from(BENCH_IV);

    let mut group = c.benchmark_group("xor_cipher_scaling");

    for &size in sizes {
        let payload = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| xor_cipher(black_box(payload), &key, &iv));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_setup,
    bench_next,
    bench_get,
    bench_xor_cipher_scaling,
);
criterion_main!(benches);
