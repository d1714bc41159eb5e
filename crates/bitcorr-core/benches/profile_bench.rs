//! Shift-profile benchmarks: byte-per-bit slices vs packed words
//!
//! Run with: cargo bench -p bitcorr-core --bench profile_bench

use bitcorr_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn trigger_bits(len: usize) -> Vec<u8> {
    let tone = MultiTone::new(440.0, MultiTone::default_harmonics()).with_noise(0.05);
    let mut rng = StdRng::seed_from_u64(1);
    let signal = tone
        .synthesize_sampled(len, 44_100.0, &mut rng)
        .expect("valid sample rate");
    trigger_sequence(&signal)
}

fn bench_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("shift_profile");

    for len in [256usize, 1024, 4096] {
        let bits = trigger_bits(len);
        let packed = Bitstream::from_bits(&bits).expect("0/1 bits");

        group.throughput(Throughput::Elements((len / 2) as u64));

        group.bench_with_input(BenchmarkId::new("slice", len), &bits, |b, bits| {
            b.iter(|| cyclic_hamming_profile(black_box(bits)))
        });

        group.bench_with_input(BenchmarkId::new("packed", len), &packed, |b, packed| {
            b.iter(|| black_box(packed).autocorrelate())
        });
    }

    group.finish();
}

fn bench_trigger(c: &mut Criterion) {
    let tone = MultiTone::default();
    let (_, signal) = tone
        .synthesize(&TimeBase::new(0.0, 20.0, 0.001))
        .expect("valid time base");

    c.bench_function("hysteresis_20k", |b| {
        b.iter(|| HysteresisTrigger::default().process(black_box(&signal)))
    });
}

criterion_group!(benches, bench_profiles, bench_trigger);
criterion_main!(benches);
