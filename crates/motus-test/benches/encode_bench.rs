//! Benchmarks for the encoding and reconstruction pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use motus_core::MeaningParams;
use motus_encode::encode;
use motus_features::summarize;
use motus_reconstruct::reconstruct;
use motus_test::{hands_clip, wave_clip};

fn bench_encode_pose(c: &mut Criterion) {
    let clip = wave_clip(150, 30.0);

    c.bench_function("encode_pose_5s", |b| {
        b.iter(|| encode(black_box(&clip)))
    });
}

fn bench_encode_hands(c: &mut Criterion) {
    let clip = hands_clip(150, 30.0);

    c.bench_function("encode_hands_5s", |b| {
        b.iter(|| encode(black_box(&clip)))
    });
}

fn bench_summarize(c: &mut Criterion) {
    let clip = wave_clip(150, 30.0);

    c.bench_function("summarize_5s", |b| {
        b.iter(|| summarize(black_box(&clip)))
    });
}

fn bench_reconstruct(c: &mut Criterion) {
    let template = wave_clip(150, 30.0);
    let params = MeaningParams::default();

    c.bench_function("reconstruct_5s", |b| {
        b.iter(|| reconstruct(black_box(&template), black_box(&params)))
    });
}

criterion_group!(
    benches,
    bench_encode_pose,
    bench_encode_hands,
    bench_summarize,
    bench_reconstruct
);
criterion_main!(benches);
