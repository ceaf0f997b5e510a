use criterion::{Criterion, criterion_group, criterion_main};
use linemark_engine::{EncodeOptions, Outline, decode, encode};
mod common;

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let outline = common::generate_outline(1000);
    let text = common::generate_record_text(1000);

    group.bench_function("encode_11k_lines", |b| {
        b.iter(|| {
            let lines = encode(std::hint::black_box(outline.lines()), &EncodeOptions::default());
            std::hint::black_box(lines);
        });
    });

    group.bench_function("decode_11k_lines", |b| {
        b.iter(|| {
            let lines = decode(std::hint::black_box(outline.lines())).unwrap();
            std::hint::black_box(lines);
        });
    });

    group.bench_function("parse_11k_records", |b| {
        b.iter(|| {
            let parsed = Outline::parse(std::hint::black_box(&text), EncodeOptions::default());
            std::hint::black_box(parsed.unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_encoding);
criterion_main!(benches);
