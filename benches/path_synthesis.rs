use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rounded_qr::{Builder, ECLevel, PathOptions, SvgPathData, encode, replay, synthesize_path};

fn bench_path_small(c: &mut Criterion) {
    let grid = encode(b"HELLO WORLD", ECLevel::M).unwrap();
    let options = PathOptions::default();
    c.bench_function("path_v1", |b| {
        b.iter(|| synthesize_path(black_box(&grid), 256.0, 256.0, black_box(&options)))
    });
}

fn bench_path_large(c: &mut Criterion) {
    let payload: Vec<u8> = (0..2000u32).map(|i| (i % 251) as u8).collect();
    let grid = encode(&payload, ECLevel::L).unwrap();
    let options = PathOptions::default();
    c.bench_function("path_2000_bytes", |b| {
        b.iter(|| synthesize_path(black_box(&grid), 1024.0, 1024.0, black_box(&options)))
    });
}

fn bench_svg_replay(c: &mut Criterion) {
    let qr = Builder::text("https://example.com").build().unwrap();
    c.bench_function("svg_replay", |b| {
        b.iter(|| {
            let mut svg = SvgPathData::new();
            replay(black_box(&qr.commands), &mut svg);
            svg.into_string()
        })
    });
}

criterion_group!(benches, bench_path_small, bench_path_large, bench_svg_replay);
criterion_main!(benches);
