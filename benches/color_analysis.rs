use colorlens::color::{delta_e2000, distance_report};
use colorlens::{DominantColorExtractor, Rgb};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn synthetic_pixels(len: usize) -> Vec<Rgb> {
    (0..len)
        .map(|i| Rgb::new((i * 3 % 256) as u8, (i * 7 % 256) as u8, (i * 13 % 256) as u8))
        .collect()
}

fn benchmark_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    // 200x200 is the default downsampled size
    let pixels = synthetic_pixels(200 * 200);

    for k in [3, 5, 8] {
        group.bench_with_input(BenchmarkId::new("parallel", k), &k, |b, &k| {
            let extractor = DominantColorExtractor::new();
            b.iter(|| extractor.extract(black_box(&pixels), k))
        });
        group.bench_with_input(BenchmarkId::new("sequential", k), &k, |b, &k| {
            let extractor = DominantColorExtractor::new().parallel(false);
            b.iter(|| extractor.extract(black_box(&pixels), k))
        });
    }
    group.finish();
}

fn benchmark_distance(c: &mut Criterion) {
    let c1 = Rgb::new(200, 40, 90);
    let c2 = Rgb::new(180, 60, 120);

    c.bench_function("delta_e2000", |b| {
        b.iter(|| delta_e2000(black_box(c1), black_box(c2)))
    });
    c.bench_function("distance_report", |b| {
        b.iter(|| distance_report(black_box(c1), black_box(c2)))
    });
}

criterion_group!(benches, benchmark_extraction, benchmark_distance);
criterion_main!(benches);
