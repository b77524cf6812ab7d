//! Benchmarks for geo crate distance calculations and formatting.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mazeed_geo::{format_distance, format_duration, haversine_distance_meters, straight_line, Coordinate};

fn create_test_points(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| {
            // Points in a grid around Riyadh
            let step = i as f64 * 0.01;
            Coordinate::new(24.0 + step % 2.0, 46.0 + step % 2.0)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let riyadh = Coordinate::new(24.7136, 46.6753);
    let dubai = Coordinate::new(25.2048, 55.2708);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance_meters(black_box(&riyadh), black_box(&dubai)))
    });
}

fn bench_fallback_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("straight_line_fallback");
    let user = Coordinate::new(24.7136, 46.6753);

    for size in [10, 100, 1000].iter() {
        let points = create_test_points(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| {
                points
                    .iter()
                    .map(|p| straight_line(black_box(&user), p))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");

    group.bench_function("distance", |b| b.iter(|| format_distance(black_box(2_537.4))));
    group.bench_function("duration", |b| b.iter(|| format_duration(black_box(4_321.0))));

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_fallback_distances, bench_formatting);
criterion_main!(benches);
