//! Benchmarks for distance calculation and ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nearby_geo::{haversine_distance_meters, rank_by_distance, rank_nearest, Coordinate, Place};

fn create_catalog(count: usize) -> Vec<Place> {
    (0..count)
        .map(|i| {
            // Grid around New Delhi
            let lat = 28.0 + (i as f64 * 0.01) % 2.0;
            let lng = 77.0 + (i as f64 * 0.013) % 2.0;
            Place::new(format!("place-{i}"), lat, lng)
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let delhi = Coordinate::new(28.6139, 77.2090);
    let dubai = Coordinate::new(25.2155, 55.2105);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance_meters(black_box(&delhi), black_box(&dubai)))
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_by_distance");
    let query = Coordinate::new(28.6139, 77.2090);

    for size in [10, 100, 1000, 10000].iter() {
        let catalog = create_catalog(*size);

        group.bench_with_input(BenchmarkId::new("all", size), size, |b, _| {
            b.iter(|| rank_by_distance(black_box(query), black_box(&catalog)))
        });

        group.bench_with_input(BenchmarkId::new("top_10", size), size, |b, _| {
            b.iter(|| rank_nearest(black_box(query), black_box(&catalog), 10))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_distance, bench_ranking);
criterion_main!(benches);
