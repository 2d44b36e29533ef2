//! Benchmarks for search queries.

use campus_nav_geo::{GeoDataStore, Location, LocationId};
use campus_nav_search::SearchIndex;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn synthetic_locations(count: usize) -> Vec<Location> {
    let categories = ["Academic", "Food", "Hostel", "Sports", "Services"];
    (0..count)
        .map(|i| Location {
            id: LocationId::Number(i as u64),
            name: format!("Building {i}"),
            category: categories[i % categories.len()].to_string(),
            lat: 13.3210 + (i as f64 * 0.00001) % 0.014,
            lng: 77.1200 + (i as f64 * 0.00001) % 0.015,
        })
        .collect()
}

fn bench_bundled_keystrokes(c: &mut Criterion) {
    let store = GeoDataStore::bundled().expect("bundled data");
    let index = SearchIndex::new(store.locations());

    // Simulates typing "library" one keystroke at a time
    c.bench_function("bundled_keystrokes", |b| {
        b.iter(|| {
            for end in 1..="library".len() {
                black_box(index.query(black_box(&"library"[..end])));
            }
        })
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_scaling");

    for size in [100, 1_000, 10_000].iter() {
        let locations = synthetic_locations(*size);
        let index = SearchIndex::new(&locations);

        group.bench_with_input(BenchmarkId::new("category", size), size, |b, _| {
            b.iter(|| index.query(black_box("food")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bundled_keystrokes, bench_scaling);
criterion_main!(benches);
