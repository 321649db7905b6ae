//! Benchmarks for the aggregation hot path.

use analytics_core::{aggregate, DatasetStore, Dimension, FilterState, GroupBy, Metric, SalesRecord};
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const PRODUCTS: [&str; 3] = ["Widget", "Gadget", "Gizmo"];

fn create_store(size: usize) -> DatasetStore {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let sales = (0..size)
        .map(|i| SalesRecord {
            date: start.checked_add_days(Days::new((i % 1095) as u64)).unwrap(),
            region: REGIONS[i % REGIONS.len()].to_string(),
            product: PRODUCTS[i % PRODUCTS.len()].to_string(),
            segment: Some(if i % 2 == 0 { "SMB" } else { "Enterprise" }.to_string()),
            revenue: 100.0 + (i as f64 * 0.3).sin() * 25.0,
            units: (i % 7) as u32 + 1,
            discount: 0.05,
        })
        .collect();
    DatasetStore::new(sales, Vec::new())
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("Aggregate");

    for size in [10_000, 100_000].iter() {
        let store = create_store(*size);
        let filter = FilterState::new().with_values(Dimension::Region, ["West", "East"]);

        group.bench_with_input(BenchmarkId::new("period", size), &store, |b, store| {
            b.iter(|| aggregate(black_box(store), black_box(&filter), GroupBy::Period, Metric::Revenue))
        });

        group.bench_with_input(BenchmarkId::new("product", size), &store, |b, store| {
            b.iter(|| aggregate(black_box(store), black_box(&filter), GroupBy::Product, Metric::AverageSale))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
