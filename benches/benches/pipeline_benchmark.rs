//! Resampling and feature benchmarks.
//!
//! Run with: `cargo bench --package marketmint-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use marketmint_bench::hourly_series;
use marketmint_lib::{
    CsvFormatter, Formatter, Frequency, compute_features, reaggregate_weekly, resample_daily,
};
use std::hint::black_box;

const SPANS: [usize; 3] = [90, 365, 1825];

fn resample_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    for days in SPANS {
        let series = hourly_series(days);
        group.throughput(Throughput::Elements(series.prices.len() as u64));

        group.bench_with_input(BenchmarkId::new("daily", days), &series, |b, series| {
            b.iter(|| resample_daily(black_box(series)));
        });

        let daily = resample_daily(&series);
        group.bench_with_input(BenchmarkId::new("weekly", days), &daily, |b, daily| {
            b.iter(|| reaggregate_weekly(black_box(daily)));
        });
    }

    group.finish();
}

fn features_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("features");

    for days in SPANS {
        let daily = resample_daily(&hourly_series(days));
        group.throughput(Throughput::Elements(daily.len() as u64));

        group.bench_with_input(BenchmarkId::new("daily", days), &daily, |b, daily| {
            b.iter(|| compute_features(black_box(daily), Frequency::Daily));
        });
    }

    group.finish();
}

fn csv_benchmark(c: &mut Criterion) {
    let daily = resample_daily(&hourly_series(1825));
    let table = compute_features(&daily, Frequency::Daily);
    let formatter = CsvFormatter::new();

    c.bench_function("csv/write_1825_days", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(256 * 1024);
            formatter.write_table(black_box(&table), &mut buf).unwrap();
            buf
        });
    });
}

criterion_group!(benches, resample_benchmark, features_benchmark, csv_benchmark);
criterion_main!(benches);
