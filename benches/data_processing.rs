//! Benchmarks for log decoding and statistics
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sensorlog_rs::codec;
use sensorlog_rs::store::ReadingStore;
use sensorlog_rs::types::Reading;

fn synthetic_log(lines: usize) -> String {
    let base = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    let mut out = codec::encode_header();
    for i in 0..lines {
        let reading = Reading::new(
            base + chrono::Duration::seconds(i as i64),
            20.0 + (i as f64 * 0.1).sin() * 10.0,
            1010.0 + (i as f64 * 0.05).cos() * 20.0,
        );
        out.push_str(&codec::encode_reading(&reading));
    }
    out
}

fn bench_line_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_decode");

    let line = "2024-01-15T10:30:00,23.4567,1013.250,frame_20240115_103000.jpg";
    group.throughput(Throughput::Elements(1));
    group.bench_function("decode_reading", |b| {
        b.iter(|| codec::decode_reading(black_box(line)).unwrap());
    });

    let reading = codec::decode_reading(line).unwrap();
    group.bench_function("encode_reading", |b| {
        b.iter(|| codec::encode_reading(black_box(&reading)));
    });

    group.finish();
}

fn bench_bulk_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk_load");

    for size in [1000, 10_000, 100_000].iter() {
        let log = synthetic_log(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("from_lines", size), &log, |b, log| {
            b.iter(|| ReadingStore::from_lines(black_box(log.lines())).unwrap());
        });
    }

    group.finish();
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in [1000, 10_000, 100_000].iter() {
        let store = ReadingStore::from_lines(synthetic_log(*size).lines()).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("summary", size), &store, |b, store| {
            b.iter(|| black_box(store.statistics()));
        });
    }

    group.finish();
}

fn bench_range_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_scan");

    let store = ReadingStore::from_lines(synthetic_log(100_000).lines()).unwrap();
    let start = codec::parse_timestamp("2024-01-15T12:00:00").unwrap();
    let end = codec::parse_timestamp("2024-01-15T13:00:00").unwrap();

    group.bench_function("range_1h_of_24h", |b| {
        b.iter(|| black_box(store.range(start, end).count()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_line_decode,
    bench_bulk_load,
    bench_statistics,
    bench_range_scan,
);

criterion_main!(benches);
