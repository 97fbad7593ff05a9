//! Mapping throughput benchmarks.
//!
//! Compares the baseline name-keyed dispatch against the cached direct
//! setters over identical inputs.

use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldmap_core::{
    setter, FastMapper, FieldMapper, Mapper, MemoryReader, Record, RecordDescriptor,
};
use fieldmap_types::{FieldDescriptor, Value};

#[derive(Debug, Default)]
struct BenchRecord {
    id: i64,
    score: f64,
    label: String,
    active: bool,
    retries: i32,
}

impl Record for BenchRecord {
    fn descriptor() -> RecordDescriptor<Self> {
        RecordDescriptor::builder()
            .property(
                "id",
                FieldDescriptor::named("id"),
                setter(|r: &mut Self| &mut r.id),
            )
            .property(
                "score",
                FieldDescriptor::named("score"),
                setter(|r: &mut Self| &mut r.score),
            )
            .property(
                "label",
                FieldDescriptor::named("label"),
                setter(|r: &mut Self| &mut r.label),
            )
            .property(
                "active",
                FieldDescriptor::named("active"),
                setter(|r: &mut Self| &mut r.active),
            )
            .property(
                "retries",
                FieldDescriptor::named("retries").with_default(3),
                setter(|r: &mut Self| &mut r.retries),
            )
            .build()
    }
}

/// Builds a reader with `rows` rows; every third `retries` value is null
/// so the default path stays exercised.
fn build_reader(rows: usize) -> MemoryReader {
    let mut reader = MemoryReader::new(["id", "score", "label", "active", "retries"]);
    for i in 0..rows {
        let retries = if i % 3 == 0 {
            Value::Null
        } else {
            Value::I32(i as i32 % 10)
        };
        reader.push_row([
            Value::I64(i as i64),
            Value::F64(i as f64 * 0.5),
            Value::from(format!("row {}", i)),
            Value::Bool(i % 2 == 0),
            retries,
        ]);
    }
    reader
}

fn benchmark_dispatch_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_rows");

    for row_count in [100, 1_000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("by_name", row_count),
            row_count,
            |b, &rows| {
                let mapper = Mapper::new();
                b.iter(|| {
                    let mapped: Vec<BenchRecord> = mapper
                        .map(build_reader(rows))
                        .collect::<Result<_, _>>()
                        .unwrap();
                    black_box(mapped)
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("direct", row_count),
            row_count,
            |b, &rows| {
                let mapper = FastMapper::new();
                b.iter(|| {
                    let mapped: Vec<BenchRecord> = mapper
                        .map(build_reader(rows))
                        .collect::<Result<_, _>>()
                        .unwrap();
                    black_box(mapped)
                })
            },
        );
    }

    group.finish();
}

fn benchmark_cold_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("metadata_resolution");
    group.sample_size(50);

    // Fresh mapper per iteration: pays resolution plus one small map.
    group.bench_function("cold_cache", |b| {
        b.iter(|| {
            let mapper = FastMapper::new();
            let mapped: Vec<BenchRecord> = mapper
                .map(build_reader(1))
                .collect::<Result<_, _>>()
                .unwrap();
            black_box(mapped)
        })
    });

    // Shared mapper: resolution amortized away.
    let mapper = FastMapper::new();
    group.bench_function("warm_cache", |b| {
        b.iter(|| {
            let mapped: Vec<BenchRecord> = mapper
                .map(build_reader(1))
                .collect::<Result<_, _>>()
                .unwrap();
            black_box(mapped)
        })
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3));
    targets = benchmark_dispatch_strategies, benchmark_cold_resolution
);
criterion_main!(benches);
