use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use serde_json::json;
use tabledb::TableStore;

fn bench_add_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_row");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_small_row", |b| {
        let store = TableStore::new();
        store.create_table("bench");

        let mut counter = 0u64;
        b.iter(|| {
            counter += 1;
            black_box(
                store
                    .add_row("bench", &counter.to_string(), json!({"n": counter}))
                    .unwrap(),
            );
        });
    });

    group.finish();
}

fn bench_get_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_row");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_by_id", |b| {
        let store = TableStore::new();
        store.create_table("bench");
        for i in 0..1000u64 {
            store
                .add_row("bench", &i.to_string(), json!({"n": i}))
                .unwrap();
        }

        let mut counter = 0usize;
        b.iter(|| {
            black_box(store.row("bench", &(counter % 1000).to_string()).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_paginate(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginate");
    group.sample_size(50);
    group.throughput(Throughput::Elements(100));

    group.bench_function("page_of_100", |b| {
        let store = TableStore::new();
        store.create_table("bench");
        for i in 0..1000u64 {
            store
                .add_row("bench", &i.to_string(), json!({"n": i}))
                .unwrap();
        }

        let mut counter = 0usize;
        b.iter(|| {
            black_box(store.rows("bench", (counter * 100) % 1000, 100).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_add_row, bench_get_row, bench_paginate);
criterion_main!(benches);
