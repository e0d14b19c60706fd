//! # Collector Benchmark
//!
//! Measures:
//! 1. Contended single-element appends vs. batched bulk appends
//! 2. The cost of the empty-sink storage takeover in `append_bulk`
//! 3. Cursor traversal with one and many consumers

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gather_core::{SyncReader, SyncWriter};
use std::hint::black_box;
use std::thread;

const ITEMS_PER_THREAD: usize = 10_000;

/// Every thread pushes one element per lock acquisition.
fn bench_contended_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_contended");

    for threads in [1, 4, 8] {
        group.throughput(Throughput::Elements((threads * ITEMS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::new("single", threads), &threads, |b, &threads| {
            b.iter(|| {
                let mut sink = Vec::new();
                {
                    let writer = SyncWriter::new(&mut sink);
                    thread::scope(|s| {
                        for _ in 0..threads {
                            let writer = &writer;
                            s.spawn(move || {
                                for i in 0..ITEMS_PER_THREAD {
                                    writer.append(black_box(i));
                                }
                            });
                        }
                    });
                }
                black_box(sink.len())
            });
        });
    }

    group.finish();
}

/// Every thread buffers locally and flushes in batches of 256.
fn bench_batched_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_batched");

    for threads in [1, 4, 8] {
        group.throughput(Throughput::Elements((threads * ITEMS_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::new("bulk_256", threads), &threads, |b, &threads| {
            b.iter(|| {
                let mut sink = Vec::new();
                {
                    let writer = SyncWriter::new(&mut sink);
                    thread::scope(|s| {
                        for _ in 0..threads {
                            let writer = &writer;
                            s.spawn(move || {
                                let mut batch = Vec::with_capacity(256);
                                for i in 0..ITEMS_PER_THREAD {
                                    batch.push(black_box(i));
                                    if batch.len() == 256 {
                                        writer.append_bulk(std::mem::replace(
                                            &mut batch,
                                            Vec::with_capacity(256),
                                        ));
                                    }
                                }
                                writer.append_bulk(batch);
                            });
                        }
                    });
                }
                black_box(sink.len())
            });
        });
    }

    group.finish();
}

/// First bulk append into an empty sink vs. into a non-empty one.
fn bench_bulk_takeover(c: &mut Criterion) {
    let mut group = c.benchmark_group("append_bulk_first_batch");
    let batch: Vec<u64> = (0..100_000).collect();

    group.bench_function("into_empty", |b| {
        b.iter(|| {
            let mut sink = Vec::new();
            SyncWriter::new(&mut sink).append_bulk(batch.clone());
            black_box(sink.len())
        });
    });

    group.bench_function("into_non_empty", |b| {
        b.iter(|| {
            let mut sink = vec![0];
            SyncWriter::new(&mut sink).append_bulk(batch.clone());
            black_box(sink.len())
        });
    });

    group.finish();
}

/// Draining a populated sequence through the atomic cursor.
fn bench_cursor_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_traversal");
    let items: Vec<u64> = (0..1_000_000).collect();
    group.throughput(Throughput::Elements(items.len() as u64));

    for consumers in [1, 4] {
        group.bench_with_input(
            BenchmarkId::new("consumers", consumers),
            &consumers,
            |b, &consumers| {
                b.iter(|| {
                    let reader = SyncReader::new(&items);
                    thread::scope(|s| {
                        for _ in 0..consumers {
                            let reader = &reader;
                            s.spawn(move || black_box(reader.claims().copied().sum::<u64>()));
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_contended_append,
    bench_batched_append,
    bench_bulk_takeover,
    bench_cursor_traversal
);
criterion_main!(benches);
