// Copyright (c) 2025 the slot-alloc contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use slot_alloc_core::index::SlotIndex;
use slot_alloc_tracker::FreeIndexTracker;
use std::hint::black_box;

#[derive(Clone, Copy)]
enum OpKind {
    Reserve,
    Release,
}

#[derive(Clone, Copy)]
struct Op {
    kind: OpKind,
    index: u64,
}

fn gen_ops(size: u64, n: usize, rng: &mut impl Rng) -> Vec<Op> {
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let index = rng.random_range(0..size);
        let kind = if i % 2 == 0 {
            OpKind::Reserve
        } else {
            OpKind::Release
        };
        out.push(Op { kind, index });
    }
    out
}

fn half_reserved(size: u64, rng: &mut impl Rng) -> FreeIndexTracker {
    let mut tracker = FreeIndexTracker::new(SlotIndex::new(0), SlotIndex::new(size - 1));
    let mut reserved = 0;
    while reserved < size / 2 {
        if tracker.reserve(SlotIndex::new(rng.random_range(0..size))) {
            reserved += 1;
        }
    }
    tracker
}

fn bench_mixed_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_mixed_ops");
    for size in [1u64 << 10, 1 << 16] {
        let mut rng = ChaCha8Rng::seed_from_u64(0xC0FFEE);
        let ops = gen_ops(size, 4096, &mut rng);
        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ops, |b, ops| {
            b.iter_batched(
                || FreeIndexTracker::new(SlotIndex::new(0), SlotIndex::new(size - 1)),
                |mut tracker| {
                    for op in ops {
                        let ix = SlotIndex::new(op.index);
                        match op.kind {
                            OpKind::Reserve => {
                                black_box(tracker.reserve(ix));
                            }
                            OpKind::Release => {
                                black_box(tracker.release(ix));
                            }
                        }
                    }
                    tracker
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_reserve_first_free_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_reserve_first_free_drain");
    for size in [1u64 << 10, 1 << 16] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || FreeIndexTracker::new(SlotIndex::new(0), SlotIndex::new(size - 1)),
                |mut tracker| {
                    while let Some(ix) = tracker.reserve_first_free() {
                        black_box(ix);
                    }
                    tracker
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_nearest_free_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_nearest_free");
    for size in [1u64 << 10, 1 << 16] {
        let mut rng = ChaCha8Rng::seed_from_u64(0xBEEF);
        let tracker = half_reserved(size, &mut rng);
        let queries: Vec<u64> = (0..4096).map(|_| rng.random_range(0..size)).collect();
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(tracker, queries),
            |b, (tracker, queries)| {
                b.iter(|| {
                    for &q in queries {
                        black_box(tracker.nearest_free(SlotIndex::new(q)));
                    }
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_mixed_ops,
    bench_reserve_first_free_drain,
    bench_nearest_free_queries
);
criterion_main!(benches);
