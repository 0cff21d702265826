//! Benchmarks comparing nexus-list against std's LinkedList and VecDeque.
//!
//! Run with: cargo bench -p nexus-list
//!
//! Every container starts empty and is refilled per iteration, so each
//! variant pays its own allocation costs.

use std::collections::{LinkedList, VecDeque};
use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use nexus_list::List;

const COUNT: usize = 10_000;

// ============================================================================
// Push Benchmarks
// ============================================================================

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.throughput(Throughput::Elements(COUNT as u64));

    let mut nexus = List::new();
    let mut linked = LinkedList::new();
    let mut deque = VecDeque::new();

    group.bench_function("nexus-list", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                nexus.push_back(black_box(i));
            }
            nexus.clear();
        });
    });

    group.bench_function("std/LinkedList", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                linked.push_back(black_box(i));
            }
            linked.clear();
        });
    });

    group.bench_function("std/VecDeque", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                deque.push_back(black_box(i));
            }
            deque.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Pop Benchmarks
// ============================================================================

fn bench_push_pop_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop_front");
    group.throughput(Throughput::Elements(COUNT as u64));

    let mut nexus = List::new();
    let mut linked = LinkedList::new();
    let mut deque = VecDeque::new();

    group.bench_function("nexus-list", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                nexus.push_back(i);
            }
            while let Ok(v) = nexus.pop_front() {
                black_box(v);
            }
        });
    });

    group.bench_function("std/LinkedList", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                linked.push_back(i);
            }
            while let Some(v) = linked.pop_front() {
                black_box(v);
            }
        });
    });

    group.bench_function("std/VecDeque", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                deque.push_back(i);
            }
            while let Some(v) = deque.pop_front() {
                black_box(v);
            }
        });
    });

    group.finish();
}

// ============================================================================
// Iteration Benchmarks
// ============================================================================

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(COUNT as u64));

    let nexus: List<u64> = (0..COUNT as u64).collect();
    let linked: LinkedList<u64> = (0..COUNT as u64).collect();
    let deque: VecDeque<u64> = (0..COUNT as u64).collect();

    group.bench_function("nexus-list/iter", |b| {
        b.iter(|| black_box(nexus.iter().sum::<u64>()));
    });

    group.bench_function("nexus-list/cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut cursor = nexus.begin();
            while let Ok(v) = cursor.get() {
                sum += *v;
                cursor.move_next();
            }
            black_box(sum)
        });
    });

    group.bench_function("std/LinkedList", |b| {
        b.iter(|| black_box(linked.iter().sum::<u64>()));
    });

    group.bench_function("std/VecDeque", |b| {
        b.iter(|| black_box(deque.iter().sum::<u64>()));
    });

    group.finish();
}

// ============================================================================
// Middle Removal Benchmarks
// ============================================================================

fn bench_remove_if(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_if_half");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("nexus-list", |b| {
        b.iter_batched(
            || (0..COUNT as u64).collect::<List<u64>>(),
            |mut list| black_box(list.remove_if(|v| v % 2 == 0)),
            criterion::BatchSize::LargeInput,
        );
    });

    // LinkedList has no stable in-place filter
    group.bench_function("std/LinkedList", |b| {
        b.iter_batched(
            || (0..COUNT as u64).collect::<LinkedList<u64>>(),
            |list| {
                let kept: LinkedList<u64> = list.into_iter().filter(|v| v % 2 != 0).collect();
                black_box(kept.len())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("std/VecDeque", |b| {
        b.iter_batched(
            || (0..COUNT as u64).collect::<VecDeque<u64>>(),
            |mut deque| {
                deque.retain(|v| v % 2 != 0);
                black_box(deque.len())
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_pop_front,
    bench_iterate,
    bench_remove_if,
);

criterion_main!(benches);
