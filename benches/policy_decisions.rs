// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for toast admission.
//!
//! Measures the performance of:
//! - Policy decisions against a full queue (worst-case scan)
//! - Coalescing cache lookups and pruning

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::VecDeque;
use std::hint::black_box;
use std::time::{Duration, Instant};

use agora_toast::domain::toast::{
    ActiveSlot, CoalescingCache, DecisionContext, Priority, ToastId, ToastItem, ToastPolicy,
};

fn build_queue(size: usize) -> VecDeque<ToastItem> {
    (0..size)
        .map(|n| ToastItem::info(format!("queued {n}")).with_dedupe_key(format!("key-{n}")))
        .collect()
}

/// Benchmark decisions for the common admission outcomes.
fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_decide");
    let now = Instant::now();

    for size in [10usize, 100, 1000] {
        let policy = ToastPolicy::builder().max_queue_size(size).build().unwrap();
        let queued = build_queue(size.saturating_sub(1));
        let mut cache = CoalescingCache::new();
        for item in &queued {
            if let Some(key) = item.dedupe_key() {
                cache.record(key, item.id(), now);
            }
        }
        let active = ActiveSlot::Presenting {
            id: ToastId::new(),
            priority: Priority::Normal,
        };
        let ctx = DecisionContext {
            now,
            active,
            queued: &queued,
            restoring: &[],
            cache: &cache,
            last_presentation: Some(now - Duration::from_millis(100)),
            suspended: false,
        };

        // Merge target sits at the back of the queue.
        let last_key = format!("key-{}", size.saturating_sub(2));
        let merging = ToastItem::info("update").with_dedupe_key(last_key);
        group.bench_with_input(BenchmarkId::new("merge", size), &merging, |b, item| {
            b.iter(|| black_box(policy.decide(black_box(item), &ctx)));
        });

        let fresh = ToastItem::info("fresh");
        group.bench_with_input(BenchmarkId::new("enqueue", size), &fresh, |b, item| {
            b.iter(|| black_box(policy.decide(black_box(item), &ctx)));
        });

        let critical = ToastItem::error("critical").with_priority(Priority::Critical);
        group.bench_with_input(BenchmarkId::new("preempt", size), &critical, |b, item| {
            b.iter(|| black_box(policy.decide(black_box(item), &ctx)));
        });
    }

    group.finish();
}

/// Benchmark cache maintenance performed on every `show`.
fn bench_coalescing_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("coalescing_cache");
    let window = Duration::from_secs(2);
    let start = Instant::now();

    group.bench_function("record_and_lookup", |b| {
        let mut cache = CoalescingCache::new();
        let id = ToastId::new();
        b.iter(|| {
            cache.record(black_box("net-error"), id, start);
            black_box(cache.lookup("net-error", start, window));
        });
    });

    group.bench_function("prune_half_expired_1000", |b| {
        b.iter_batched(
            || {
                let mut cache = CoalescingCache::new();
                for n in 0..1000u64 {
                    let recorded_at = if n % 2 == 0 {
                        start
                    } else {
                        start + Duration::from_secs(5)
                    };
                    cache.record(&format!("key-{n}"), ToastId::new(), recorded_at);
                }
                cache
            },
            |mut cache| {
                cache.prune(start + Duration::from_secs(6), window);
                black_box(cache.len())
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_decide, bench_coalescing_cache);
criterion_main!(benches);
