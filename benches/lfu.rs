use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use freqcache::policy::lfu::LfuCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x5eed_cafe;

fn warm_cache(capacity: usize) -> LfuCache<u64, u64> {
    let mut cache = LfuCache::new(capacity);
    for i in 0..capacity as u64 {
        cache.insert(i, i);
    }
    cache
}

fn bench_insert_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    let ops_per_iter = 1024u64 * 2;
    group.throughput(Throughput::Elements(ops_per_iter));
    group.bench_function("insert_get", |b| {
        b.iter_batched(
            || warm_cache(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.insert(black_box(i + 10_000), i);
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_get_hotset(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu");
    group.throughput(Throughput::Elements(4096));
    group.bench_function("get_hotset", |b| {
        b.iter_batched(
            || warm_cache(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = black_box(cache.get(&black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_eviction_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_eviction_churn");
    for &capacity in &[256usize, 1024, 4096, 16384] {
        let inserts = capacity * 4;
        group.throughput(Throughput::Elements(inserts as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter_batched(
                    || warm_cache(capacity),
                    |mut cache| {
                        for i in 0..inserts as u64 {
                            cache.insert(black_box(1_000_000 + i), i);
                        }
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_bulk_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_bulk_evict");
    for &n in &[1usize, 64, 1024] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || {
                    let mut cache = warm_cache(4096);
                    for i in (0..4096u64).step_by(3) {
                        cache.get(&i);
                    }
                    cache
                },
                |mut cache| black_box(cache.evict(black_box(n))),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_skewed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_workload");
    let ops = 8192usize;
    group.throughput(Throughput::Elements(ops as u64));
    group.bench_function("hot_cold_mix", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(SEED);
                let keys: Vec<u64> = (0..ops)
                    .map(|_| {
                        if rng.gen_bool(0.8) {
                            rng.gen_range(0..128)
                        } else {
                            rng.gen_range(128..16_384)
                        }
                    })
                    .collect();
                (LfuCache::new(1024), keys)
            },
            |(mut cache, keys)| {
                let mut hits = 0u64;
                for key in keys {
                    if cache.get(&key).is_some() {
                        hits += 1;
                    } else {
                        cache.insert(key, key);
                    }
                }
                black_box(hits)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_get,
    bench_get_hotset,
    bench_eviction_churn,
    bench_bulk_evict,
    bench_skewed_workload
);
criterion_main!(benches);
