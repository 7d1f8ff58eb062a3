//! Benchmarks comparing RankMap against std's BTreeMap.
//!
//! Run with: cargo bench
//!
//! BTreeMap has no rank index, so its rank numbers use `range(..k).count()`
//! and `iter().nth(r)`; they show what the spans buy.

use std::collections::BTreeMap;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_rankmap::RankMap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

type BenchMap = RankMap<u64, u64, SmallRng>;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn random_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..u64::MAX / 2)).collect()
}

fn filled(keys: &[u64]) -> BenchMap {
    let mut map = RankMap::with_capacity(SmallRng::seed_from_u64(12345), keys.len());
    for &k in keys {
        map.insert(k, k);
    }
    map
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in SIZES {
        let keys = random_keys(size, 1);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("rank_map", size), &keys, |b, keys| {
            let mut map: BenchMap = RankMap::with_capacity(SmallRng::seed_from_u64(7), size);
            b.iter(|| {
                for &k in keys {
                    black_box(map.insert(k, k));
                }
                map.clear();
            });
        });

        group.bench_with_input(BenchmarkId::new("btree_map", size), &keys, |b, keys| {
            let mut map = BTreeMap::new();
            b.iter(|| {
                for &k in keys {
                    black_box(map.insert(k, k));
                }
                map.clear();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Lookup
// ============================================================================

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for size in SIZES {
        let keys = random_keys(size, 2);
        let map = filled(&keys);
        let btree: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("rank_map", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(map.get(k));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("btree_map", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(btree.get(k));
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Rank
// ============================================================================

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [1_000, 10_000] {
        let keys = random_keys(size, 3);
        let map = filled(&keys);
        let btree: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
        let probes: Vec<u64> = keys.iter().step_by(10).copied().collect();
        group.throughput(Throughput::Elements(probes.len() as u64));

        group.bench_with_input(BenchmarkId::new("rank_map", size), &probes, |b, probes| {
            b.iter(|| {
                for k in probes {
                    black_box(map.rank(k));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("btree_map", size), &probes, |b, probes| {
            b.iter(|| {
                for k in probes {
                    black_box(btree.range(..*k).count());
                }
            });
        });
    }

    group.finish();
}

fn bench_get_by_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_by_rank");

    for size in [1_000, 10_000] {
        let keys = random_keys(size, 4);
        let map = filled(&keys);
        let len = map.len();
        group.throughput(Throughput::Elements((len / 10) as u64));

        group.bench_function(BenchmarkId::new("rank_map", size), |b| {
            b.iter(|| {
                for r in (0..len).step_by(10) {
                    black_box(map.get_by_rank(r));
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Erase
// ============================================================================

fn bench_insert_erase_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_erase_cycle");
    let keys = random_keys(10_000, 5);
    let mut map = filled(&keys);
    group.throughput(Throughput::Elements(1));

    group.bench_function("rank_map", |b| {
        let mut next = 0u64;
        b.iter(|| {
            let k = u64::MAX / 2 + next;
            next += 1;
            map.insert(k, k);
            black_box(map.erase(&k));
        });
    });

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");

    for size in SIZES {
        let map = filled(&random_keys(size, 6));
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(BenchmarkId::new("rank_map", size), |b| {
            b.iter(|| black_box(map.clone()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_get,
    bench_rank,
    bench_get_by_rank,
    bench_insert_erase_cycle,
    bench_clone,
);
criterion_main!(benches);
