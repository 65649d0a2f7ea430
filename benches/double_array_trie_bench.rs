//! Benchmarks for the double-array trie.
//!
//! Compares construction and lookup against `HashMap` and `BTreeMap`
//! baselines on dense and sparse synthetic key sets, and measures the
//! prefix and scan operations on their own.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::collections::{BTreeMap, HashMap};

use datrie::DoubleArrayTrie;

fn generate_dense_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key_{:06}", i)).collect()
}

fn generate_sparse_keys(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let h = (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            format!("item_{:016x}", h)
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    for &size in &[1_000usize, 10_000] {
        let keys = generate_dense_keys(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("dat_dense_{}", size), |b| {
            b.iter(|| DoubleArrayTrie::build(black_box(&keys)))
        });

        let sparse = generate_sparse_keys(size);
        group.bench_function(format!("dat_sparse_{}", size), |b| {
            b.iter(|| DoubleArrayTrie::build(black_box(&sparse)))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let keys = generate_dense_keys(10_000);
    let trie = DoubleArrayTrie::build(&keys);
    let hash_map: HashMap<&str, usize> = keys.iter().map(|k| k.as_str()).zip(0..).collect();
    let btree_map: BTreeMap<&str, usize> = keys.iter().map(|k| k.as_str()).zip(0..).collect();

    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(keys.len() as u64));

    group.bench_function("dat_contains", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(trie.contains(black_box(key)));
            }
        })
    });
    group.bench_function("hashmap_get", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(hash_map.get(black_box(key.as_str())));
            }
        })
    });
    group.bench_function("btreemap_get", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(btree_map.get(black_box(key.as_str())));
            }
        })
    });
    group.finish();
}

fn bench_prefix_operations(c: &mut Criterion) {
    let keys = generate_dense_keys(10_000);
    let trie = DoubleArrayTrie::build(&keys);

    let mut group = c.benchmark_group("prefix");
    group.bench_function("contains_prefix", |b| {
        b.iter(|| black_box(trie.contains_prefix(black_box("key_0042"))))
    });
    group.bench_function("common_prefixes", |b| {
        b.iter(|| black_box(trie.common_prefixes(black_box("key_004299"))))
    });
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let words = ["rust", "trust", "crust", "rustic", "thrust"];
    let trie = DoubleArrayTrie::build(words);
    let text = "in rust we trust; the crust was rustic and the thrust held".repeat(16);

    let mut group = c.benchmark_group("scan");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("scan_text", |b| {
        b.iter(|| black_box(trie.scan(black_box(&text))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_lookup,
    bench_prefix_operations,
    bench_scan
);
criterion_main!(benches);
