//! Construction and ordering-search benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench build
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bdd_order::expr::{BooleanFunction, Expression};
use bdd_order::ordering::VarOrder;
use bdd_order::search::SearchConfig;
use bdd_order::store::{NodeStore, StoreConfig};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build/identity");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for num_vars in [6, 8, 10, 12] {
        let f = Expression::random(&mut rng, num_vars, 3);
        let order = VarOrder::identity(f.num_vars());
        group.bench_with_input(BenchmarkId::new("vars", num_vars), &f, |b, f| {
            b.iter(|| {
                let store = NodeStore::default();
                let d = store.build(f, &order).unwrap();
                d.size()
            });
        });
    }

    group.finish();
}

fn bench_buckets(c: &mut Criterion) {
    let mut group = c.benchmark_group("build/buckets");
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let f = Expression::random(&mut rng, 10, 3);
    let order = VarOrder::identity(f.num_vars());

    for buckets in [101, 1_000, 10_000] {
        let config = StoreConfig::default().with_buckets(buckets);
        group.bench_with_input(BenchmarkId::new("buckets", buckets), &config, |b, config| {
            b.iter(|| {
                let store = NodeStore::new(config.clone());
                store.build(&f, &order).unwrap().size()
            });
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for text in ["AD+BE+CF", "AE+BF+CG+DH"] {
        group.bench_function(text, |b| {
            b.iter(|| {
                let mut store = NodeStore::default();
                let config = SearchConfig::default().with_seed(1);
                store.create_with_search(text, &config).unwrap().size()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_buckets, bench_search);
criterion_main!(benches);
