//! Top-K and single-nearest search over a full 25 000-entry store.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use dna_retrieval::adapters::persist::random_vector;
use dna_retrieval::{
    search_nearest_cosine, search_top_k, vectorize, Metric, VectorStore, MAX_CAPACITY, VECTOR_DIM,
};

fn full_store() -> VectorStore {
    let mut rng = StdRng::seed_from_u64(0xD1A);
    let mut store = VectorStore::with_capacity(MAX_CAPACITY).unwrap();
    for id in 0..MAX_CAPACITY {
        store.add(&random_vector(&mut rng, VECTOR_DIM), id as i64).unwrap();
    }
    store
}

fn bench_search(c: &mut Criterion) {
    let store = full_store();
    let mut rng = StdRng::seed_from_u64(7);
    let query = random_vector(&mut rng, VECTOR_DIM);

    c.bench_function("nearest_cosine_25k", |b| {
        b.iter(|| search_nearest_cosine(black_box(&store), black_box(&query)))
    });

    for metric in [Metric::Cosine, Metric::Euclidean] {
        c.bench_function(&format!("top10_{}_25k", metric.as_str()), |b| {
            b.iter(|| search_top_k(black_box(&store), black_box(&query), 10, metric))
        });
    }

    c.bench_function("vectorize_extended", |b| {
        b.iter(|| vectorize(black_box("E12C34R56A07T08L09M10Q11")))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
