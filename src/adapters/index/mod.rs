//! # Index Adapters
//!
//! Search strategies over a [`VectorStore`](crate::VectorStore).
//!
//! Available adapters:
//! - `flat` - exhaustive scan, exact results, single-best and top-K

pub mod flat;

pub use flat::{
    query_tokens, search_hybrid, search_nearest, search_nearest_cosine,
    search_nearest_euclidean, search_top_k, search_top_k_ranked, Ranked,
    HYBRID_KEYWORD_WEIGHT, HYBRID_VECTOR_WEIGHT,
};
