//! # Flat Search
//!
//! Exhaustive nearest-neighbor search over a [`VectorStore`].
//!
//! Every query scans the whole store in insertion order. At the sizes this
//! store is built for (25 000 vectors of 64 dims, K <= 10) a linear scan
//! keeps results exact and costs O(n * k).
//!
//! Ties always go to the entry seen first in scan order.
//!
//! All searches are total: an empty store or an empty query gives `None`
//! or an empty list.

use tracing::trace;

use crate::adapters::storage::VectorStore;
use crate::core::{EntryId, Metric, Vector};
use crate::ports::{KeywordScorer, SearchResult};

/// Weight of the cosine score in a hybrid search
pub const HYBRID_VECTOR_WEIGHT: f32 = 0.7;

/// Weight of the keyword score in a hybrid search
pub const HYBRID_KEYWORD_WEIGHT: f32 = 0.3;

/// Most query tokens a hybrid search looks at
pub const MAX_QUERY_TOKENS: usize = 20;

/// NaN never wins a comparison
fn score(metric: Metric, query: &Vector, candidate: &Vector) -> f32 {
    let s = metric.score(query.dims(), candidate.dims());
    if s.is_nan() {
        f32::NEG_INFINITY
    } else {
        s
    }
}

/// Single best entry under `metric`, with its score
pub fn search_nearest(store: &VectorStore, query: &Vector, metric: Metric) -> Option<SearchResult> {
    if query.dims().is_empty() {
        return None;
    }

    let mut best: Option<SearchResult> = None;
    for entry in store {
        let s = score(metric, query, &entry.vector);
        match best {
            Some(b) if s <= b.score => {}
            _ => best = Some(SearchResult::new(entry.id, s)),
        }
    }
    best
}

/// Id of the entry closest to `query` by straight-line distance
pub fn search_nearest_euclidean(store: &VectorStore, query: &Vector) -> Option<EntryId> {
    search_nearest(store, query, Metric::Euclidean).map(|r| r.id)
}

/// Id of the entry most similar to `query` by cosine
pub fn search_nearest_cosine(store: &VectorStore, query: &Vector) -> Option<EntryId> {
    search_nearest(store, query, Metric::Cosine).map(|r| r.id)
}

/// Re-rank the last slot after it was overwritten.
///
/// The newcomer was scanned after every current candidate, so it goes
/// behind any equal score.
fn sift_last(results: &mut [Ranked]) {
    let mut i = results.len().saturating_sub(1);
    while i > 0 && results[i].1.score > results[i - 1].1.score {
        results.swap(i, i - 1);
        i -= 1;
    }
}

/// A hit paired with the store position it came from
pub type Ranked = (usize, SearchResult);

/// The `k` highest-scoring entries, best first, with their store positions.
///
/// Ids need not be unique; the position identifies the exact entry.
pub fn search_top_k_ranked(
    store: &VectorStore,
    query: &Vector,
    k: usize,
    metric: Metric,
) -> Vec<Ranked> {
    let k = k.min(store.config().max_results).min(store.size());
    if k == 0 || query.dims().is_empty() {
        return Vec::new();
    }

    let entries = store.entries();

    let mut results: Vec<Ranked> = entries[..k]
        .iter()
        .enumerate()
        .map(|(pos, e)| (pos, SearchResult::new(e.id, score(metric, query, &e.vector))))
        .collect();
    // stable: equal scores keep scan order
    results.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));

    for (pos, entry) in entries.iter().enumerate().skip(k) {
        let s = score(metric, query, &entry.vector);
        if s > results[k - 1].1.score {
            results[k - 1] = (pos, SearchResult::new(entry.id, s));
            sift_last(&mut results);
        }
    }

    trace!(metric = metric.as_str(), k, scanned = entries.len(), "top-k search");
    results
}

/// The `k` highest-scoring entries, best first.
///
/// `k` is clamped to the store's `max_results` and to its size.
pub fn search_top_k(
    store: &VectorStore,
    query: &Vector,
    k: usize,
    metric: Metric,
) -> Vec<SearchResult> {
    search_top_k_ranked(store, query, k, metric)
        .into_iter()
        .map(|(_, hit)| hit)
        .collect()
}

/// Split a free-text query into keyword tokens
pub fn query_tokens(query_text: &str) -> Vec<&str> {
    query_text
        .split(|c: char| matches!(c, ' ' | ',' | '.' | '\u{3000}' | '、' | '。'))
        .filter(|t| !t.is_empty())
        .take(MAX_QUERY_TOKENS)
        .collect()
}

/// Cosine top-K blended with keyword relevance.
///
/// Each hit's score becomes `0.7 * cosine + 0.3 * keyword`, with the
/// keyword score clamped to [0, 1], and the list is re-sorted. A blank
/// query text leaves the cosine ranking untouched.
pub fn search_hybrid(
    store: &VectorStore,
    query_vector: &Vector,
    query_text: &str,
    k: usize,
    scorer: &dyn KeywordScorer,
) -> Vec<SearchResult> {
    let mut results = search_top_k(store, query_vector, k, Metric::Cosine);

    let tokens = query_tokens(query_text);
    if tokens.is_empty() {
        return results;
    }

    for hit in results.iter_mut() {
        let keyword = scorer.score(hit.id, &tokens);
        let keyword = if keyword.is_nan() { 0.0 } else { keyword.clamp(0.0, 1.0) };
        hit.score = HYBRID_VECTOR_WEIGHT * hit.score + HYBRID_KEYWORD_WEIGHT * keyword;
    }
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::StoreConfig;

    fn store_3d(points: &[(EntryId, [f32; 3])]) -> VectorStore {
        let mut store =
            VectorStore::new(StoreConfig::new(64).with_dimensionality(3)).unwrap();
        for (id, p) in points {
            store.add(&Vector::new(p.to_vec()), *id).unwrap();
        }
        store
    }

    #[test]
    fn test_nearest_on_empty_store() {
        let store = store_3d(&[]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        assert_eq!(search_nearest_euclidean(&store, &q), None);
        assert_eq!(search_nearest_cosine(&store, &q), None);
        assert!(search_top_k(&store, &q, 5, Metric::Cosine).is_empty());
    }

    #[test]
    fn test_nearest_with_empty_query() {
        let store = store_3d(&[(1, [1.0, 0.0, 0.0])]);
        let q = Vector::new(vec![]);

        assert_eq!(search_nearest_cosine(&store, &q), None);
        assert!(search_top_k(&store, &q, 3, Metric::Euclidean).is_empty());
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let store = store_3d(&[(5, [1.0, 0.0, 0.0]), (6, [1.0, 0.0, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        assert_eq!(search_nearest_euclidean(&store, &q), Some(5));
        assert_eq!(search_nearest_cosine(&store, &q), Some(5));
    }

    #[test]
    fn test_nearest_cosine_accepts_opposite_vector() {
        let store = store_3d(&[(9, [-1.0, 0.0, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        assert_eq!(search_nearest_cosine(&store, &q), Some(9));
    }

    #[test]
    fn test_metrics_can_disagree() {
        // Same direction but far away vs. off-axis but close
        let store = store_3d(&[(1, [10.0, 0.0, 0.0]), (2, [0.8, 0.6, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        assert_eq!(search_nearest_cosine(&store, &q), Some(1));
        assert_eq!(search_nearest_euclidean(&store, &q), Some(2));
    }

    #[test]
    fn test_top_k_sorted_and_dominating() {
        let points: Vec<(EntryId, [f32; 3])> = (0..20)
            .map(|i| {
                let t = i as f32 * 0.3;
                (i as EntryId, [t.cos(), t.sin(), (i % 3) as f32 * 0.1])
            })
            .collect();
        let store = store_3d(&points);
        let q = Vector::new(vec![0.2, 0.9, 0.1]);

        let results = search_top_k(&store, &q, 5, Metric::Cosine);
        assert_eq!(results.len(), 5);

        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }

        let worst = results[4].score;
        for entry in store.iter() {
            if results.iter().all(|r| r.id != entry.id) {
                assert!(Metric::Cosine.score(q.dims(), entry.vector.dims()) <= worst);
            }
        }
    }

    #[test]
    fn test_top_k_euclidean_orders_by_distance() {
        let store = store_3d(&[
            (1, [3.0, 0.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [2.0, 0.0, 0.0]),
        ]);
        let q = Vector::new(vec![0.0, 0.0, 0.0]);

        let results = search_top_k(&store, &q, 3, Metric::Euclidean);
        let ids: Vec<_> = results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert!((results[0].score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_top_k_clamps_k() {
        let points: Vec<(EntryId, [f32; 3])> =
            (0..30).map(|i| (i, [i as f32, 1.0, 0.0])).collect();
        let store = store_3d(&points);
        let q = Vector::new(vec![1.0, 1.0, 0.0]);

        assert_eq!(search_top_k(&store, &q, 50, Metric::Cosine).len(), 10);
        assert!(search_top_k(&store, &q, 0, Metric::Cosine).is_empty());

        let small = store_3d(&[(1, [1.0, 0.0, 0.0]), (2, [0.0, 1.0, 0.0])]);
        assert_eq!(search_top_k(&small, &q, 5, Metric::Cosine).len(), 2);
    }

    #[test]
    fn test_top_k_ties_keep_scan_order() {
        let store = store_3d(&[
            (1, [0.0, 1.0, 0.0]),
            (2, [1.0, 0.0, 0.0]),
            (3, [1.0, 0.0, 0.0]),
            (4, [1.0, 0.0, 0.0]),
        ]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        let ids: Vec<_> = search_top_k(&store, &q, 2, Metric::Cosine)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_ranked_positions_tell_duplicate_ids_apart() {
        let store = store_3d(&[(1, [0.0, 1.0, 0.0]), (1, [1.0, 0.0, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        let ranked = search_top_k_ranked(&store, &q, 2, Metric::Cosine);
        let positions: Vec<_> = ranked.iter().map(|(pos, _)| *pos).collect();
        assert_eq!(positions, vec![1, 0]);
        assert!(ranked.iter().all(|(_, hit)| hit.id == 1));
    }

    #[test]
    fn test_query_tokens() {
        assert_eq!(query_tokens("猫 が,好き.です"), vec!["猫", "が", "好き", "です"]);
        assert_eq!(query_tokens("東京、大阪。"), vec!["東京", "大阪"]);
        assert!(query_tokens("  , . ").is_empty());

        let long = vec!["w"; 30].join(" ");
        assert_eq!(query_tokens(&long).len(), MAX_QUERY_TOKENS);
    }

    #[test]
    fn test_hybrid_reranks_by_keyword() {
        let store = store_3d(&[(1, [1.0, 0.0, 0.0]), (2, [0.9, 0.1, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        let scorer = |id: EntryId, _tokens: &[&str]| if id == 2 { 1.0f32 } else { 0.0 };
        let results = search_hybrid(&store, &q, "猫", 2, &scorer);

        assert_eq!(results[0].id, 2);
        let cos2 = Metric::Cosine.score(q.dims(), &[0.9, 0.1, 0.0]);
        assert!((results[0].score - (0.7 * cos2 + 0.3)).abs() < 1e-5);
        assert!((results[1].score - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_hybrid_blank_text_is_plain_cosine() {
        let store = store_3d(&[(1, [1.0, 0.0, 0.0]), (2, [0.0, 1.0, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        let scorer = |_: EntryId, _: &[&str]| 1.0f32;
        let hybrid = search_hybrid(&store, &q, " ", 2, &scorer);
        let plain = search_top_k(&store, &q, 2, Metric::Cosine);

        assert_eq!(hybrid, plain);
    }

    #[test]
    fn test_hybrid_clamps_keyword_score() {
        let store = store_3d(&[(1, [1.0, 0.0, 0.0])]);
        let q = Vector::new(vec![1.0, 0.0, 0.0]);

        let scorer = |_: EntryId, _: &[&str]| 5.0f32;
        let results = search_hybrid(&store, &q, "x", 1, &scorer);

        assert!((results[0].score - 1.0).abs() < 1e-5);
    }
}
