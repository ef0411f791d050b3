//! # Code Vectorizer
//!
//! Embeds a code string into the same 64-dim space as word vectors, so
//! coded sentences can be searched with the flat index.
//!
//! Each role owns an 8-dim slice (Entity 0-7, Concept 8-15, ... Quantity
//! 56-63). A code with id `n` fills its slice with `(n mod (i + 9)) / 8`
//! for slice position `i`; the whole vector is then normalized. Equal
//! (role, id) combinations always give equal vectors.

use crate::adapters::index::flat;
use crate::adapters::storage::VectorStore;
use crate::core::config::StoreConfig;
use crate::core::{math, EntryId, Metric, Vector, VECTOR_DIM};
use crate::ports::{ConfigResult, SearchResult, StoreResult};

use super::code::segments;

/// Width of each role's slice
pub const ROLE_SLICE: usize = VECTOR_DIM / 8;

/// Embed `code_string`.
///
/// Unrecognized segments are ignored; when a role appears more than once
/// its last code wins. A string with no valid codes maps to the zero
/// vector.
pub fn vectorize(code_string: &str) -> Vector {
    let mut dims = vec![0.0f32; VECTOR_DIM];

    for code in segments(code_string).flatten() {
        let base = code.role.index() * ROLE_SLICE;
        let id = code.id as usize;
        for (i, slot) in dims[base..base + ROLE_SLICE].iter_mut().enumerate() {
            *slot = (id % (i + 9)) as f32 / 8.0;
        }
    }

    math::normalize(&mut dims);
    Vector::new(dims)
}

/// Cosine similarity of two code strings' embeddings
pub fn code_similarity(a: &str, b: &str) -> f32 {
    math::cosine_similarity(vectorize(a).dims(), vectorize(b).dims())
}

/// A vector store keyed by code strings.
///
/// Keeps each coded sentence next to its embedding so a hit can be turned
/// back into words.
#[derive(Debug, Clone)]
pub struct CodeStore {
    store: VectorStore,
    /// Code string per store position
    codes: Vec<String>,
}

impl CodeStore {
    pub fn new(capacity: usize) -> ConfigResult<Self> {
        Ok(Self {
            store: VectorStore::new(StoreConfig::new(capacity).with_dimensionality(VECTOR_DIM))?,
            codes: Vec::new(),
        })
    }

    /// Vectorize `code_string` and store it under `id`
    pub fn add(&mut self, code_string: &str, id: EntryId) -> StoreResult<()> {
        self.store.add(&vectorize(code_string), id)?;
        self.codes.push(code_string.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.store.is_full()
    }

    pub fn vectors(&self) -> &VectorStore {
        &self.store
    }

    /// Code string stored under `id` (first match in insertion order)
    pub fn code_for(&self, id: EntryId) -> Option<&str> {
        self.store
            .iter()
            .position(|e| e.id == id)
            .map(|i| self.codes[i].as_str())
    }

    /// Stored (id, code string) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &str)> {
        self.store
            .iter()
            .zip(&self.codes)
            .map(|(e, c)| (e.id, c.as_str()))
    }

    pub fn search_nearest_cosine(&self, code_string: &str) -> Option<EntryId> {
        flat::search_nearest_cosine(&self.store, &vectorize(code_string))
    }

    pub fn search_nearest_euclidean(&self, code_string: &str) -> Option<EntryId> {
        flat::search_nearest_euclidean(&self.store, &vectorize(code_string))
    }

    pub fn search_top_k(&self, code_string: &str, k: usize, metric: Metric) -> Vec<SearchResult> {
        flat::search_top_k(&self.store, &vectorize(code_string), k, metric)
    }

    /// Top-K hits, each with the code string of the exact entry it matched
    pub fn search_codes(
        &self,
        code_string: &str,
        k: usize,
        metric: Metric,
    ) -> Vec<(SearchResult, &str)> {
        flat::search_top_k_ranked(&self.store, &vectorize(code_string), k, metric)
            .into_iter()
            .filter_map(|(pos, hit)| Some((hit, self.codes.get(pos)?.as_str())))
            .collect()
    }
}
