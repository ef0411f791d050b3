//! # Configuration
//!
//! Store limits (capacity, width, K) are explicit, validated parameters.
//! [`RetrievalConfig`] adds the file locations the [`Retriever`] needs and
//! can be read from TOML.
//!
//! ```toml
//! word_list_path = "knowledge/text/japanese_words.txt"
//! vector_cache_path = "data/word_vectors.dat"
//! regenerate_target = 20000
//!
//! [store]
//! capacity = 25000
//! ```
//!
//! [`Retriever`]: crate::engine::Retriever

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{MAX_CAPACITY, MAX_RESULTS, VECTOR_DIM};
use crate::ports::{ConfigError, ConfigResult};

/// Limits for one [`VectorStore`](crate::VectorStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of entries
    pub capacity: usize,

    /// Width every stored vector must have
    pub dimensionality: usize,

    /// Cap on K for top-K searches
    pub max_results: usize,
}

impl StoreConfig {
    /// Config with the given capacity and default width/K
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_dimensionality(mut self, dimensionality: usize) -> Self {
        self.dimensionality = dimensionality;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(ConfigError::InvalidCapacity {
                capacity: self.capacity,
                max: MAX_CAPACITY,
            });
        }
        if self.dimensionality == 0 {
            return Err(ConfigError::InvalidDimensionality);
        }
        if self.max_results == 0 || self.max_results > MAX_RESULTS {
            return Err(ConfigError::InvalidMaxResults {
                max_results: self.max_results,
                max: MAX_RESULTS,
            });
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_CAPACITY,
            dimensionality: VECTOR_DIM,
            max_results: MAX_RESULTS,
        }
    }
}

/// Everything the retrieval engine needs to open its state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub store: StoreConfig,

    /// One word per line; source of deterministic vectors and save labels
    pub word_list_path: PathBuf,

    /// Persisted word vectors (`word f0 .. f63` per line)
    pub vector_cache_path: PathBuf,

    /// Persisted code dictionary (`code|word` per line)
    pub dictionary_path: PathBuf,

    /// Size the word-vector store is topped up to when the cache is stale
    pub regenerate_target: usize,

    /// Ids below this are labeled from the word list when saving
    pub label_limit: usize,

    /// Maximum vectors read from the cache (0 = no limit)
    pub load_limit: usize,

    /// Seed for the random fallback vectors; entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            word_list_path: PathBuf::from("knowledge/text/japanese_words.txt"),
            vector_cache_path: PathBuf::from("data/word_vectors.dat"),
            dictionary_path: PathBuf::from("data/dna_dictionary.txt"),
            regenerate_target: 20_000,
            label_limit: 5_000,
            load_limit: 0,
            random_seed: None,
        }
    }
}

impl RetrievalConfig {
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.store.validate()?;
        if self.regenerate_target > self.store.capacity {
            return Err(ConfigError::TargetExceedsCapacity {
                target: self.regenerate_target,
                capacity: self.store.capacity,
            });
        }
        Ok(())
    }
}
