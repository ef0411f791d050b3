//! # Ports
//!
//! Contracts between the core and everything around it.
//!
//! - [`KeywordScorer`] - keyword relevance supplied by the host application
//! - [`SearchResult`] - one ranked hit
//! - Error types for each concern: store, persistence, codec, config
//!
//! Misses are not errors. Single-result searches return `Option`, top-K
//! searches return an empty list.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::RoleType;
use crate::core::EntryId;

// ============================================================================
// SEARCH
// ============================================================================

/// One hit from a ranked search. Higher scores rank first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub id: EntryId,
    pub score: f32,
}

impl SearchResult {
    pub fn new(id: EntryId, score: f32) -> Self {
        Self { id, score }
    }
}

/// Keyword relevance of a stored entry for a tokenized query.
///
/// Implemented outside this crate by whatever knows the text indexed under
/// each id. Scores are expected in [0, 1]; the hybrid search clamps them.
pub trait KeywordScorer {
    fn score(&self, id: EntryId, query_tokens: &[&str]) -> f32;
}

impl<F> KeywordScorer for F
where
    F: Fn(EntryId, &[&str]) -> f32,
{
    fn score(&self, id: EntryId, query_tokens: &[&str]) -> f32 {
        self(id, query_tokens)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Errors from adding to a [`VectorStore`](crate::VectorStore)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store is full ({capacity} entries)")]
    CapacityExceeded { capacity: usize },

    #[error("dimensionality mismatch: expected {expected}, got {got}")]
    DimensionalityMismatch { expected: usize, got: usize },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from reading or writing persisted files
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o failure on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PersistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;

/// Errors from the symbolic codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("no codes left for role {role:?} (ids 00-99 are taken)")]
    RoleExhausted { role: RoleType },

    #[error("unknown role letter '{0}'")]
    UnknownRole(char),

    #[error("unknown role name '{0}'")]
    UnknownRoleName(String),

    #[error("malformed code '{0}'")]
    MalformedCode(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Errors from building or loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("capacity {capacity} out of range (1..={max})")]
    InvalidCapacity { capacity: usize, max: usize },

    #[error("dimensionality must be at least 1")]
    InvalidDimensionality,

    #[error("max_results {max_results} out of range (1..={max})")]
    InvalidMaxResults { max_results: usize, max: usize },

    #[error("regenerate_target {target} exceeds store capacity {capacity}")]
    TargetExceedsCapacity { target: usize, capacity: usize },

    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors surfaced by the [`Retriever`](crate::Retriever) engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type EngineResult<T> = Result<T, EngineError>;
