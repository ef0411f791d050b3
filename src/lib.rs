//! # DNA Retrieval
//!
//! > "Words become codes, codes become vectors, vectors find their neighbors"
//!
//! The semantic retrieval core of a rule-based Japanese response engine.
//! Two pieces cooperate:
//!
//! - A fixed-capacity **vector store** with exhaustive nearest-neighbor
//!   search (Euclidean and cosine, single-best and top-K, plus a hybrid
//!   blend with keyword relevance) and a plain-text on-disk format.
//! - A **symbolic sentence codec** ("DNA coding") that gives every
//!   (word, role) pair a short positional code such as `E00` or `C03`,
//!   compresses a role-tagged sentence into a code string, decodes it back,
//!   and embeds any code string into the same 64-dim space.
//!
//! ## Philosophy
//!
//! - **Exact over approximate** - at 25 000 vectors a linear scan is cheap
//! - **Explicit state** - stores and dictionaries are values you own
//! - **Nothing is fatal** - misses are `None`, bad records are skipped
//! - **Pure core, swappable adapters** - Hexagonal architecture
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DNA RETRIEVAL                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │  CORE (pure math, no I/O)                                   │
//! │    Vector, VectorEntry, math, Metric, config                │
//! │                                                              │
//! │  PORTS (trait contracts)                                     │
//! │    KeywordScorer, SearchResult, errors                      │
//! │                                                              │
//! │  ADAPTERS (swappable implementations)                       │
//! │    Storage: VectorStore                                     │
//! │    Index: flat search                                       │
//! │    Persist: word vectors, word list, dictionary             │
//! │                                                              │
//! │  CODEC (symbolic sentences)                                  │
//! │    RoleType, Code, Dictionary, vectorize, CodeStore         │
//! │                                                              │
//! │  ENGINE (orchestration)                                      │
//! │    Retriever - the main entry point                         │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use dna_retrieval::{Dictionary, CodeLayout, CodeStore, RoleAssignments};
//!
//! let mut dict = Dictionary::new();
//! let mut codes = CodeStore::new(2000).unwrap();
//!
//! let roles = RoleAssignments::triple("猫", "食べる", "魚");
//! let code = dict.compress(&roles, CodeLayout::Minimal).unwrap();
//! assert_eq!(code, "E00C00R00");
//!
//! codes.add(&code, 1).unwrap();
//! assert_eq!(codes.search_nearest_euclidean(&code), Some(1));
//! assert_eq!(dict.decompress(&code), "猫は食べる魚を");
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Core domain - pure math, no I/O
/// Contains: Vector, VectorEntry, math, Metric, config
pub mod core;

/// Port definitions - trait contracts and error types
/// Contains: KeywordScorer, SearchResult, error enums
pub mod ports;

/// Adapter implementations - swappable components
/// Contains: storage, index, persist, keyword submodules
pub mod adapters;

/// Symbolic sentence codec
/// Contains: RoleType, Code, Dictionary, vectorizer
pub mod codec;

/// Engine - orchestration layer
/// Contains: Retriever main struct
pub mod engine;

// ============================================================================
// RE-EXPORTS (public API)
// ============================================================================

// Core types
pub use crate::core::{EntryId, Metric, Vector, VectorEntry, MAX_CAPACITY, MAX_RESULTS, VECTOR_DIM};
pub use crate::core::config::{RetrievalConfig, StoreConfig};
pub use crate::core::math::{cosine_similarity, euclidean_distance, normalize};

// Ports
pub use crate::ports::{
    CodecError, ConfigError, EngineError, KeywordScorer, PersistError, SearchResult, StoreError,
};

// Adapters
pub use crate::adapters::index::{
    search_hybrid, search_nearest_cosine, search_nearest_euclidean, search_top_k,
};
pub use crate::adapters::keyword::TermOverlapScorer;
pub use crate::adapters::persist::{refresh_if_stale, Refresh, RefreshPolicy, WordList};
pub use crate::adapters::storage::VectorStore;

// Codec
pub use crate::codec::{
    code_similarity, vectorize, Code, CodeLayout, CodeStore, Dictionary, DictionaryEntry,
    RoleAssignments, RoleType,
};

// Engine
pub use crate::engine::{Recall, Retriever};
