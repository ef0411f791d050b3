//! # Adapters
//!
//! Concrete implementations around the pure core:
//! - Storage: fixed-capacity in-memory vector store
//! - Index: flat (exhaustive) nearest-neighbor search
//! - Persist: word-vector, word-list and dictionary text files
//! - Keyword: a reference keyword scorer for hybrid search

pub mod index;
pub mod keyword;
pub mod persist;
pub mod storage;
