//! # Engine
//!
//! The orchestration layer that wires everything together.
//!
//! This is where:
//! - Configuration is applied
//! - The word-vector cache is refreshed and the dictionary loaded
//! - Sentences flow through codec, vectorizer and search

mod retriever;

pub use retriever::{Recall, Retriever};
