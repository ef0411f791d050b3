//! # Persistence Adapters
//!
//! Plain-text file formats.
//!
//! - `word_vectors` - `word f0 .. f63` lines, cache refresh
//! - `word_list` - auxiliary one-word-per-line list
//! - `dictionary` - `code|word` lines

pub mod dictionary;
pub mod word_list;
pub mod word_vectors;

pub use word_list::WordList;
pub use word_vectors::{
    is_stale, load, random_vector, refresh_if_stale, regenerate_large, save, word_vector, Refresh,
    RefreshPolicy,
};
