//! # Symbolic Codec
//!
//! "DNA coding" of sentences. Words extracted from a parsed sentence are
//! replaced by short positional codes (role letter + two-digit id), giving
//! a compact string such as `E00C03R01` that can be decoded back to words
//! and embedded into a vector for similarity search.
//!
//! - [`RoleType`] - the eight sentence roles and their letters
//! - [`Code`] - one `E00`-style code
//! - [`Dictionary`] - word/code mapping, compress and decompress
//! - [`vectorize`] - code string to 64-dim vector
//! - [`CodeStore`] - searchable store of code strings

mod code;
mod dictionary;
mod role;
mod vectorize;

pub use code::{segments, Code, CODE_LEN, MAX_CODES_PER_ROLE};
pub use dictionary::{CodeLayout, Dictionary, DictionaryEntry, RoleAssignments};
pub use role::RoleType;
pub use vectorize::{code_similarity, vectorize, CodeStore, ROLE_SLICE};
