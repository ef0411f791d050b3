//! # Storage Adapters
//!
//! Where vectors live.
//!
//! Available adapters:
//! - `VectorStore` - fixed-capacity in-memory array, insertion ordered

mod memory;

pub use memory::VectorStore;
