//! # Memory Store
//!
//! Fixed-capacity, insertion-ordered array of vectors.
//!
//! The store only grows: there is no removal or in-place update, so the
//! scan order seen by searches is always the insertion order.

use tracing::warn;

use crate::core::config::StoreConfig;
use crate::core::{EntryId, Vector, VectorEntry};
use crate::ports::{StoreError, StoreResult};

/// In-memory vector store
#[derive(Debug, Clone)]
pub struct VectorStore {
    /// Valid entries, `entries.len() <= config.capacity`
    entries: Vec<VectorEntry>,

    config: StoreConfig,
}

impl VectorStore {
    /// Empty store with a validated config
    pub fn new(config: StoreConfig) -> crate::ports::ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            entries: Vec::new(),
            config,
        })
    }

    /// Empty store with the given capacity and default width/K
    pub fn with_capacity(capacity: usize) -> crate::ports::ConfigResult<Self> {
        Self::new(StoreConfig::new(capacity))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    pub fn dimensionality(&self) -> usize {
        self.config.dimensionality
    }

    /// Append a copy of `vector` under `id`.
    ///
    /// Ids and vectors are not deduplicated. Fails without side effects
    /// when the store is full or the width is wrong.
    pub fn add(&mut self, vector: &Vector, id: EntryId) -> StoreResult<()> {
        if self.is_full() {
            return Err(StoreError::CapacityExceeded {
                capacity: self.config.capacity,
            });
        }
        if vector.dimensionality() != self.config.dimensionality {
            return Err(StoreError::DimensionalityMismatch {
                expected: self.config.dimensionality,
                got: vector.dimensionality(),
            });
        }

        self.entries.push(VectorEntry::new(vector.clone(), id));
        Ok(())
    }

    /// Append every entry of `other` until this store is full.
    ///
    /// Workers can build private stores and hand them to one owner that
    /// merges them; returns how many entries were taken.
    pub fn absorb(&mut self, other: VectorStore) -> usize {
        let mut taken = 0;
        for entry in other.entries {
            match self.add(&entry.vector, entry.id) {
                Ok(()) => taken += 1,
                Err(StoreError::CapacityExceeded { capacity }) => {
                    warn!(capacity, taken, "store full while absorbing, dropping the rest");
                    break;
                }
                Err(e) => warn!(id = entry.id, error = %e, "skipping entry while absorbing"),
            }
        }
        taken
    }

    /// Number of stored entries; same as [`len`](Self::len)
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.config.capacity
    }

    /// Entry at insertion position `index`
    pub fn get(&self, index: usize) -> Option<&VectorEntry> {
        self.entries.get(index)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, VectorEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[VectorEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a VectorStore {
    type Item = &'a VectorEntry;
    type IntoIter = std::slice::Iter<'a, VectorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
