//! # Core Domain
//!
//! Pure types and math. No I/O lives here.
//!
//! - [`Vector`] - a fixed-width embedding (64 floats by default)
//! - [`VectorEntry`] - a vector paired with the caller's integer id
//! - [`math`] - distance, similarity and normalization primitives
//! - [`Metric`] - how a search ranks entries
//! - [`config`] - validated constructor parameters

pub mod config;
pub mod math;

mod metric;

pub use metric::Metric;

/// Embedding width used by the store and the code vectorizer
pub const VECTOR_DIM: usize = 64;

/// Upper bound on the number of vectors one store may hold
pub const MAX_CAPACITY: usize = 25_000;

/// Upper bound on the number of results a top-K search returns
pub const MAX_RESULTS: usize = 10;

/// Caller-assigned entry identifier.
///
/// The store never checks ids for uniqueness. Negative ids are legal
/// and are labeled synthetically when persisted.
pub type EntryId = i64;

/// A point in embedding space
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    dims: Vec<f32>,
}

impl Vector {
    /// Wrap raw components
    pub fn new(dims: Vec<f32>) -> Self {
        Self { dims }
    }

    /// All-zero vector of the given width
    pub fn zeros(dimensionality: usize) -> Self {
        Self {
            dims: vec![0.0; dimensionality],
        }
    }

    pub fn dims(&self) -> &[f32] {
        &self.dims
    }

    pub fn dims_mut(&mut self) -> &mut [f32] {
        &mut self.dims
    }

    pub fn dimensionality(&self) -> usize {
        self.dims.len()
    }

    /// L2 norm
    pub fn magnitude(&self) -> f32 {
        math::magnitude(&self.dims)
    }

    /// Unit-length copy. The zero vector comes back unchanged.
    pub fn normalize(&self) -> Self {
        let mut dims = self.dims.clone();
        math::normalize(&mut dims);
        Self { dims }
    }

    /// Within 1e-4 of unit length
    pub fn is_normalized(&self) -> bool {
        (self.magnitude() - 1.0).abs() < 1e-4
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.dims
    }
}

impl From<Vec<f32>> for Vector {
    fn from(dims: Vec<f32>) -> Self {
        Self::new(dims)
    }
}

/// A stored vector with its id
#[derive(Debug, Clone, PartialEq)]
pub struct VectorEntry {
    pub vector: Vector,
    pub id: EntryId,
}

impl VectorEntry {
    pub fn new(vector: Vector, id: EntryId) -> Self {
        Self { vector, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_normalize() {
        let v = Vector::new(vec![3.0, 4.0]);
        let n = v.normalize();

        assert!(n.is_normalized());
        assert!((n.dims()[0] - 0.6).abs() < 1e-6);
        assert!((n.dims()[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let v = Vector::zeros(VECTOR_DIM);
        let n = v.normalize();

        assert_eq!(n, v);
        assert!(!n.is_normalized());
    }
}
