//! # Vector Math
//!
//! Elementwise primitives shared by the store, the search and the code
//! vectorizer. Slices of unequal length are compared over their common
//! prefix.

/// L2 norm
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `v` to unit length in place.
///
/// A zero vector is left untouched; this is a defined result, not an error.
pub fn normalize(v: &mut [f32]) {
    let norm = magnitude(v);
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Straight-line distance between `a` and `b`
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f32>()
        .sqrt()
}

/// Cosine of the angle between `a` and `b`, or 0 when either is zero
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_euclidean_known_distance() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 2.0, 2.0];
        assert!((euclidean_distance(&a, &b) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_and_opposite() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_with_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), 0.0);
    }

    fn nonzero_vector() -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(-100.0f32..100.0, 64)
            .prop_filter("non-zero", |v| magnitude(v) > 1e-3)
    }

    proptest! {
        #[test]
        fn prop_normalize_gives_unit_norm(mut v in nonzero_vector()) {
            normalize(&mut v);
            prop_assert!((magnitude(&v) - 1.0).abs() < 1e-4);
        }

        #[test]
        fn prop_self_similarity(v in nonzero_vector()) {
            prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-4);
            prop_assert_eq!(euclidean_distance(&v, &v), 0.0);
        }
    }
}
