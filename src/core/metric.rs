use super::math;

/// How a search scores an entry against the query.
///
/// Scores are always "larger is better": Euclidean ranks by negated
/// distance so both metrics share one top-K routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Cosine similarity, in [-1, 1]
    #[default]
    Cosine,
    /// Negated straight-line distance, in (-inf, 0]
    Euclidean,
}

impl Metric {
    pub fn score(&self, query: &[f32], candidate: &[f32]) -> f32 {
        match self {
            Metric::Cosine => math::cosine_similarity(query, candidate),
            Metric::Euclidean => -math::euclidean_distance(query, candidate),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Cosine => "cosine",
            Metric::Euclidean => "euclidean",
        }
    }
}
