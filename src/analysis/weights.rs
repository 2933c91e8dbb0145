//! Pattern weights derived from corpus occurrence counts

use crate::math::probability::{entropy_from_sums, weight_log_weight};

/// Per-pattern weights and the sums every fresh cell starts from
#[derive(Debug, Clone)]
pub struct PatternWeights {
    /// Weight of each pattern (its occurrence count)
    pub weights: Vec<f64>,
    /// `w * ln(w)` for each pattern
    pub weight_log_weights: Vec<f64>,
    /// Sum of all weights
    pub sum_of_weights: f64,
    /// Sum of all `w * ln(w)`
    pub sum_of_weight_log_weights: f64,
    /// Entropy of a cell where every pattern is still possible
    pub starting_entropy: f64,
}

impl PatternWeights {
    /// Derive weights from pattern occurrence counts
    pub fn from_counts(counts: &[usize]) -> Self {
        let weights: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        let weight_log_weights: Vec<f64> = weights.iter().map(|&w| weight_log_weight(w)).collect();
        let sum_of_weights = weights.iter().sum();
        let sum_of_weight_log_weights = weight_log_weights.iter().sum();
        let starting_entropy = entropy_from_sums(sum_of_weights, sum_of_weight_log_weights);

        Self {
            weights,
            weight_log_weights,
            sum_of_weights,
            sum_of_weight_log_weights,
            starting_entropy,
        }
    }

    /// Number of weighted patterns
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether there are no patterns
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of a single pattern (0 for unknown indices)
    pub fn weight(&self, pattern: usize) -> f64 {
        self.weights.get(pattern).copied().unwrap_or(0.0)
    }
}
