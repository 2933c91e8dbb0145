//! Tests for pattern weights and starting entropy

#[cfg(test)]
mod tests {
    use infinitile::analysis::weights::PatternWeights;

    // Tests that weights mirror occurrence counts and sums are precomputed
    #[test]
    fn test_from_counts_sums() {
        let weights = PatternWeights::from_counts(&[1, 2, 5]);

        assert_eq!(weights.len(), 3);
        assert!((weights.sum_of_weights - 8.0).abs() < 1e-12);
        let expected = 2.0 * 2.0_f64.ln() + 5.0 * 5.0_f64.ln();
        assert!((weights.sum_of_weight_log_weights - expected).abs() < 1e-12);
        assert!((weights.weight(2) - 5.0).abs() < f64::EPSILON);
    }

    // Tests the starting entropy of equal weights is ln(n)
    // Verified by dropping the weight-log-weight term
    #[test]
    fn test_uniform_starting_entropy() {
        let weights = PatternWeights::from_counts(&[3, 3, 3, 3]);
        assert!((weights.starting_entropy - 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_single_pattern_has_no_entropy() {
        let weights = PatternWeights::from_counts(&[7]);
        assert!(weights.starting_entropy.abs() < 1e-12);
    }

    #[test]
    fn test_unknown_pattern_weighs_nothing() {
        let weights = PatternWeights::from_counts(&[]);
        assert!(weights.is_empty());
        assert!(weights.weight(4).abs() < f64::EPSILON);
        assert!(weights.starting_entropy.abs() < f64::EPSILON);
    }
}
