/// `w * ln(w)` with the usual convention that `0 * ln(0) = 0`
pub fn weight_log_weight(weight: f64) -> f64 {
    if weight > 0.0 { weight * weight.ln() } else { 0.0 }
}

/// Shannon entropy of a weighted distribution from its running sums
///
/// Uses `H = ln(Σw) - Σ(w ln w) / Σw`, which lets the solver update a cell's
/// entropy in O(1) whenever a pattern is banned.
pub fn entropy_from_sums(sum_of_weights: f64, sum_of_weight_log_weights: f64) -> f64 {
    if sum_of_weights <= 0.0 {
        return 0.0;
    }
    sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights
}

/// Index drawn from `weights` by inverse cumulative lookup at `roll` in `[0, 1)`
///
/// Zero-weight entries are never chosen unless every weight is zero, in which
/// case the first index is returned.
pub fn weighted_index(weights: &[f64], roll: f64) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }

    let mut remaining = roll * total;
    let mut last_positive = 0;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_positive = i;
        remaining -= weight;
        if remaining < 0.0 {
            return i;
        }
    }
    last_positive
}
