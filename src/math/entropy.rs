//! Weighted entropy used to rank undecided cells
//!
//! Tiles carry raw occurrence weights rather than normalised probabilities, so
//! the entropy of a cell is expressed through two running sums over its
//! remaining tiles: `W = Σ w` and `L = Σ w·ln(w)`. With `p = w / W` the Shannon
//! entropy `-Σ p·ln(p)` rearranges to `ln(W) - L / W`.

/// `weight * ln(weight)`, the per-tile term of the log-weight sum
pub fn log_weight(weight: f64) -> f64 {
    weight * weight.ln()
}

/// Entropy of a weighted set from its weight sum and log-weight sum
///
/// Returns 0.0 for an empty set (non-positive weight sum); callers treat an
/// empty cell as a contradiction before looking at entropy.
pub fn weighted_entropy(sum_of_weights: f64, sum_of_log_weights: f64) -> f64 {
    if sum_of_weights <= 0.0 {
        return 0.0;
    }
    sum_of_weights.ln() - sum_of_log_weights / sum_of_weights
}
