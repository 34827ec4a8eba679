//! Per-window weight computation
//!
//! Values that sit furthest from the mean of their neighbours (the window
//! mean with the value itself left out) receive a fixed weight bonus, so the
//! window average is pulled towards spikes instead of smoothing them away.

/// One value in every `BONUS_DIVISOR` (20%, rounded up) receives the weight bonus
pub const BONUS_DIVISOR: usize = 5;

/// Base weight of every value before normalization
pub const BASE_WEIGHT: f64 = 1.0;

/// Additive bonus applied to the most deviating values
pub const WEIGHT_BONUS: f64 = 1.0;

/// Number of values in a window of `len` that receive the bonus: `ceil(0.2 * len)`
///
/// Evaluated in integer arithmetic so the count never drifts from the exact
/// quotient.
pub fn bonus_count(len: usize) -> usize {
    len.div_ceil(BONUS_DIVISOR)
}

/// Distance of every value from its leave-one-out mean
///
/// Uses the O(1) form `(total - v) / (n - 1)` for each mean. Windows with
/// fewer than two values have no neighbours and yield all-zero distances.
pub fn leave_one_out_distances(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n <= 1 {
        return vec![0.0; n];
    }

    let total: f64 = values.iter().sum();
    let others = (n - 1) as f64;

    values
        .iter()
        .map(|&v| (v - (total - v) / others).abs())
        .collect()
}

/// Compute normalized weights for one window
///
/// The result has the same length as `values`. A single value gets weight
/// `1.0`; otherwise the `ceil(0.2 * n)` values with the largest leave-one-out
/// distance weigh `2.0` before normalization and the rest `1.0`. Ties are
/// ranked by position (stable sort), so the earlier value wins.
///
/// Callers must not pass an empty window; an empty slice yields an empty vector.
pub fn compute_weights(values: &[f64]) -> Vec<f64> {
    let mut weights = vec![BASE_WEIGHT; values.len()];
    if values.len() <= 1 {
        return weights;
    }

    let distances = leave_one_out_distances(values);

    // Descending by distance; sort_by is stable
    let mut ranked: Vec<usize> = (0..values.len()).collect();
    ranked.sort_by(|&a, &b| distances[b].total_cmp(&distances[a]));

    for &idx in ranked.iter().take(bonus_count(values.len())) {
        weights[idx] += WEIGHT_BONUS;
    }

    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }

    weights
}

/// Weighted average `sum(v * w) / sum(w)`, or `0.0` when the total weight is zero
pub fn weighted_average(values: &[f64], weights: &[f64]) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (v, w) in values.iter().zip(weights) {
        weighted_sum += v * w;
        total_weight += w;
    }

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}
