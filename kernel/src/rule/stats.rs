//! Robust estimators over finite samples.
//!
//! All functions are total: empty input yields `None`, never a panic or a
//! NaN-by-division. Callers decide what an empty window means.

/// The finite values of a slice, in original order.
///
/// Drops NaN and ±infinity. This is the only place missing-value policy
/// is applied; extraction upstream never filters.
#[must_use]
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

/// Median of a slice. Even counts average the two middle values
/// (`0.5 * (lo + hi)`).
///
/// Returns `None` on empty input.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        0.5 * (sorted[mid - 1] + sorted[mid])
    })
}

/// Median absolute deviation from the median (unscaled).
///
/// Returns `None` on empty input.
#[must_use]
pub fn median_abs_deviation(values: &[f64]) -> Option<f64> {
    let center = median(values)?;
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}
