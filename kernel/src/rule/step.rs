//! `BDR_ROBUST_STEP_V0`: the robust step-detection rule.
//!
//! Per window, only finite samples participate. Central tendency is the
//! median; dispersion is the MAD scaled by 1.4826 to be comparable to a
//! standard deviation under normality. The two window spreads are pooled
//! by averaging and floored, and the step statistic is
//!
//! ```text
//! z = (median_post - median_pre) / max(0.5 * (spread_pre + spread_post), floor)
//! ```
//!
//! `|z| >= STEP_THRESHOLD` classifies the boundary as legible. A statistic
//! exactly at the threshold is legible — the tie goes to PASS, and the
//! lock tests pin that byte-for-byte at one ULP on either side.
//!
//! The constants below define rule version `BDR_ROBUST_STEP_V0`; a change
//! to any of them is a new rule id, never a silent revision.

use crate::rule::stats;
use crate::rule::{ComputeError, WindowSide};

/// Rule identifier carried in manifests this evaluator accepts.
pub const RULE_ID: &str = "BDR_ROBUST_STEP_V0";

/// Minimum finite samples a window must retain after NaN removal.
pub const MIN_FINITE_SAMPLES: usize = 2;

/// MAD consistency factor: scaled MAD estimates σ for normal data.
pub const MAD_SIGMA_SCALE: f64 = 1.4826;

/// Floor for the pooled scale; keeps the statistic finite on
/// near-constant windows.
pub const POOLED_SCALE_FLOOR: f64 = 1e-12;

/// Detectability threshold on `|z|`.
pub const STEP_THRESHOLD: f64 = 4.0;

/// Robust summary of one window's finite samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSummary {
    /// Count of finite samples that participated.
    pub finite: usize,
    /// Median of the finite samples.
    pub median: f64,
    /// Scaled MAD (`MAD_SIGMA_SCALE * mad`) of the finite samples.
    pub spread: f64,
}

/// Outcome of one rule evaluation: the diagnostic statistic is always
/// present, whatever the classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvaluation {
    /// The normalized step statistic `z`.
    pub statistic: f64,
    /// `|z| >= STEP_THRESHOLD`.
    pub legible: bool,
    /// The pooled, floored scale the statistic was divided by.
    pub pooled_scale: f64,
    /// Pre-window summary.
    pub pre: WindowSummary,
    /// Post-window summary.
    pub post: WindowSummary,
}

/// Classify a statistic against the rule threshold. Ties are legible.
#[must_use]
pub fn is_legible(statistic: f64) -> bool {
    statistic.abs() >= STEP_THRESHOLD
}

/// Evaluate the robust step rule over extracted windows.
///
/// # Errors
///
/// Returns [`ComputeError::InsufficientData`] when either window retains
/// fewer than [`MIN_FINITE_SAMPLES`] finite values. Verification fails in
/// that case; it is never treated as a pass.
pub fn evaluate_step(pre: &[f64], post: &[f64]) -> Result<StepEvaluation, ComputeError> {
    let pre_summary = summarize(WindowSide::Pre, pre)?;
    let post_summary = summarize(WindowSide::Post, post)?;

    let pooled_scale =
        (0.5 * (pre_summary.spread + post_summary.spread)).max(POOLED_SCALE_FLOOR);
    let statistic = (post_summary.median - pre_summary.median) / pooled_scale;

    Ok(StepEvaluation {
        statistic,
        legible: is_legible(statistic),
        pooled_scale,
        pre: pre_summary,
        post: post_summary,
    })
}

fn summarize(side: WindowSide, values: &[f64]) -> Result<WindowSummary, ComputeError> {
    let finite = stats::finite_values(values);
    let count = finite.len();
    if count < MIN_FINITE_SAMPLES {
        return Err(ComputeError::InsufficientData {
            window: side,
            finite: count,
        });
    }
    let (Some(median), Some(mad)) = (stats::median(&finite), stats::median_abs_deviation(&finite))
    else {
        return Err(ComputeError::InsufficientData {
            window: side,
            finite: count,
        });
    };
    Ok(WindowSummary {
        finite: count,
        median,
        spread: MAD_SIGMA_SCALE * mad,
    })
}
