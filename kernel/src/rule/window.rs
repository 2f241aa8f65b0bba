//! Window extraction: pure half-open indexing over a trace.
//!
//! `pre = trace[b - w_pre .. b]`, `post = trace[b .. b + w_post]`, both
//! 0-based half-open. Out-of-range windows are a hard [`RangeError`] —
//! no clamping, no wraparound, no negative-index semantics. NaN samples
//! pass through untouched; missing-value policy belongs to the evaluator.

use crate::codec::TraceV1;

/// Typed failure from window extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// A window extends outside `[0, trace_len)`.
    WindowOutOfBounds {
        boundary: u64,
        w_pre: u64,
        w_post: u64,
        trace_len: usize,
    },
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WindowOutOfBounds {
                boundary,
                w_pre,
                w_post,
                trace_len,
            } => write!(
                f,
                "windows [{boundary}-{w_pre}, {boundary}) and [{boundary}, {boundary}+{w_post}) \
                 do not fit in trace of length {trace_len}"
            ),
        }
    }
}

impl std::error::Error for RangeError {}

/// Extract the pre/post windows around a claimed boundary.
///
/// # Errors
///
/// Returns [`RangeError::WindowOutOfBounds`] when `b - w_pre < 0` or
/// `b + w_post > N` (checked arithmetic; oversized `u64` inputs that do
/// not fit an index are out of bounds by definition).
pub fn extract_windows(
    trace: &TraceV1,
    boundary: u64,
    w_pre: u64,
    w_post: u64,
) -> Result<(&[f64], &[f64]), RangeError> {
    let out_of_bounds = RangeError::WindowOutOfBounds {
        boundary,
        w_pre,
        w_post,
        trace_len: trace.len(),
    };

    let b = usize::try_from(boundary).map_err(|_| out_of_bounds.clone())?;
    let pre_len = usize::try_from(w_pre).map_err(|_| out_of_bounds.clone())?;
    let post_len = usize::try_from(w_post).map_err(|_| out_of_bounds.clone())?;

    let start = b.checked_sub(pre_len).ok_or_else(|| out_of_bounds.clone())?;
    let end = b
        .checked_add(post_len)
        .filter(|&end| end <= trace.len())
        .ok_or(out_of_bounds)?;

    // end <= len and start <= b <= end, so both slices are in range.
    Ok((&trace.samples()[start..b], &trace.samples()[b..end]))
}
