//! Boundary rule: robust step detection over pre/post windows.
//!
//! The rule pipeline is three pure stages, each fail-closed:
//!
//! ```text
//! extract_windows()   -- pure indexing, NaNs pass through
//!   → evaluate_step() -- finite filter, median/MAD, step statistic
//!   → legibility      -- fixed threshold, ties count as legible
//! ```
//!
//! Window extraction knows nothing about statistics; the evaluator knows
//! nothing about indexing. Missing-value policy lives entirely in the
//! evaluator.

pub mod stats;
pub mod step;
pub mod window;

/// Which window a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSide {
    /// Samples before the claimed boundary: `[b - w_pre, b)`.
    Pre,
    /// Samples at and after the claimed boundary: `[b, b + w_post)`.
    Post,
}

impl std::fmt::Display for WindowSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pre => write!(f, "pre"),
            Self::Post => write!(f, "post"),
        }
    }
}

/// Typed failure from the boundary rule evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// A window retained fewer finite values than the rule requires.
    ///
    /// Verification fails; an unevaluable window is never a silent pass.
    InsufficientData { window: WindowSide, finite: usize },
    /// The manifest names a rule this verifier does not implement.
    UnsupportedRule { found: String },
}

impl std::fmt::Display for ComputeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData { window, finite } => write!(
                f,
                "{window} window has {finite} finite sample(s); rule {} requires at least {}",
                step::RULE_ID,
                step::MIN_FINITE_SAMPLES
            ),
            Self::UnsupportedRule { found } => {
                write!(f, "unsupported rule id \"{found}\" (expected {})", step::RULE_ID)
            }
        }
    }
}

impl std::error::Error for ComputeError {}
