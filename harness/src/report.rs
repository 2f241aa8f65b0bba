//! `FinalVerdict`: the one deterministic output of a verification run.
//!
//! Rendering is `key=value` lines, one fact per line, in fixed order —
//! the whole report is part of the reproducibility contract, so nothing
//! here may depend on clock, locale, or environment. Float fields use
//! Rust's shortest-round-trip formatting, which is fully determined by
//! the IEEE-754 value.

use meridian_kernel::rule::step::{StepEvaluation, STEP_THRESHOLD};

use crate::bundle::RecomputedDigests;
use crate::manifest::ManifestV1;

/// Terminal classification of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Integrity held and the boundary is legible.
    Pass,
    /// Anything else.
    Fail,
}

impl Verdict {
    /// Upper-case wire form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The manifest parameters echoed into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleParameters {
    /// Rule id the bundle claims.
    pub rule_id: String,
    /// Claimed boundary index.
    pub boundary_index: u64,
    /// Pre-window width.
    pub w_pre: u64,
    /// Post-window width.
    pub w_post: u64,
    /// Declared trace length.
    pub trace_len: u64,
}

impl RuleParameters {
    /// Extract the echoed parameters from a parsed manifest.
    #[must_use]
    pub fn from_manifest(manifest: &ManifestV1) -> Self {
        Self {
            rule_id: manifest.rule_id.clone(),
            boundary_index: manifest.boundary_index,
            w_pre: manifest.w_pre,
            w_post: manifest.w_post,
            trace_len: manifest.trace_len,
        }
    }
}

/// The aggregated outcome of one verification run. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalVerdict {
    /// PASS or FAIL.
    pub verdict: Verdict,
    /// Ordered human-readable reasons. Empty exactly when PASS.
    pub reasons: Vec<String>,
    /// Echoed manifest parameters (absent if the manifest never parsed).
    pub parameters: Option<RuleParameters>,
    /// Recomputed digests (absent if integrity recomputation never ran).
    pub recomputed: Option<RecomputedDigests>,
    /// Rule evaluation, present whenever the rule ran — on FAIL-by-rule
    /// too, for audit transparency.
    pub evaluation: Option<StepEvaluation>,
}

impl FinalVerdict {
    /// A failure verdict carrying the given reasons.
    #[must_use]
    pub fn fail(reasons: Vec<String>) -> Self {
        Self {
            verdict: Verdict::Fail,
            reasons,
            parameters: None,
            recomputed: None,
            evaluation: None,
        }
    }

    /// True on PASS.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    /// Process exit status: 0 for PASS, 2 for FAIL.
    ///
    /// (1 is reserved for "could not read the bundle at all", which is an
    /// operational fault of the caller, not a verification outcome.)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.verdict {
            Verdict::Pass => 0,
            Verdict::Fail => 2,
        }
    }

    /// Render the deterministic `key=value` report, one fact per line,
    /// with a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("verdict={}", self.verdict));
        for reason in &self.reasons {
            lines.push(format!("reason={reason}"));
        }
        if let Some(params) = &self.parameters {
            lines.push(format!("rule_id={}", params.rule_id));
            lines.push(format!("boundary_index={}", params.boundary_index));
            lines.push(format!("w_pre={}", params.w_pre));
            lines.push(format!("w_post={}", params.w_post));
            lines.push(format!("trace_len={}", params.trace_len));
        }
        if let Some(digests) = &self.recomputed {
            lines.push(format!("manifest_digest={}", digests.manifest.as_str()));
            lines.push(format!("trace_digest={}", digests.trace.as_str()));
            lines.push(format!("verifier_digest={}", digests.verifier.as_str()));
            lines.push(format!("bundle_digest={}", digests.bundle.as_str()));
        }
        if let Some(eval) = &self.evaluation {
            lines.push(format!("pre_finite={}", eval.pre.finite));
            lines.push(format!("pre_median={}", eval.pre.median));
            lines.push(format!("pre_spread={}", eval.pre.spread));
            lines.push(format!("post_finite={}", eval.post.finite));
            lines.push(format!("post_median={}", eval.post.median));
            lines.push(format!("post_spread={}", eval.post.spread));
            lines.push(format!("pooled_scale={}", eval.pooled_scale));
            lines.push(format!("step_statistic={}", eval.statistic));
            lines.push(format!("step_threshold={STEP_THRESHOLD}"));
        }
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}
