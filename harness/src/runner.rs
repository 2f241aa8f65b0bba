//! Verification pipeline: bundle bytes in, `FinalVerdict` out.
//!
//! The runner uses ONLY kernel APIs for computation — `decode_trace`,
//! `extract_windows`, `evaluate_step`, `canonical_hash` (via the bundle
//! module). It implements no statistics or hashing itself.
//!
//! # Pipeline
//!
//! ```text
//! parse_bundle() → check_integrity()   -- hard gate, collects all failures
//!   → rule-id gate → decode_trace() → declared-length cross-check
//!   → extract_windows() → evaluate_step() → threshold classification
//! ```
//!
//! Ordering is part of the contract: no statistical result is ever
//! computed, let alone reported, for a bundle that failed integrity.
//! Every failure path returns FAIL with the specific reason preserved;
//! nothing is retried and nothing downgrades to PASS.

use meridian_kernel::codec::{decode_trace, DecodeError};
use meridian_kernel::rule::step::{evaluate_step, RULE_ID, STEP_THRESHOLD};
use meridian_kernel::rule::window::extract_windows;
use meridian_kernel::rule::ComputeError;

use crate::bundle::{check_integrity, parse_bundle};
use crate::report::{FinalVerdict, RuleParameters, Verdict};

/// Verify one bundle. Pure: identical bytes always yield an identical
/// verdict, reasons, and diagnostics.
#[must_use]
pub fn verify_bundle_bytes(bytes: &[u8]) -> FinalVerdict {
    let bundle = match parse_bundle(bytes) {
        Ok(bundle) => bundle,
        Err(e) => return FinalVerdict::fail(vec![e.to_string()]),
    };
    let parameters = RuleParameters::from_manifest(&bundle.manifest);

    // Integrity is the hard gate: on any failure the rule never runs.
    let integrity = check_integrity(&bundle);
    if !integrity.is_ok() {
        return FinalVerdict {
            verdict: Verdict::Fail,
            reasons: integrity.failures.iter().map(ToString::to_string).collect(),
            parameters: Some(parameters),
            recomputed: integrity.recomputed,
            evaluation: None,
        };
    }
    let recomputed = integrity.recomputed;

    let fail = |reason: String, evaluation| FinalVerdict {
        verdict: Verdict::Fail,
        reasons: vec![reason],
        parameters: Some(parameters.clone()),
        recomputed: recomputed.clone(),
        evaluation,
    };

    if bundle.manifest.rule_id != RULE_ID {
        let err = ComputeError::UnsupportedRule {
            found: bundle.manifest.rule_id.clone(),
        };
        return fail(err.to_string(), None);
    }

    let trace_text = match std::str::from_utf8(&bundle.sections.trace) {
        Ok(text) => text,
        Err(e) => {
            let err = DecodeError::MalformedEncoding {
                detail: e.to_string(),
            };
            return fail(err.to_string(), None);
        }
    };
    let trace = match decode_trace(trace_text) {
        Ok(trace) => trace,
        Err(e) => return fail(e.to_string(), None),
    };

    let decoded_len = trace.len() as u64;
    if decoded_len != bundle.manifest.trace_len {
        return fail(
            format!(
                "trace length mismatch: manifest declares {} samples, decoded {}",
                bundle.manifest.trace_len, decoded_len
            ),
            None,
        );
    }

    let (pre, post) = match extract_windows(
        &trace,
        bundle.manifest.boundary_index,
        bundle.manifest.w_pre,
        bundle.manifest.w_post,
    ) {
        Ok(windows) => windows,
        Err(e) => return fail(e.to_string(), None),
    };

    match evaluate_step(pre, post) {
        Err(e) => fail(e.to_string(), None),
        Ok(eval) if eval.legible => FinalVerdict {
            verdict: Verdict::Pass,
            reasons: Vec::new(),
            parameters: Some(parameters.clone()),
            recomputed: recomputed.clone(),
            evaluation: Some(eval),
        },
        Ok(eval) => fail(
            format!(
                "step statistic {} is below the {RULE_ID} threshold {STEP_THRESHOLD}",
                eval.statistic
            ),
            Some(eval),
        ),
    }
}
