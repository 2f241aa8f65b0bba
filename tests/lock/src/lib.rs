//! Shared fixtures for the lock tests and cross-process fixture binaries.
//!
//! Everything here is deterministic by construction: the sample trace is
//! synthesized from index arithmetic, never from a clock or RNG, so every
//! process on every machine builds byte-identical bundles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use meridian_harness::bundle::{build_bundle, AuditBundleV1, BundleDraftV1};
use meridian_harness::bundle_text::render_bundle_text;
use meridian_kernel::codec::TraceV1;
use meridian_kernel::rule::step::RULE_ID;

/// Sample length of the fixture trace.
pub const FIXTURE_TRACE_LEN: usize = 200;
/// Claimed boundary index of the fixture bundle.
pub const FIXTURE_BOUNDARY: u64 = 150;
/// Window widths of the fixture bundle.
pub const FIXTURE_WINDOW: u64 = 20;

/// The fixture trace: ~0.1 before the boundary, ~5.0 after, with a small
/// deterministic wiggle and a few NaN "missing" samples away from the
/// analysis windows.
#[must_use]
pub fn fixture_trace() -> TraceV1 {
    let boundary = usize::try_from(FIXTURE_BOUNDARY).expect("fixture boundary fits usize");
    let samples = (0..FIXTURE_TRACE_LEN)
        .map(|i| {
            if i == 7 || i == 40 {
                return f64::NAN;
            }
            let base = if i < boundary { 0.10 } else { 5.00 };
            // Wiggle in {-0.02, -0.01, 0.0, 0.01, 0.02}, index-derived.
            #[allow(clippy::cast_precision_loss)]
            let wiggle = ((i * 7 + 3) % 5) as f64 * 0.01 - 0.02;
            base + wiggle
        })
        .collect();
    TraceV1::new(samples)
}

/// The draft behind the canonical fixture bundle.
#[must_use]
pub fn fixture_draft() -> BundleDraftV1 {
    let mut provenance = serde_json::Map::new();
    provenance.insert("producer".to_string(), serde_json::json!("fixture"));
    provenance.insert("series".to_string(), serde_json::json!("divergence"));
    BundleDraftV1 {
        rule_id: RULE_ID.to_string(),
        boundary_index: FIXTURE_BOUNDARY,
        w_pre: FIXTURE_WINDOW,
        w_post: FIXTURE_WINDOW,
        provenance,
        trace: fixture_trace(),
        verifier: "recompute every digest, then re-run the step rule\n".to_string(),
    }
}

/// The canonical fixture bundle.
///
/// # Panics
///
/// Panics if the fixture draft fails to assemble (a bug in the fixture).
#[must_use]
pub fn fixture_bundle() -> AuditBundleV1 {
    build_bundle(&fixture_draft()).expect("fixture draft must assemble")
}

/// The canonical fixture bundle as bundle text.
#[must_use]
pub fn fixture_bundle_text() -> Vec<u8> {
    render_bundle_text(&fixture_bundle().sections)
}
