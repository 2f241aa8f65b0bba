//! Determinism locks: byte-identical input ⇒ byte-identical output,
//! across repeated in-process runs.
//!
//! The verifier's whole value is that a third party can reproduce it
//! exactly; these tests pin that at the bundle-text level and at the
//! rendered-report level.

use lock_tests::{fixture_bundle_text, fixture_draft};
use meridian_harness::bundle::build_bundle;
use meridian_harness::bundle_text::render_bundle_text;
use meridian_harness::runner::verify_bundle_bytes;

#[test]
fn bundle_build_is_deterministic_n10() {
    let first = fixture_bundle_text();
    for i in 1..=10 {
        let again = render_bundle_text(&build_bundle(&fixture_draft()).unwrap().sections);
        assert_eq!(again, first, "run {i}: bundle bytes differ");
    }
}

#[test]
fn verification_is_deterministic_n10() {
    let text = fixture_bundle_text();
    let first = verify_bundle_bytes(&text).render();
    for i in 1..=10 {
        let again = verify_bundle_bytes(&text).render();
        assert_eq!(again, first, "run {i}: rendered report differs");
    }
}

#[test]
fn fixture_bundle_passes() {
    let verdict = verify_bundle_bytes(&fixture_bundle_text());
    assert!(verdict.is_pass(), "reasons: {:?}", verdict.reasons);
    assert!(verdict.reasons.is_empty());
    assert_eq!(verdict.exit_code(), 0);
}

#[test]
fn report_carries_no_wall_clock_artifacts() {
    // The report is a closed vocabulary of key=value lines; every key is
    // derived from bundle content, never from the environment.
    let text = fixture_bundle_text();
    let report = verify_bundle_bytes(&text).render();
    for line in report.lines() {
        let (key, _) = line.split_once('=').expect("every line is key=value");
        assert!(
            [
                "verdict",
                "reason",
                "rule_id",
                "boundary_index",
                "w_pre",
                "w_post",
                "trace_len",
                "manifest_digest",
                "trace_digest",
                "verifier_digest",
                "bundle_digest",
                "pre_finite",
                "pre_median",
                "pre_spread",
                "post_finite",
                "post_median",
                "post_spread",
                "pooled_scale",
                "step_statistic",
                "step_threshold",
            ]
            .contains(&key),
            "unexpected report key: {key}"
        );
    }
}

#[test]
fn digests_have_locked_format() {
    let verdict = verify_bundle_bytes(&fixture_bundle_text());
    let digests = verdict.recomputed.unwrap();
    for digest in [
        &digests.manifest,
        &digests.trace,
        &digests.verifier,
        &digests.bundle,
    ] {
        assert_eq!(digest.algorithm(), "sha256");
        assert_eq!(digest.hex_digest().len(), 64);
        assert!(digest
            .hex_digest()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
