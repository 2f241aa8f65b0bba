//! End-to-end verification locks over the canonical fixture bundle
//! (`N=200`, `b=150`, `w_pre=w_post=20`, pre-median ≈ 0.10, post-median
//! ≈ 5.00) and targeted corruptions of it.

use lock_tests::{fixture_bundle, fixture_bundle_text, fixture_draft, FIXTURE_WINDOW};
use meridian_harness::bundle::build_bundle;
use meridian_harness::bundle_file::{verify_bundle_file, write_bundle_file};
use meridian_harness::bundle_text::render_bundle_text;
use meridian_harness::runner::verify_bundle_bytes;
use meridian_kernel::codec::TraceV1;

/// Offset of the first trace payload byte inside the fixture text.
fn trace_payload_offset(text: &[u8]) -> usize {
    let marker = b"-----BEGIN TRACE-----\n";
    text.windows(marker.len())
        .position(|w| w == marker)
        .expect("fixture has a trace section")
        + marker.len()
}

#[test]
fn large_step_with_matching_hashes_passes() {
    let verdict = verify_bundle_bytes(&fixture_bundle_text());
    assert!(verdict.is_pass(), "reasons: {:?}", verdict.reasons);

    let eval = verdict.evaluation.expect("rule ran");
    // Pre ≈ 0.10, post ≈ 5.00, tight spread: the statistic is enormous.
    assert!(eval.statistic > 100.0, "statistic {}", eval.statistic);
    assert_eq!(eval.pre.finite, usize::try_from(FIXTURE_WINDOW).unwrap());
    assert!((eval.pre.median - 0.10).abs() < 0.05);
    assert!((eval.post.median - 5.00).abs() < 0.05);
}

#[test]
fn one_flipped_trace_byte_fails_before_the_rule_runs() {
    let mut text = fixture_bundle_text();
    let pos = trace_payload_offset(&text);
    text[pos] = if text[pos] == b'A' { b'B' } else { b'A' };

    let verdict = verify_bundle_bytes(&text);
    assert!(!verdict.is_pass());
    assert_eq!(verdict.exit_code(), 2);
    assert!(
        verdict
            .reasons
            .iter()
            .any(|r| r.starts_with("hash mismatch for trace")),
        "reasons: {:?}",
        verdict.reasons
    );
    // Integrity gate precedence: no statistic was computed, let alone reported.
    assert!(verdict.evaluation.is_none());
}

#[test]
fn tampered_manifest_window_fails_the_manifest_hash() {
    let text = fixture_bundle_text();
    // Widen w_post in the manifest section only; the recorded digests were
    // computed over the original manifest core.
    let tampered = String::from_utf8(text)
        .unwrap()
        .replacen("\"w_post\":20", "\"w_post\":21", 1);
    let verdict = verify_bundle_bytes(tampered.as_bytes());
    assert!(!verdict.is_pass());
    assert!(
        verdict
            .reasons
            .iter()
            .any(|r| r.starts_with("hash mismatch for manifest")),
        "reasons: {:?}",
        verdict.reasons
    );
    assert!(verdict.evaluation.is_none());
}

#[test]
fn windows_that_fit_exactly_pass_one_sample_short_fails() {
    // b=100, w_pre=10, w_post=10 over N=110: the post window ends exactly
    // at the trace end.
    let steps: Vec<f64> = (0..110).map(|i| if i < 100 { 0.1 } else { 6.0 }).collect();
    let mut draft = fixture_draft();
    draft.boundary_index = 100;
    draft.w_pre = 10;
    draft.w_post = 10;
    draft.trace = TraceV1::new(steps.clone());
    let verdict =
        verify_bundle_bytes(&render_bundle_text(&build_bundle(&draft).unwrap().sections));
    assert!(verdict.is_pass(), "reasons: {:?}", verdict.reasons);

    // N=109: one sample short, hard range failure.
    draft.trace = TraceV1::new(steps[..109].to_vec());
    let verdict =
        verify_bundle_bytes(&render_bundle_text(&build_bundle(&draft).unwrap().sections));
    assert!(!verdict.is_pass());
    assert!(
        verdict.reasons[0].contains("do not fit"),
        "reasons: {:?}",
        verdict.reasons
    );
}

#[test]
fn nan_starved_post_window_fails_not_passes() {
    let mut draft = fixture_draft();
    let mut samples = draft.trace.samples().to_vec();
    // Leave a single finite sample in the post window.
    for sample in &mut samples[150..169] {
        *sample = f64::NAN;
    }
    draft.trace = TraceV1::new(samples);
    let verdict =
        verify_bundle_bytes(&render_bundle_text(&build_bundle(&draft).unwrap().sections));
    assert!(!verdict.is_pass());
    assert!(
        verdict.reasons[0].contains("post window has 1 finite"),
        "reasons: {:?}",
        verdict.reasons
    );
}

#[test]
fn file_round_trip_preserves_the_verdict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.adb");
    write_bundle_file(&fixture_bundle(), &path).unwrap();

    let from_file = verify_bundle_file(&path).unwrap();
    let from_memory = verify_bundle_bytes(&fixture_bundle_text());
    assert_eq!(from_file.render(), from_memory.render());
    assert!(from_file.is_pass());
}
