//! Binary that builds the canonical fixture bundle, verifies it, and
//! prints deterministic output lines for cross-process verification.
//!
//! Two runs of this binary — any machine, any process environment — must
//! emit byte-identical output. Used by the cross-process determinism lock.
//!
//! Usage: `bundle_fixture`
//! Output: `key=value` lines:
//!   `bundle_digest`=sha256:...
//!   `manifest_digest`=sha256:...
//!   `trace_digest`=sha256:...
//!   `verifier_digest`=sha256:...
//!   `verdict`=PASS
//!   `step_statistic`=...

use lock_tests::fixture_bundle_text;
use meridian_harness::runner::verify_bundle_bytes;

fn main() {
    let text = fixture_bundle_text();
    let verdict = verify_bundle_bytes(&text);

    let digests = verdict
        .recomputed
        .as_ref()
        .expect("fixture bundle reaches integrity recomputation");
    println!("bundle_digest={}", digests.bundle.as_str());
    println!("manifest_digest={}", digests.manifest.as_str());
    println!("trace_digest={}", digests.trace.as_str());
    println!("verifier_digest={}", digests.verifier.as_str());
    println!("verdict={}", verdict.verdict);
    let eval = verdict
        .evaluation
        .as_ref()
        .expect("fixture bundle reaches rule evaluation");
    println!("step_statistic={}", eval.statistic);
}
