//! Audit bundle: model, authoring, and integrity checking.
//!
//! # Hash surfaces
//!
//! Every digest is recomputed from bytes actually present in the bundle
//! and compared against the manifest's record. The surfaces are pinned so
//! that no digest ever covers the bytes that carry it:
//!
//! - `hashes.manifest` — manifest core (the manifest object minus
//!   `hashes` and `bundle_hash`), canonical JSON, `ManifestCore` domain.
//! - `hashes.trace` / `hashes.verifier` — the exact section payload bytes,
//!   `BundleSection` domain.
//! - hash-listing section — must byte-equal the canonical JSON projection
//!   of the manifest's record (not hashed again; byte equality).
//! - `bundle_hash` — length-prefixed concatenation
//!   `name ‖ 0x00 ‖ u64le(len) ‖ payload` of manifest core, trace payload,
//!   verifier payload, in that order, `BundleDigest` domain.
//!
//! `build_bundle` and `check_integrity` share these definitions — the
//! authoring side cannot drift from the verifying side.

use meridian_kernel::codec::{encode_trace, TraceV1};
use meridian_kernel::proof::canon::canonical_json_bytes;
use meridian_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::bundle_text::{parse_bundle_text, BundleSectionsV1, BundleTextError};
use crate::manifest::{parse_manifest, HashRecordV1, ManifestError, ManifestV1, FORMAT_VERSION};

/// Component names as they appear in failure reports.
pub const COMPONENT_MANIFEST: &str = "manifest";
/// Trace component name.
pub const COMPONENT_TRACE: &str = "trace";
/// Verifier component name.
pub const COMPONENT_VERIFIER: &str = "verifier";
/// Whole-bundle pseudo-component name.
pub const COMPONENT_BUNDLE: &str = "bundle";

/// A parsed audit bundle: exact section bytes plus the typed manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditBundleV1 {
    /// The four section payloads, byte-exact as carried in the text.
    pub sections: BundleSectionsV1,
    /// The validated manifest parsed from `sections.manifest`.
    pub manifest: ManifestV1,
}

/// Error turning bundle bytes into an [`AuditBundleV1`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleParseError {
    /// Section framing failed.
    Text(BundleTextError),
    /// The manifest section is invalid.
    Manifest(ManifestError),
}

impl std::fmt::Display for BundleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(e) => write!(f, "bundle text: {e}"),
            Self::Manifest(e) => write!(f, "manifest: {e}"),
        }
    }
}

impl std::error::Error for BundleParseError {}

/// Parse bundle bytes: section framing, then manifest validation.
///
/// # Errors
///
/// Returns [`BundleParseError`] on framing or manifest violations. Trace
/// decoding and hash checking happen later in the pipeline; this step
/// only establishes the structure.
pub fn parse_bundle(bytes: &[u8]) -> Result<AuditBundleV1, BundleParseError> {
    let sections = parse_bundle_text(bytes).map_err(BundleParseError::Text)?;
    let manifest = parse_manifest(&sections.manifest).map_err(BundleParseError::Manifest)?;
    Ok(AuditBundleV1 { sections, manifest })
}

/// One named integrity failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityFailure {
    /// A recorded digest does not match its recomputation.
    HashMismatch {
        component: &'static str,
        recorded: String,
        recomputed: String,
    },
    /// The hash-listing section diverges from the manifest's record.
    ListingDivergence,
    /// Canonical JSON serialization failed while recomputing a surface.
    Canon { detail: String },
}

impl std::fmt::Display for IntegrityFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HashMismatch {
                component,
                recorded,
                recomputed,
            } => write!(
                f,
                "hash mismatch for {component}: recorded {recorded}, recomputed {recomputed}"
            ),
            Self::ListingDivergence => {
                write!(f, "hash-listing section does not match the manifest hash record")
            }
            Self::Canon { detail } => write!(f, "canonical JSON error: {detail}"),
        }
    }
}

impl std::error::Error for IntegrityFailure {}

/// Digests recomputed during the integrity pass, echoed for the auditor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecomputedDigests {
    /// Recomputed manifest-core digest.
    pub manifest: ContentHash,
    /// Recomputed trace-section digest.
    pub trace: ContentHash,
    /// Recomputed verifier-section digest.
    pub verifier: ContentHash,
    /// Recomputed whole-bundle digest.
    pub bundle: ContentHash,
}

/// Outcome of the integrity pass: all named failures, in fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Failures in the order manifest, trace, verifier, listing, bundle.
    /// Empty means integrity OK.
    pub failures: Vec<IntegrityFailure>,
    /// Recomputed digests, absent only if recomputation itself failed.
    pub recomputed: Option<RecomputedDigests>,
}

impl IntegrityReport {
    /// True when no failure was recorded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recompute every digest and compare against the manifest's record.
///
/// Collects **all** mismatches rather than stopping at the first — an
/// auditor debugging a bad bundle needs the full picture in one pass.
#[must_use]
pub fn check_integrity(bundle: &AuditBundleV1) -> IntegrityReport {
    let mut failures = Vec::new();

    let core = match canonical_json_bytes(&bundle.manifest.core_value()) {
        Ok(core) => core,
        Err(e) => {
            failures.push(IntegrityFailure::Canon {
                detail: e.to_string(),
            });
            return IntegrityReport {
                failures,
                recomputed: None,
            };
        }
    };

    let recomputed = RecomputedDigests {
        manifest: canonical_hash(HashDomain::ManifestCore, &core),
        trace: canonical_hash(HashDomain::BundleSection, &bundle.sections.trace),
        verifier: canonical_hash(HashDomain::BundleSection, &bundle.sections.verifier),
        bundle: canonical_hash(
            HashDomain::BundleDigest,
            &digest_surface(&core, &bundle.sections.trace, &bundle.sections.verifier),
        ),
    };

    let record = &bundle.manifest.hashes;
    let comparisons = [
        (COMPONENT_MANIFEST, &record.manifest, &recomputed.manifest),
        (COMPONENT_TRACE, &record.trace, &recomputed.trace),
        (COMPONENT_VERIFIER, &record.verifier, &recomputed.verifier),
    ];
    for (component, recorded, actual) in comparisons {
        if recorded != actual {
            failures.push(IntegrityFailure::HashMismatch {
                component,
                recorded: recorded.as_str().to_string(),
                recomputed: actual.as_str().to_string(),
            });
        }
    }

    match canonical_json_bytes(&listing_value(record, &bundle.manifest.bundle_hash)) {
        Ok(expected_listing) => {
            if expected_listing != bundle.sections.hashes {
                failures.push(IntegrityFailure::ListingDivergence);
            }
        }
        Err(e) => failures.push(IntegrityFailure::Canon {
            detail: e.to_string(),
        }),
    }

    if bundle.manifest.bundle_hash != recomputed.bundle {
        failures.push(IntegrityFailure::HashMismatch {
            component: COMPONENT_BUNDLE,
            recorded: bundle.manifest.bundle_hash.as_str().to_string(),
            recomputed: recomputed.bundle.as_str().to_string(),
        });
    }

    IntegrityReport {
        failures,
        recomputed: Some(recomputed),
    }
}

/// Inputs for authoring a bundle. Digests are always computed, never
/// supplied — a draft cannot carry a forged record.
#[derive(Debug, Clone)]
pub struct BundleDraftV1 {
    /// Rule id to record (verification gates on it later).
    pub rule_id: String,
    /// Claimed boundary index.
    pub boundary_index: u64,
    /// Pre-window width.
    pub w_pre: u64,
    /// Post-window width.
    pub w_post: u64,
    /// Free-form producer metadata.
    pub provenance: serde_json::Map<String, serde_json::Value>,
    /// The trace to embed.
    pub trace: TraceV1,
    /// Verifier script text to embed.
    pub verifier: String,
}

/// Error assembling a bundle from a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleBuildError {
    /// Canonical JSON serialization failed (non-integer number in
    /// provenance).
    Canon { detail: String },
    /// The assembled manifest failed its own validation.
    Manifest(ManifestError),
}

impl std::fmt::Display for BundleBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canon { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::Manifest(e) => write!(f, "assembled manifest invalid: {e}"),
        }
    }
}

impl std::error::Error for BundleBuildError {}

/// Assemble a complete, internally-consistent bundle from a draft.
///
/// The result always passes [`check_integrity`]; the round trip through
/// [`crate::bundle_text::render_bundle_text`] and [`parse_bundle`] is exact.
///
/// # Errors
///
/// Returns [`BundleBuildError`] if provenance cannot be canonicalized or
/// the draft parameters violate manifest validation (e.g. a zero window).
pub fn build_bundle(draft: &BundleDraftV1) -> Result<AuditBundleV1, BundleBuildError> {
    let trace_payload = encode_trace(&draft.trace).into_bytes();
    let verifier_payload = draft.verifier.as_bytes().to_vec();

    let core_value = serde_json::json!({
        "format_version": FORMAT_VERSION,
        "rule_id": draft.rule_id,
        "boundary_index": draft.boundary_index,
        "w_pre": draft.w_pre,
        "w_post": draft.w_post,
        "trace_len": draft.trace.len() as u64,
        "provenance": serde_json::Value::Object(draft.provenance.clone()),
    });
    let core = canonical_json_bytes(&core_value).map_err(|e| BundleBuildError::Canon {
        detail: e.to_string(),
    })?;

    let record = HashRecordV1 {
        manifest: canonical_hash(HashDomain::ManifestCore, &core),
        trace: canonical_hash(HashDomain::BundleSection, &trace_payload),
        verifier: canonical_hash(HashDomain::BundleSection, &verifier_payload),
    };
    let bundle_hash = canonical_hash(
        HashDomain::BundleDigest,
        &digest_surface(&core, &trace_payload, &verifier_payload),
    );

    let mut manifest_value = core_value;
    if let Some(obj) = manifest_value.as_object_mut() {
        obj.insert("hashes".to_string(), record_value(&record));
        obj.insert(
            "bundle_hash".to_string(),
            serde_json::Value::String(bundle_hash.as_str().to_string()),
        );
    }
    let manifest_payload =
        canonical_json_bytes(&manifest_value).map_err(|e| BundleBuildError::Canon {
            detail: e.to_string(),
        })?;
    let listing_payload = canonical_json_bytes(&listing_value(&record, &bundle_hash)).map_err(
        |e| BundleBuildError::Canon {
            detail: e.to_string(),
        },
    )?;

    let sections = BundleSectionsV1 {
        manifest: manifest_payload,
        trace: trace_payload,
        verifier: verifier_payload,
        hashes: listing_payload,
    };
    let manifest = parse_manifest(&sections.manifest).map_err(BundleBuildError::Manifest)?;

    Ok(AuditBundleV1 { sections, manifest })
}

/// The whole-bundle digest surface: length-prefixed concatenation of the
/// three self-reference-free component payloads, fixed order.
///
/// Public so that external authoring tools (and the lock tests) can
/// reproduce the exact surface `bundle_hash` commits to.
#[must_use]
pub fn digest_surface(core: &[u8], trace: &[u8], verifier: &[u8]) -> Vec<u8> {
    let parts: [(&str, &[u8]); 3] = [
        (COMPONENT_MANIFEST, core),
        (COMPONENT_TRACE, trace),
        (COMPONENT_VERIFIER, verifier),
    ];
    let mut surface = Vec::new();
    for (name, payload) in parts {
        surface.extend_from_slice(name.as_bytes());
        surface.push(0);
        surface.extend_from_slice(&(payload.len() as u64).to_le_bytes());
        surface.extend_from_slice(payload);
    }
    surface
}

/// The `hashes` record as a JSON object (used both inside the manifest and
/// in the hash-listing projection).
fn record_value(record: &HashRecordV1) -> serde_json::Value {
    serde_json::json!({
        "manifest": record.manifest.as_str(),
        "trace": record.trace.as_str(),
        "verifier": record.verifier.as_str(),
    })
}

/// The hash-listing section's canonical content.
fn listing_value(record: &HashRecordV1, bundle_hash: &ContentHash) -> serde_json::Value {
    serde_json::json!({
        "bundle_hash": bundle_hash.as_str(),
        "hashes": record_value(record),
    })
}
