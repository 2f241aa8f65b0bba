//! `ManifestV1`: strongly-typed manifest parsing with explicit field checks.
//!
//! Fail-closed on every axis: missing or mistyped required fields, unknown
//! top-level fields, a non-canonical payload, an unsupported format
//! version, and malformed digest strings are all typed [`ManifestError`]s
//! at parse time. Nothing downstream ever reaches into raw JSON.
//!
//! `provenance` is the single sanctioned extension point; it is carried
//! verbatim and never interpreted.

use meridian_kernel::proof::canon::is_canonical_json;
use meridian_kernel::proof::hash::ContentHash;

/// Bundle format version this verifier accepts.
pub const FORMAT_VERSION: &str = "adb.v1";

/// Top-level manifest fields, all required.
const MANIFEST_FIELDS: [&str; 9] = [
    "boundary_index",
    "bundle_hash",
    "format_version",
    "hashes",
    "provenance",
    "rule_id",
    "trace_len",
    "w_post",
    "w_pre",
];

/// Component keys of the `hashes` record, all required.
const RECORD_FIELDS: [&str; 3] = ["manifest", "trace", "verifier"];

/// Recorded digests for the three hashable components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRecordV1 {
    /// Digest of the manifest core (manifest minus `hashes`/`bundle_hash`).
    pub manifest: ContentHash,
    /// Digest of the trace section payload (the radix-64 text).
    pub trace: ContentHash,
    /// Digest of the verifier section payload.
    pub verifier: ContentHash,
}

/// A parsed, validated manifest. Immutable; downstream code only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestV1 {
    /// Bundle format version (`"adb.v1"`).
    pub format_version: String,
    /// Boundary rule the producer claims was applied.
    pub rule_id: String,
    /// Claimed boundary sample index `b`.
    pub boundary_index: u64,
    /// Pre-window width (samples before `b`). Always > 0.
    pub w_pre: u64,
    /// Post-window width (samples at and after `b`). Always > 0.
    pub w_post: u64,
    /// Declared trace length in samples.
    pub trace_len: u64,
    /// Free-form producer metadata. Never interpreted.
    pub provenance: serde_json::Map<String, serde_json::Value>,
    /// Recorded component digests.
    pub hashes: HashRecordV1,
    /// Recorded whole-bundle digest.
    pub bundle_hash: ContentHash,
}

impl ManifestV1 {
    /// The manifest core as a JSON value: every field except `hashes` and
    /// `bundle_hash`. This is the surface `hashes.manifest` commits to.
    #[must_use]
    pub fn core_value(&self) -> serde_json::Value {
        serde_json::json!({
            "format_version": self.format_version,
            "rule_id": self.rule_id,
            "boundary_index": self.boundary_index,
            "w_pre": self.w_pre,
            "w_post": self.w_post,
            "trace_len": self.trace_len,
            "provenance": serde_json::Value::Object(self.provenance.clone()),
        })
    }
}

/// Typed failure while parsing a manifest payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// The payload is not valid JSON.
    Parse { detail: String },
    /// The payload is valid JSON but not an object.
    NotObject,
    /// The payload bytes are not in canonical JSON form.
    NotCanonical,
    /// A required field is absent.
    MissingField { field: &'static str },
    /// A field holds the wrong JSON type.
    FieldType {
        field: &'static str,
        expected: &'static str,
    },
    /// A top-level field this format does not define.
    UnknownField { field: String },
    /// `format_version` names a format this verifier does not implement.
    UnsupportedFormatVersion { found: String },
    /// A window width of zero can never support the rule.
    ZeroWindow { field: &'static str },
    /// A digest string is not `"sha256:<hex>"`.
    InvalidDigest { field: String, found: String },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { detail } => write!(f, "manifest is not valid JSON: {detail}"),
            Self::NotObject => write!(f, "manifest is not a JSON object"),
            Self::NotCanonical => write!(f, "manifest payload is not canonical JSON"),
            Self::MissingField { field } => write!(f, "manifest field \"{field}\" is missing"),
            Self::FieldType { field, expected } => {
                write!(f, "manifest field \"{field}\" is not {expected}")
            }
            Self::UnknownField { field } => {
                write!(f, "manifest field \"{field}\" is not part of {FORMAT_VERSION}")
            }
            Self::UnsupportedFormatVersion { found } => {
                write!(
                    f,
                    "unsupported bundle format \"{found}\" (expected {FORMAT_VERSION})"
                )
            }
            Self::ZeroWindow { field } => write!(f, "manifest field \"{field}\" must be > 0"),
            Self::InvalidDigest { field, found } => {
                write!(f, "manifest field \"{field}\" is not a sha256 digest: \"{found}\"")
            }
        }
    }
}

impl std::error::Error for ManifestError {}

/// Parse and validate a manifest section payload.
///
/// # Errors
///
/// Returns [`ManifestError`] on any structural or canonical-form
/// violation. A manifest that parses is fully usable: every required
/// field is present, typed, and in range.
pub fn parse_manifest(payload: &[u8]) -> Result<ManifestV1, ManifestError> {
    let value: serde_json::Value =
        serde_json::from_slice(payload).map_err(|e| ManifestError::Parse {
            detail: e.to_string(),
        })?;
    let obj = value.as_object().ok_or(ManifestError::NotObject)?;

    if !is_canonical_json(payload) {
        return Err(ManifestError::NotCanonical);
    }

    for key in obj.keys() {
        if !MANIFEST_FIELDS.contains(&key.as_str()) {
            return Err(ManifestError::UnknownField { field: key.clone() });
        }
    }

    let format_version = get_string(obj, "format_version")?;
    if format_version != FORMAT_VERSION {
        return Err(ManifestError::UnsupportedFormatVersion {
            found: format_version,
        });
    }

    let rule_id = get_string(obj, "rule_id")?;
    let boundary_index = get_u64(obj, "boundary_index")?;
    let w_pre = get_u64(obj, "w_pre")?;
    let w_post = get_u64(obj, "w_post")?;
    let trace_len = get_u64(obj, "trace_len")?;

    if w_pre == 0 {
        return Err(ManifestError::ZeroWindow { field: "w_pre" });
    }
    if w_post == 0 {
        return Err(ManifestError::ZeroWindow { field: "w_post" });
    }

    let provenance = get_object(obj, "provenance")?.clone();

    let record = get_object(obj, "hashes")?;
    for key in record.keys() {
        if !RECORD_FIELDS.contains(&key.as_str()) {
            return Err(ManifestError::UnknownField {
                field: format!("hashes.{key}"),
            });
        }
    }
    let hashes = HashRecordV1 {
        manifest: get_digest(record, "manifest")?,
        trace: get_digest(record, "trace")?,
        verifier: get_digest(record, "verifier")?,
    };

    let bundle_hash = parse_digest("bundle_hash", &get_string(obj, "bundle_hash")?)?;

    Ok(ManifestV1 {
        format_version,
        rule_id,
        boundary_index,
        w_pre,
        w_post,
        trace_len,
        provenance,
        hashes,
        bundle_hash,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn get_string(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<String, ManifestError> {
    match obj.get(field) {
        None => Err(ManifestError::MissingField { field }),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ManifestError::FieldType {
            field,
            expected: "a string",
        }),
    }
}

fn get_u64(
    obj: &serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<u64, ManifestError> {
    match obj.get(field) {
        None => Err(ManifestError::MissingField { field }),
        Some(value) => value.as_u64().ok_or(ManifestError::FieldType {
            field,
            expected: "a non-negative integer",
        }),
    }
}

fn get_object<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<&'a serde_json::Map<String, serde_json::Value>, ManifestError> {
    match obj.get(field) {
        None => Err(ManifestError::MissingField { field }),
        Some(value) => value.as_object().ok_or(ManifestError::FieldType {
            field,
            expected: "an object",
        }),
    }
}

fn get_digest(
    record: &serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<ContentHash, ManifestError> {
    match record.get(field) {
        None => Err(ManifestError::MissingField { field }),
        Some(serde_json::Value::String(s)) => parse_digest(field, s),
        Some(_) => Err(ManifestError::FieldType {
            field,
            expected: "a digest string",
        }),
    }
}

fn parse_digest(field: &str, s: &str) -> Result<ContentHash, ManifestError> {
    ContentHash::parse(s)
        .filter(|h| h.algorithm() == "sha256")
        .ok_or_else(|| ManifestError::InvalidDigest {
            field: field.to_string(),
            found: s.to_string(),
        })
}
