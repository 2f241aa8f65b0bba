//! `adb.v1` bundle text framing: four delimited sections in fixed order.
//!
//! Fail-closed: missing, duplicate, reordered, or unterminated sections,
//! content outside sections, a missing final newline, or any CR byte are
//! typed [`BundleTextError`]s. Nothing is normalized on the way in — the
//! bytes that were hashed are the bytes that are checked.
//!
//! # Text layout
//!
//! ```text
//! -----BEGIN MANIFEST-----
//! <canonical JSON, one line>
//! -----END MANIFEST-----
//! -----BEGIN TRACE-----
//! <radix-64 payload, one line>
//! -----END TRACE-----
//! -----BEGIN VERIFIER-----
//! <verifier script text, any number of lines>
//! -----END VERIFIER-----
//! -----BEGIN HASHES-----
//! <canonical JSON hash listing, one line>
//! -----END HASHES-----
//! ```
//!
//! A section payload is the lines between its delimiters joined with `\n`
//! (no trailing newline). As in any delimiter-framed text format, a payload
//! line that spells a delimiter ends the section — the renderer never
//! produces such payloads and the parser fails closed on the leftovers.

/// Section names, in the only order a bundle may carry them.
pub const SECTION_ORDER: [&str; 4] = ["MANIFEST", "TRACE", "VERIFIER", "HASHES"];

/// The four section payloads of one bundle, as exact bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSectionsV1 {
    /// Manifest section payload (canonical JSON).
    pub manifest: Vec<u8>,
    /// Trace section payload (radix-64 text).
    pub trace: Vec<u8>,
    /// Verifier-script section payload.
    pub verifier: Vec<u8>,
    /// Hash-listing section payload (canonical JSON).
    pub hashes: Vec<u8>,
}

/// Typed failure while framing bundle text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleTextError {
    /// The bundle is not valid UTF-8.
    NotUtf8 { detail: String },
    /// A carriage return was found; bundle text is LF-only.
    CarriageReturn { line: usize },
    /// A line was not the delimiter the fixed section order requires.
    UnexpectedLine { line: usize, expected: String },
    /// A section's END delimiter never arrived.
    UnterminatedSection { section: &'static str },
    /// The final END delimiter is not followed by a newline.
    MissingFinalNewline,
    /// Content after the final section.
    TrailingContent { line: usize },
}

impl std::fmt::Display for BundleTextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotUtf8 { detail } => write!(f, "bundle text is not UTF-8: {detail}"),
            Self::CarriageReturn { line } => {
                write!(f, "carriage return on line {line}; bundle text is LF-only")
            }
            Self::UnexpectedLine { line, expected } => {
                write!(f, "line {line}: expected \"{expected}\"")
            }
            Self::UnterminatedSection { section } => {
                write!(f, "section {section} is never terminated")
            }
            Self::MissingFinalNewline => write!(f, "bundle text must end with a newline"),
            Self::TrailingContent { line } => {
                write!(f, "unexpected content after final section at line {line}")
            }
        }
    }
}

impl std::error::Error for BundleTextError {}

fn begin_line(section: &str) -> String {
    format!("-----BEGIN {section}-----")
}

fn end_line(section: &str) -> String {
    format!("-----END {section}-----")
}

/// Split bundle bytes into the four section payloads.
///
/// # Errors
///
/// Returns [`BundleTextError`] on any framing violation. Section payloads
/// are not interpreted here; the manifest and hash listing are parsed by
/// their own modules.
pub fn parse_bundle_text(bytes: &[u8]) -> Result<BundleSectionsV1, BundleTextError> {
    let text = std::str::from_utf8(bytes).map_err(|e| BundleTextError::NotUtf8 {
        detail: e.to_string(),
    })?;

    if let Some(offset) = text.find('\r') {
        return Err(BundleTextError::CarriageReturn {
            line: text[..offset].matches('\n').count() + 1,
        });
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let mut cursor = 0usize;
    let mut payloads: Vec<Vec<u8>> = Vec::with_capacity(SECTION_ORDER.len());

    for section in SECTION_ORDER {
        let begin = begin_line(section);
        if lines.get(cursor).copied() != Some(begin.as_str()) {
            return Err(BundleTextError::UnexpectedLine {
                line: cursor + 1,
                expected: begin,
            });
        }
        cursor += 1;

        let end = end_line(section);
        let payload_start = cursor;
        while cursor < lines.len() && lines[cursor] != end {
            cursor += 1;
        }
        if cursor == lines.len() {
            return Err(BundleTextError::UnterminatedSection { section });
        }
        payloads.push(lines[payload_start..cursor].join("\n").into_bytes());
        cursor += 1;
    }

    // A well-formed bundle ends "-----END HASHES-----\n", which leaves
    // exactly one empty trailing element after the split.
    match &lines[cursor..] {
        [""] => {}
        [] => return Err(BundleTextError::MissingFinalNewline),
        _ => return Err(BundleTextError::TrailingContent { line: cursor + 1 }),
    }

    let mut payloads = payloads.into_iter();
    Ok(BundleSectionsV1 {
        manifest: payloads.next().unwrap_or_default(),
        trace: payloads.next().unwrap_or_default(),
        verifier: payloads.next().unwrap_or_default(),
        hashes: payloads.next().unwrap_or_default(),
    })
}

/// Render section payloads as canonical bundle text. Inverse of
/// [`parse_bundle_text`] for payloads that contain no delimiter lines.
#[must_use]
pub fn render_bundle_text(sections: &BundleSectionsV1) -> Vec<u8> {
    let parts: [(&str, &[u8]); 4] = [
        ("MANIFEST", &sections.manifest),
        ("TRACE", &sections.trace),
        ("VERIFIER", &sections.verifier),
        ("HASHES", &sections.hashes),
    ];

    let mut out = Vec::new();
    for (section, payload) in parts {
        out.extend_from_slice(begin_line(section).as_bytes());
        out.push(b'\n');
        if !payload.is_empty() {
            out.extend_from_slice(payload);
            out.push(b'\n');
        }
        out.extend_from_slice(end_line(section).as_bytes());
        out.push(b'\n');
    }
    out
}
