//! Bundle file persistence: read/write/verify a bundle at a path.
//!
//! The single read here is the verifier's only I/O: bytes are acquired in
//! one scoped `fs::read` and verification proceeds entirely in memory.
//! Writes go through a temp-file-then-rename so a crashed author never
//! leaves a half-written bundle at the target path. The path itself is
//! never part of any hash surface.

use std::path::Path;

use crate::bundle::AuditBundleV1;
use crate::bundle_text::render_bundle_text;
use crate::report::FinalVerdict;
use crate::runner::verify_bundle_bytes;

/// Error touching a bundle file.
#[derive(Debug)]
pub enum BundleFileError {
    /// I/O failure (the verification pipeline itself never does I/O).
    Io { path: String, detail: String },
}

impl std::fmt::Display for BundleFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, detail } => write!(f, "I/O error on {path}: {detail}"),
        }
    }
}

impl std::error::Error for BundleFileError {}

/// Read a bundle file's bytes.
///
/// # Errors
///
/// Returns [`BundleFileError::Io`] if the file cannot be read.
pub fn read_bundle_file(path: &Path) -> Result<Vec<u8>, BundleFileError> {
    std::fs::read(path).map_err(|e| BundleFileError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })
}

/// Write a bundle's canonical text to a path, atomically.
///
/// # Errors
///
/// Returns [`BundleFileError::Io`] on write or rename failure.
pub fn write_bundle_file(bundle: &AuditBundleV1, path: &Path) -> Result<(), BundleFileError> {
    write_atomic(path, &render_bundle_text(&bundle.sections))
}

/// Read and verify the bundle at `path`.
///
/// I/O faults are `Err`; every in-band problem (framing, hashes, rule)
/// is a FAIL verdict, not an error.
///
/// # Errors
///
/// Returns [`BundleFileError::Io`] only when the file cannot be read.
pub fn verify_bundle_file(path: &Path) -> Result<FinalVerdict, BundleFileError> {
    Ok(verify_bundle_bytes(&read_bundle_file(path)?))
}

/// Write to a temp file in the same directory, then rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), BundleFileError> {
    let io_err = |detail: String| BundleFileError::Io {
        path: path.display().to_string(),
        detail,
    };

    let dir = path
        .parent()
        .ok_or_else(|| io_err("no parent directory".to_string()))?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content)
        .map_err(|e| io_err(format!("write {}: {e}", temp_path.display())))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| io_err(format!("rename {} → {}: {e}", temp_path.display(), path.display())))
}
