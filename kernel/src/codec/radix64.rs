//! Strict radix-64 (standard-alphabet base64) text codec.
//!
//! Wraps the `base64` crate's standard engine with this crate's error
//! type. Decode is strict: the standard alphabet with canonical `=`
//! padding, no whitespace, no embedded newlines. Any violation is a
//! [`DecodeError::MalformedEncoding`] — invalid characters are never
//! skipped or substituted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::codec::DecodeError;

/// Decode strict standard-alphabet base64 text into raw bytes.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedEncoding`] on any alphabet, length,
/// or padding violation.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD
        .decode(text.as_bytes())
        .map_err(|e| DecodeError::MalformedEncoding {
            detail: e.to_string(),
        })
}

/// Encode raw bytes as one line of standard-alphabet base64 with padding.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
