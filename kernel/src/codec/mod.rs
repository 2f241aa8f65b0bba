//! Trace codec: radix-64 text ↔ raw bytes ↔ IEEE-754 binary64 samples.
//!
//! Decoding is exact and fail-closed: no character substitution, no
//! truncation, no padding repair. Malformed text and partial samples are
//! typed [`DecodeError`]s, never best-effort values.

pub mod radix64;
pub mod trace;

pub use trace::TraceV1;

/// Typed failure while decoding a trace from its wire text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The radix-64 text violates the alphabet or padding rules.
    MalformedEncoding { detail: String },
    /// The decoded byte buffer is not a whole number of 8-byte samples.
    TruncatedTrace { byte_len: usize },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedEncoding { detail } => {
                write!(f, "malformed radix-64 encoding: {detail}")
            }
            Self::TruncatedTrace { byte_len } => {
                write!(f, "trace byte length {byte_len} is not a multiple of 8")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode radix-64 trace text into samples.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedEncoding`] for alphabet/padding
/// violations and [`DecodeError::TruncatedTrace`] when the decoded byte
/// count is not a multiple of 8.
pub fn decode_trace(text: &str) -> Result<TraceV1, DecodeError> {
    trace::decode_f64le(&radix64::decode(text)?)
}

/// Encode samples as one line of radix-64 trace text.
///
/// Inverse of [`decode_trace`]; round-trips exactly.
#[must_use]
pub fn encode_trace(trace: &TraceV1) -> String {
    radix64::encode(&trace::encode_f64le(trace))
}
