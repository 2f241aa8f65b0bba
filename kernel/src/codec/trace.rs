//! `TraceV1`: an ordered sequence of binary64 samples, plus its wire codec.
//!
//! # Wire layout
//!
//! ```text
//! [sample 0: f64le][sample 1: f64le]...[sample N-1: f64le]
//! ```
//!
//! Eight bytes per sample, little-endian, sample 0 first. NaN payloads are
//! preserved bit-for-bit: a NaN sample means "missing" and is handled by
//! statistics policy, not by the codec.

use crate::codec::DecodeError;

/// An immutable, 0-based sequence of binary64 samples.
///
/// Length is fixed at decode time. Values may be NaN (missing samples).
#[derive(Debug, Clone, PartialEq)]
pub struct TraceV1 {
    samples: Vec<f64>,
}

impl TraceV1 {
    /// Wrap a sample vector.
    #[must_use]
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples }
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the trace holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples, in order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Reinterpret raw bytes as consecutive f64le samples.
///
/// # Errors
///
/// Returns [`DecodeError::TruncatedTrace`] when the byte count is not a
/// multiple of 8. No partial samples.
pub fn decode_f64le(bytes: &[u8]) -> Result<TraceV1, DecodeError> {
    if bytes.len() % 8 != 0 {
        return Err(DecodeError::TruncatedTrace {
            byte_len: bytes.len(),
        });
    }
    let samples = bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect();
    Ok(TraceV1::new(samples))
}

/// Serialize samples as consecutive f64le bytes. Inverse of [`decode_f64le`].
#[must_use]
pub fn encode_f64le(trace: &TraceV1) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(trace.len() * 8);
    for sample in trace.samples() {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    bytes
}
