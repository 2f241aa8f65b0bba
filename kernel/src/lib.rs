//! Meridian Kernel: the deterministic computation core of the verifier.
//!
//! # API Surface
//!
//! The kernel exposes four entry points:
//!
//! - [`codec::decode_trace`] -- radix-64 text → binary64 samples
//! - [`rule::window::extract_windows`] -- half-open pre/post slicing
//! - [`rule::step::evaluate_step`] -- robust step statistic + classification
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 digests
//!
//! # Module Dependency Direction
//!
//! `proof` and `codec` depend on nothing internal; `rule` depends on
//! `codec` (for `TraceV1`). One-way only. No cycles.
//!
//! Everything here is a pure function of its arguments: no clock, no
//! filesystem, no environment. Identical inputs give identical outputs,
//! bit for bit — that property is what makes third-party re-verification
//! possible at all.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod proof;
pub mod rule;
