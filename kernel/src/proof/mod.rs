//! Proof module: canonical hashing and canonical JSON.
//!
//! Every digest in the workspace is produced here: one canonicalizer
//! ([`canon::canonical_json_bytes`]), one hash function
//! ([`hash::canonical_hash`]), one domain-separator authority
//! ([`hash_domain::HashDomain`]).

pub mod canon;
pub mod hash;
pub mod hash_domain;
