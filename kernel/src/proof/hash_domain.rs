//! Typed domain separators for canonical hashing.
//!
//! Every production hash computation MUST select a domain via [`HashDomain`].
//! This module is the single authority for domain-separator byte strings.
//! Adding a new domain is a single change here — the enum, `as_bytes()`,
//! `ALL`, and `Display` are all generated from the same macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix. Reusing one domain for two distinct hash surfaces
        /// would let one surface forge the other; the lock tests pin the set.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            ///
            /// Generated from the same macro invocation as the enum — cannot diverge.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    /// Manifest core hashing: the manifest object with its `hashes` and
    /// `bundle_hash` members removed. Breaks the self-reference cycle —
    /// a digest can never cover the bytes that carry it.
    ManifestCore => b"MERIDIAN::MANIFEST_CORE::V1\0",

    /// Bundle section payload hashing (trace text, verifier text).
    BundleSection => b"MERIDIAN::BUNDLE_SECTION::V1\0",

    /// Whole-bundle digest over the length-prefixed canonical surface
    /// (manifest core + trace payload + verifier payload).
    BundleDigest => b"MERIDIAN::BUNDLE_DIGEST::V1\0",
}
