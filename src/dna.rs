//! DNA fingerprinting: canonicalize a blob configuration and hash it.
//!
//! A blob's DNA is the SHA-256 digest of its canonicalized body
//! configuration, rendered as 64 lowercase hex characters. Equality of two
//! fingerprints is the sole uniqueness signal the registry relies on, so
//! everything in this module is deterministic down to the byte.

pub mod canonical;
pub mod config;
pub mod hash;

pub use canonical::CanonicalForm;
pub use config::{BlobConfig, BlobConfigBuilder};
pub use hash::{fingerprint, same_dna, Dna};
