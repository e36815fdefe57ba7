//! The DNA hasher: SHA-256 over the canonical serialization.
//!
//! The output format (64 lowercase hex characters for a 256-bit digest)
//! is a compatibility contract with the uniqueness registry; previously
//! stored fingerprints are compared byte-for-byte against what this module
//! produces.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::dna::canonical::CanonicalForm;
use crate::dna::config::BlobConfig;
use crate::error::BlobError;

/// Number of hex characters in a short display id.
const SHORT_ID_LEN: usize = 16;

/// A blob's DNA: an immutable 64-character lowercase hex fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dna(String);

impl Dna {
    /// The full 64-character fingerprint.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 16 hex characters, for display only, never a uniqueness
    /// decision.
    pub fn short_id(&self) -> &str {
        &self.0[..SHORT_ID_LEN]
    }
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl CanonicalForm {
    /// Hash this canonical form into a DNA fingerprint.
    pub fn fingerprint(&self) -> Dna {
        let mut hasher = Sha256::new();
        hasher.update(self.to_json().as_bytes());
        Dna(hex::encode(hasher.finalize()))
    }
}

/// Canonicalize and hash a configuration in one step.
pub fn fingerprint(config: &BlobConfig) -> Result<Dna, BlobError> {
    Ok(CanonicalForm::from_config(config)?.fingerprint())
}

/// True when both configurations produce the same fingerprint.
pub fn same_dna(a: &BlobConfig, b: &BlobConfig) -> Result<bool, BlobError> {
    Ok(fingerprint(a)? == fingerprint(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skin::SkinKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn base_config() -> BlobConfig {
        BlobConfig::builder()
            .spikes(1.0, 1.0, 1.0)
            .time(1.0, 1.0, 1.0)
            .rotation(0.0, 0.0, 0.0)
            .colors("#ff0000", "#00ff00", "#0000ff")
            .resolution(32)
            .shininess(0.5)
            .wireframe(false)
            .base_scale(1.0)
            .opacity(1.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_fingerprint_shape() {
        let dna = fingerprint(&base_config()).unwrap();
        assert_eq!(dna.as_str().len(), 64);
        assert!(dna.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(dna.as_str(), dna.as_str().to_lowercase());
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let config = base_config();
        let first = fingerprint(&config).unwrap();
        for _ in 0..100 {
            assert_eq!(fingerprint(&config).unwrap(), first);
        }
    }

    #[test]
    fn test_field_order_independence() {
        // Same logical configuration assembled in two different orders
        let a = BlobConfig::builder()
            .opacity(0.8)
            .skin(SkinKind::Zebra)
            .spikes(2.0, 1.0, 0.5)
            .resolution(64)
            .build()
            .unwrap();
        let b = BlobConfig::builder()
            .resolution(64)
            .spikes(2.0, 1.0, 0.5)
            .skin(SkinKind::Zebra)
            .opacity(0.8)
            .build()
            .unwrap();

        assert!(same_dna(&a, &b).unwrap());
    }

    #[test]
    fn test_every_field_is_sensitive() {
        let base = base_config();
        let base_dna = fingerprint(&base).unwrap();

        let variants: Vec<(&str, BlobConfig)> = vec![
            ("spikes.x", {
                let mut c = base.clone();
                c.spikes[0] = 1.1;
                c
            }),
            ("time.y", {
                let mut c = base.clone();
                c.time[1] = 1.1;
                c
            }),
            ("rotation.z", {
                let mut c = base.clone();
                c.rotation[2] = 0.01;
                c
            }),
            ("colors.x", {
                let mut c = base.clone();
                c.colors[0] = "#ff0001".to_string();
                c
            }),
            ("resolution", {
                let mut c = base.clone();
                c.resolution = 64;
                c
            }),
            ("skin", {
                let mut c = base.clone();
                c.skin = SkinKind::Zebra;
                c
            }),
            ("shininess", {
                let mut c = base.clone();
                c.shininess = 2.0;
                c
            }),
            ("wireframe", {
                let mut c = base.clone();
                c.wireframe = true;
                c
            }),
            ("base_scale", {
                let mut c = base.clone();
                c.base_scale = 1.5;
                c
            }),
            ("opacity", {
                let mut c = base.clone();
                c.opacity = 0.8;
                c
            }),
        ];

        for (field, variant) in variants {
            let dna = fingerprint(&variant).unwrap();
            assert_ne!(dna, base_dna, "changing {field} did not change the DNA");
        }
    }

    #[test]
    fn test_rounding_tolerance() {
        let base = base_config();

        let mut nudged = base.clone();
        nudged.spikes[0] = 1.0000001;
        assert!(same_dna(&base, &nudged).unwrap());

        let mut moved = base.clone();
        moved.spikes[0] = 1.001;
        assert!(!same_dna(&base, &moved).unwrap());
    }

    #[test]
    fn test_color_formats_canonicalize_together() {
        let make = |color: &str| {
            let mut c = base_config();
            c.colors[0] = color.to_string();
            c
        };

        let full = fingerprint(&make("#ff00aa")).unwrap();
        assert_eq!(fingerprint(&make("#F0A")).unwrap(), full);
        assert_eq!(fingerprint(&make("FF00AA")).unwrap(), full);
        assert_eq!(fingerprint(&make("#ff00aaff")).unwrap(), full);
    }

    #[test]
    fn test_no_collisions_across_random_configs() {
        let mut rng = StdRng::seed_from_u64(0xD7A);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let config = BlobConfig::random(&mut rng);
            let dna = fingerprint(&config).unwrap();
            assert!(seen.insert(dna.as_str().to_string()), "collision: {dna}");
        }
    }

    #[test]
    fn test_short_id_is_a_prefix() {
        let dna = fingerprint(&base_config()).unwrap();
        assert_eq!(dna.short_id().len(), 16);
        assert!(dna.as_str().starts_with(dna.short_id()));
    }

    #[test]
    fn test_extreme_configs_hash_without_error() {
        let mut config = base_config();
        config.spikes = [0.0, -5.0, f64::MAX];
        config.rotation = [-f64::MAX, 0.0, 123456.789];
        config.shininess = -1.0;
        let dna = fingerprint(&config).unwrap();
        assert_eq!(dna.as_str().len(), 64);
    }
}
