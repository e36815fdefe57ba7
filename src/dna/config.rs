//! The blob configuration value type: everything that defines a blob's
//! body form, and nothing that doesn't (no background, no audio effects).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dna::canonical::normalize_color;
use crate::dna::hash::{self, Dna};
use crate::error::BlobError;
use crate::params::DeformParams;
use crate::skin::{SkinKind, SkinUniforms};

/// A blob's body configuration: a pure value type, the input to DNA
/// fingerprinting.
///
/// Construct through [`BlobConfig::builder`] to get validation and the
/// documented defaults; the fields stay public for test fixtures and
/// direct tweaking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobConfig {
    /// Sphere segments per axis
    pub resolution: u32,
    /// Noise spatial frequency per axis
    pub spikes: [f64; 3],
    /// Noise temporal rate per axis
    pub time: [f64; 3],
    /// Per-frame Euler rotation increment per axis (radians)
    pub rotation: [f64; 3],
    /// Skin colors as hex strings (tricolor uses all three)
    pub colors: [String; 3],
    pub shininess: f64,
    pub wireframe: bool,
    pub skin: SkinKind,
    /// Uniform base scale, 1.0 unless the host overrides it
    pub base_scale: f64,
    /// Material opacity, 1.0 unless the host overrides it
    pub opacity: f64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            resolution: 180,
            spikes: [0.2, 0.2, 0.2],
            time: [1.0, 1.0, 1.0],
            rotation: [0.0, 0.0, 0.0],
            colors: [
                "#ff0000".to_string(),
                "#00ff00".to_string(),
                "#0000ff".to_string(),
            ],
            shininess: 50.0,
            wireframe: false,
            skin: SkinKind::Tricolor,
            base_scale: 1.0,
            opacity: 1.0,
        }
    }
}

impl BlobConfig {
    pub fn builder() -> BlobConfigBuilder {
        BlobConfigBuilder::default()
    }

    /// Compute this configuration's DNA fingerprint.
    pub fn fingerprint(&self) -> Result<Dna, BlobError> {
        hash::fingerprint(self)
    }

    /// True when both configurations canonicalize to the same DNA.
    pub fn same_dna(&self, other: &BlobConfig) -> Result<bool, BlobError> {
        hash::same_dna(self, other)
    }

    /// Bridge to the deformation engine's per-axis parameters.
    pub fn deform_params(&self) -> DeformParams {
        DeformParams {
            spikes: [
                self.spikes[0] as f32,
                self.spikes[1] as f32,
                self.spikes[2] as f32,
            ],
            times: [
                self.time[0] as f32,
                self.time[1] as f32,
                self.time[2] as f32,
            ],
        }
    }

    /// Material uniform data for this configuration's skin.
    pub fn skin_uniforms(&self) -> Result<SkinUniforms, BlobError> {
        SkinUniforms::build(
            self.skin,
            &self.colors,
            self.shininess as f32,
            self.wireframe,
        )
    }

    /// Draw a random configuration, each field from its documented range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let random_color = |rng: &mut R| format!("#{:06x}", rng.gen_range(0u32..0x1000000));
        let round2 = |v: f64| (v * 100.0).round() / 100.0;

        Self {
            resolution: rng.gen_range(120..=220),
            spikes: std::array::from_fn(|_| round2(rng.gen_range(0.2..6.0))),
            time: std::array::from_fn(|_| round2(rng.gen_range(0.0..2.0))),
            rotation: std::array::from_fn(|_| (rng.gen_range(0.0f64..0.02) * 10000.0).round() / 10000.0),
            colors: std::array::from_fn(|_| random_color(rng)),
            shininess: rng.gen_range(0.0f64..1000.0).round(),
            wireframe: rng.gen_bool(0.1),
            skin: if rng.gen_bool(0.5) {
                SkinKind::Tricolor
            } else {
                SkinKind::Zebra
            },
            base_scale: round2(rng.gen_range(0.5..1.5)),
            opacity: round2(rng.gen_range(0.2..1.0)),
        }
    }
}

/// Builder applying the documented defaults and validating at the
/// construction boundary, so canonicalization never has to guess about
/// absence vs. zero.
#[derive(Debug, Clone, Default)]
pub struct BlobConfigBuilder {
    config: BlobConfig,
}

impl BlobConfigBuilder {
    pub fn resolution(mut self, resolution: u32) -> Self {
        self.config.resolution = resolution;
        self
    }

    pub fn spikes(mut self, x: f64, y: f64, z: f64) -> Self {
        self.config.spikes = [x, y, z];
        self
    }

    pub fn time(mut self, x: f64, y: f64, z: f64) -> Self {
        self.config.time = [x, y, z];
        self
    }

    pub fn rotation(mut self, x: f64, y: f64, z: f64) -> Self {
        self.config.rotation = [x, y, z];
        self
    }

    pub fn colors(
        mut self,
        x: impl Into<String>,
        y: impl Into<String>,
        z: impl Into<String>,
    ) -> Self {
        self.config.colors = [x.into(), y.into(), z.into()];
        self
    }

    pub fn shininess(mut self, shininess: f64) -> Self {
        self.config.shininess = shininess;
        self
    }

    pub fn wireframe(mut self, wireframe: bool) -> Self {
        self.config.wireframe = wireframe;
        self
    }

    pub fn skin(mut self, skin: SkinKind) -> Self {
        self.config.skin = skin;
        self
    }

    pub fn base_scale(mut self, base_scale: f64) -> Self {
        self.config.base_scale = base_scale;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.config.opacity = opacity;
        self
    }

    /// Validate and produce the configuration.
    ///
    /// Rejects resolutions below 3 segments, colors that don't normalize,
    /// and non-finite numeric fields (which would poison the canonical
    /// serialization).
    pub fn build(self) -> Result<BlobConfig, BlobError> {
        let config = self.config;

        if config.resolution < 3 {
            return Err(BlobError::InvalidResolution(config.resolution));
        }
        for color in &config.colors {
            normalize_color(color)?;
        }

        let numeric = config
            .spikes
            .iter()
            .chain(&config.time)
            .chain(&config.rotation)
            .chain([&config.shininess, &config.base_scale, &config.opacity]);
        for value in numeric {
            if !value.is_finite() {
                return Err(BlobError::NonFiniteValue(*value));
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builder_applies_defaults() {
        let config = BlobConfig::builder().build().unwrap();
        assert_eq!(config, BlobConfig::default());
        assert_eq!(config.base_scale, 1.0);
        assert_eq!(config.opacity, 1.0);
    }

    #[test]
    fn test_builder_rejects_bad_resolution() {
        let result = BlobConfig::builder().resolution(2).build();
        assert!(matches!(result, Err(BlobError::InvalidResolution(2))));
    }

    #[test]
    fn test_builder_rejects_bad_color() {
        let result = BlobConfig::builder()
            .colors("#ff0000", "oops", "#0000ff")
            .build();
        assert!(matches!(result, Err(BlobError::InvalidColorFormat(_))));
    }

    #[test]
    fn test_builder_rejects_non_finite() {
        let result = BlobConfig::builder().shininess(f64::NAN).build();
        assert!(matches!(result, Err(BlobError::NonFiniteValue(_))));
        let result = BlobConfig::builder().spikes(f64::INFINITY, 1.0, 1.0).build();
        assert!(matches!(result, Err(BlobError::NonFiniteValue(_))));
    }

    #[test]
    fn test_random_configs_are_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let config = BlobConfig::random(&mut rng);
            assert!(config.resolution >= 3);
            for color in &config.colors {
                normalize_color(color).unwrap();
            }
            assert!(config.fingerprint().is_ok());
        }
    }

    #[test]
    fn test_deform_params_bridge() {
        let config = BlobConfig::builder()
            .spikes(0.5, 1.5, 2.5)
            .time(1.0, 2.0, 3.0)
            .build()
            .unwrap();
        let params = config.deform_params();
        assert_eq!(params.spikes, [0.5, 1.5, 2.5]);
        assert_eq!(params.times, [1.0, 2.0, 3.0]);
    }
}
