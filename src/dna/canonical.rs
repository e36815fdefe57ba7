//! Canonical form: the normalized, order-independent, precision-bounded
//! projection of a blob configuration used as hash input.
//!
//! Two configurations that are equal up to the rounding and color
//! normalization rules here MUST serialize to identical bytes. The JSON
//! field order is part of the fingerprint contract: struct fields are
//! declared in lexicographic key order at every nesting level, so serde's
//! declaration-order serialization yields sorted keys without depending on
//! any map implementation detail.

use serde::Serialize;

use crate::dna::config::BlobConfig;
use crate::error::BlobError;

/// Decimal places kept for spike and time parameters.
const SPIKE_TIME_DECIMALS: u32 = 3;
/// Rotation keeps one more digit; rotation differences are visually subtler.
const ROTATION_DECIMALS: u32 = 4;
/// Scale and opacity are coarse display-level values.
const SCALE_OPACITY_DECIMALS: u32 = 2;

/// A per-axis triple in canonical key order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Three normalized colors in canonical key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorTriple {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// Canonicalized blob configuration.
///
/// Field declaration order IS the serialized key order; keep it
/// lexicographic when editing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalForm {
    #[serde(rename = "baseScale")]
    pub base_scale: f64,
    pub colors: ColorTriple,
    pub opacity: f64,
    pub resolution: u32,
    pub rotation: Axes,
    pub shininess: i64,
    pub skin: &'static str,
    pub spikes: Axes,
    pub time: Axes,
    pub wireframe: u8,
}

impl CanonicalForm {
    /// Project a configuration onto its canonical form.
    ///
    /// Purely numeric/string normalization; domain validation happened at
    /// the configuration-construction boundary. The only failure mode is a
    /// malformed color string, surfaced as a typed error rather than a
    /// silently wrong fingerprint.
    pub fn from_config(config: &BlobConfig) -> Result<Self, BlobError> {
        Ok(Self {
            base_scale: round_to(config.base_scale, SCALE_OPACITY_DECIMALS),
            colors: ColorTriple {
                x: normalize_color(&config.colors[0])?,
                y: normalize_color(&config.colors[1])?,
                z: normalize_color(&config.colors[2])?,
            },
            opacity: round_to(config.opacity, SCALE_OPACITY_DECIMALS),
            resolution: config.resolution,
            rotation: round_axes(config.rotation, ROTATION_DECIMALS),
            shininess: config.shininess.round() as i64,
            skin: config.skin.name(),
            spikes: round_axes(config.spikes, SPIKE_TIME_DECIMALS),
            time: round_axes(config.time, SPIKE_TIME_DECIMALS),
            wireframe: config.wireframe as u8,
        })
    }

    /// Deterministic serialization: compact JSON, sorted keys, no
    /// whitespace. This exact byte sequence is what gets hashed.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("canonical form serializes infallibly")
    }
}

fn round_axes(values: [f64; 3], decimals: u32) -> Axes {
    Axes {
        x: round_to(values[0], decimals),
        y: round_to(values[1], decimals),
        z: round_to(values[2], decimals),
    }
}

/// Round to `decimals` decimal places.
///
/// Magnitudes large enough to overflow the scaling multiply have no
/// fractional digits left to round and pass through unchanged, so maximal
/// inputs never turn into infinities.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Collapse -0.0: it compares equal to 0.0 but serializes differently,
    // which would split one canonical value into two fingerprints
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Normalize a color string to 6 lowercase hex digits.
///
/// Strips a leading `#`, lowercases, expands 3-digit shorthand by doubling
/// each digit, and truncates 8-digit (alpha) forms to the first 6 digits.
pub fn normalize_color(color: &str) -> Result<String, BlobError> {
    let hex = color
        .strip_prefix('#')
        .unwrap_or(color)
        .to_ascii_lowercase();

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BlobError::InvalidColorFormat(color.to_string()));
    }

    match hex.len() {
        3 => Ok(hex.chars().flat_map(|c| [c, c]).collect()),
        6 => Ok(hex),
        8 => Ok(hex[..6].to_string()),
        _ => Err(BlobError::InvalidColorFormat(color.to_string())),
    }
}

/// Parse a color string into linear RGB components in [0, 1].
pub fn color_to_rgb(color: &str) -> Result<[f32; 3], BlobError> {
    let hex = normalize_color(color)?;
    let byte = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).expect("normalized hex digits")
    };
    Ok([
        byte(0..2) as f32 / 255.0,
        byte(2..4) as f32 / 255.0,
        byte(4..6) as f32 / 255.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::config::BlobConfig;

    #[test]
    fn test_round_to_precision_floor() {
        assert_eq!(round_to(1.0000001, 3), 1.0);
        assert_eq!(round_to(1.2346, 3), 1.235);
        assert_eq!(round_to(1.0006, 3), 1.001);
        assert_eq!(round_to(0.55551, 4), 0.5555);
    }

    #[test]
    fn test_round_to_collapses_negative_zero() {
        let rounded = round_to(-0.0004, 3);
        assert_eq!(rounded.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_round_to_survives_extremes() {
        assert!(round_to(f64::MAX, 3).is_finite());
        assert!(round_to(-f64::MAX, 4).is_finite());
        assert_eq!(round_to(0.0, 3), 0.0);
    }

    #[test]
    fn test_normalize_color_forms() {
        assert_eq!(normalize_color("#F0A").unwrap(), "ff00aa");
        assert_eq!(normalize_color("#ff00aa").unwrap(), "ff00aa");
        assert_eq!(normalize_color("FF00AA").unwrap(), "ff00aa");
        assert_eq!(normalize_color("#ff00aabb").unwrap(), "ff00aa");
        assert_eq!(normalize_color("abc").unwrap(), "aabbcc");
    }

    #[test]
    fn test_normalize_color_rejects_malformed() {
        for bad in ["#zzz", "#ff00", "", "#1234567", "not a color"] {
            assert!(
                matches!(normalize_color(bad), Err(BlobError::InvalidColorFormat(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb("#ff0000").unwrap(), [1.0, 0.0, 0.0]);
        let [r, g, b] = color_to_rgb("#336699").unwrap();
        assert!((r - 0.2).abs() < 1e-6);
        assert!((g - 0.4).abs() < 1e-6);
        assert!((b - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_json_keys_are_sorted_at_every_level() {
        let canonical = CanonicalForm::from_config(&BlobConfig::default()).unwrap();
        let json = canonical.to_json();

        let top_keys = [
            "baseScale",
            "colors",
            "opacity",
            "resolution",
            "rotation",
            "shininess",
            "skin",
            "spikes",
            "time",
            "wireframe",
        ];
        let mut last = 0;
        for key in top_keys {
            let pos = json.find(&format!("\"{key}\"")).expect(key);
            assert!(pos > last || last == 0, "{key} out of order in {json}");
            last = pos;
        }
        // Nested triples sort x < y < z
        assert!(json.contains(r#""spikes":{"x":0.2,"y":0.2,"z":0.2}"#));
    }

    #[test]
    fn test_canonical_json_of_default_config() {
        let canonical = CanonicalForm::from_config(&BlobConfig::default()).unwrap();
        assert_eq!(
            canonical.to_json(),
            concat!(
                r#"{"baseScale":1.0,"#,
                r#""colors":{"x":"ff0000","y":"00ff00","z":"0000ff"},"#,
                r#""opacity":1.0,"resolution":180,"#,
                r#""rotation":{"x":0.0,"y":0.0,"z":0.0},"#,
                r#""shininess":50,"skin":"tricolor","#,
                r#""spikes":{"x":0.2,"y":0.2,"z":0.2},"#,
                r#""time":{"x":1.0,"y":1.0,"z":1.0},"wireframe":0}"#
            )
        );
    }

    #[test]
    fn test_equal_up_to_rounding_canonicalizes_identically() {
        let mut a = BlobConfig::default();
        let mut b = BlobConfig::default();
        a.spikes[0] = 1.0;
        b.spikes[0] = 1.0000001;

        assert_eq!(
            CanonicalForm::from_config(&a).unwrap(),
            CanonicalForm::from_config(&b).unwrap()
        );
    }
}
