//! Blob skins: a closed set of material variants and their uniform data.
//!
//! Skins are pure data here; whatever rendering layer owns the mesh turns
//! a [`SkinUniforms`] into its own material/shader objects.

use serde::{Deserialize, Serialize};

use crate::dna::canonical::color_to_rgb;
use crate::error::BlobError;

/// The closed set of skin variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinKind {
    #[default]
    Tricolor,
    Zebra,
}

impl SkinKind {
    pub const ALL: [SkinKind; 2] = [SkinKind::Tricolor, SkinKind::Zebra];

    /// Canonical lowercase name, the one that enters the DNA.
    pub fn name(&self) -> &'static str {
        match self {
            SkinKind::Tricolor => "tricolor",
            SkinKind::Zebra => "zebra",
        }
    }
}

/// Per-variant color data.
#[derive(Debug, Clone, PartialEq)]
pub enum SkinPalette {
    /// Three colors blended around the blob by position angle
    Tricolor {
        color1: [f32; 3],
        color2: [f32; 3],
        color3: [f32; 3],
    },
    /// Stripes are procedural; no palette uniforms
    Zebra,
}

/// Rendering-agnostic uniform data for a skin material.
#[derive(Debug, Clone, PartialEq)]
pub struct SkinUniforms {
    pub light_position: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    pub wireframe: bool,
    pub palette: SkinPalette,
}

impl SkinUniforms {
    /// Reference light position the skins were tuned with
    pub const LIGHT_POSITION: [f32; 3] = [0.0, 500.0, 200.0];

    /// Build uniforms for a skin variant.
    ///
    /// Colors are hex strings (tricolor only; zebra ignores them) and go
    /// through the same normalization as the DNA canonicalizer, so a
    /// malformed color fails here rather than rendering black.
    pub fn build(
        kind: SkinKind,
        colors: &[String; 3],
        shininess: f32,
        wireframe: bool,
    ) -> Result<Self, BlobError> {
        let palette = match kind {
            SkinKind::Tricolor => SkinPalette::Tricolor {
                color1: color_to_rgb(&colors[0])?,
                color2: color_to_rgb(&colors[1])?,
                color3: color_to_rgb(&colors[2])?,
            },
            SkinKind::Zebra => SkinPalette::Zebra,
        };

        Ok(Self {
            light_position: Self::LIGHT_POSITION,
            shininess,
            specular_color: [1.0, 1.0, 1.0],
            wireframe,
            palette,
        })
    }
}
