//! Deformation parameters and engine tuning constants.

/// Per-axis deformation parameters, owned by the caller (UI or state
/// layer); the engine only reads them each tick.
#[derive(Debug, Clone, Copy)]
pub struct DeformParams {
    /// Noise spatial frequency per axis ("pointiness" of the bumps).
    /// Values below the engine's spike floor are clamped up.
    pub spikes: [f32; 3],

    /// Noise temporal rate per axis (animation speed along that axis)
    pub times: [f32; 3],
}

impl Default for DeformParams {
    fn default() -> Self {
        Self {
            spikes: [0.2, 0.2, 0.2],
            times: [1.0, 1.0, 1.0],
        }
    }
}

/// Engine tuning constants with their reference values.
#[derive(Debug, Clone)]
pub struct DeformTuning {
    /// Minimum effective spike value; avoids degenerate zero-frequency
    /// noise where the whole mesh moves as one rigid lump.
    /// Reference value: 0.025
    pub spike_floor: f32,

    /// Wall-clock milliseconds are multiplied by this before use, keeping
    /// motion speeds human-perceptible.
    /// Reference value: 1e-5
    pub time_reduction: f64,

    /// Divisor mapping the raw spectrum average (0-255) to whole-mesh
    /// scale: `1 + avg * 2 / scale_divisor`.
    /// Reference value: 900.0
    pub scale_divisor: f32,

    /// Displacement amplitude with silent audio.
    /// Reference value: 0.18
    pub amp_base: f32,

    /// Extra amplitude at full spectrum loudness (avg = 255).
    /// Reference value: 0.18
    pub amp_audio: f32,

    /// Seed for the noise field
    pub noise_seed: u32,

    /// Band weights for the liquid variant
    pub liquid: LiquidWeights,
}

impl Default for DeformTuning {
    fn default() -> Self {
        Self {
            spike_floor: 0.025,
            time_reduction: 1e-5,
            scale_divisor: 900.0,
            amp_base: 0.18,
            amp_audio: 0.18,
            noise_seed: 42,
            liquid: LiquidWeights::default(),
        }
    }
}

/// Band-to-amplitude weights for the liquid deformation variant.
///
/// Directional factors keep the worst-case combined amplitude below 1.0,
/// which bounds every displaced radius to (0, 2).
#[derive(Debug, Clone)]
pub struct LiquidWeights {
    /// Amplitude floor independent of audio.
    /// Reference value: 0.12
    pub base: f32,

    /// Bass weight, strongest toward the bottom of the blob.
    /// Reference value: 0.25
    pub low: f32,

    /// Mid weight, carried by the angular "speaking" wobble.
    /// Reference value: 0.35
    pub mid: f32,

    /// High weight, strongest toward the top.
    /// Reference value: 0.25
    pub high: f32,

    /// Ultra weight, scaled by the radial factor (equator).
    /// Reference value: 0.15
    pub ultra: f32,

    /// Angular speed of the mid-band wobble term (radians per reduced
    /// time unit).
    /// Reference value: 150.0
    pub wobble_rate: f64,

    /// Spatial scale of the second, finer noise octave.
    /// Reference value: 2.5
    pub octave2_scale: f32,

    /// Blend of the two noise octaves (first, second); sums to 1.
    /// Reference value: (0.7, 0.3)
    pub octave_blend: (f32, f32),

    /// Low-band contribution to whole-mesh scale ("breathing").
    /// Reference value: 0.08
    pub breathing: f32,
}

impl Default for LiquidWeights {
    fn default() -> Self {
        Self {
            base: 0.12,
            low: 0.25,
            mid: 0.35,
            high: 0.25,
            ultra: 0.15,
            wobble_rate: 150.0,
            octave2_scale: 2.5,
            octave_blend: (0.7, 0.3),
            breathing: 0.08,
        }
    }
}
