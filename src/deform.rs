//! The deformation engine: per-tick vertex displacement driven by the
//! audio spectrum.
//!
//! Each tick maps every rest direction of the unit sphere to a displaced
//! position `dir * (1 + amplitude * noise)` and returns a whole-mesh scale
//! factor for the render transform. The engine is stateless across ticks;
//! the only moving inputs are the caller's elapsed-time source and the
//! caller-owned spike/time parameters.

use std::f32::consts::PI;

use crate::mesh::BlobMesh;
use crate::noise::NoiseField;
use crate::params::{DeformParams, DeformTuning};
use crate::spectrum::{self, BandIntensities, SPECTRUM_MAX};

/// Which deformation algorithm drives the blob.
///
/// The two variants are not bit-compatible and are never blended.
/// `Uniform` is the canonical algorithm; `Liquid` is the band-weighted
/// historical variant, kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeformMode {
    /// Whole-spectrum average drives a single amplitude and mesh scale
    #[default]
    Uniform,
    /// Band intensities drive direction-dependent amplitudes; mesh scale
    /// breathes on the low band only
    Liquid,
}

/// Audio-reactive vertex displacement engine.
///
/// Holds the seeded noise field and tuning constants; safe to share
/// read-only once constructed. Not meant for concurrent ticks on the same
/// mesh, which `&mut BlobMesh` already rules out.
pub struct DeformationEngine {
    noise: NoiseField,
    tuning: DeformTuning,
    mode: DeformMode,
}

impl DeformationEngine {
    pub fn new(mode: DeformMode, tuning: DeformTuning) -> Self {
        Self {
            noise: NoiseField::new(tuning.noise_seed),
            tuning,
            mode,
        }
    }

    pub fn mode(&self) -> DeformMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DeformMode) {
        self.mode = mode;
    }

    /// Advance one animation tick.
    ///
    /// Displaces every vertex from its rest direction, recomputes normals,
    /// and returns the uniform mesh scale factor for the render transform.
    /// An empty or silent spectrum degrades to pure time-driven noise
    /// motion with scale 1.0; no input can produce NaN positions.
    ///
    /// # Arguments
    /// * `mesh` - blob mesh; only positions and normals are touched
    /// * `raw_spectrum` - byte magnitudes from the analyser, any length
    /// * `params` - caller-owned spike/time parameters
    /// * `elapsed_ms` - monotonically increasing wall-clock milliseconds
    pub fn tick(
        &self,
        mesh: &mut BlobMesh,
        raw_spectrum: &[u8],
        params: &DeformParams,
        elapsed_ms: f64,
    ) -> f32 {
        let scale = match self.mode {
            DeformMode::Uniform => self.tick_uniform(mesh, raw_spectrum, params, elapsed_ms),
            DeformMode::Liquid => self.tick_liquid(mesh, raw_spectrum, params, elapsed_ms),
        };
        mesh.recompute_normals();
        scale
    }

    /// Uniform variant: one amplitude for the whole mesh, derived from the
    /// raw spectrum average.
    fn tick_uniform(
        &self,
        mesh: &mut BlobMesh,
        raw_spectrum: &[u8],
        params: &DeformParams,
        elapsed_ms: f64,
    ) -> f32 {
        let t = elapsed_ms * self.tuning.time_reduction;
        let tx = t * params.times[0] as f64;
        let ty = t * params.times[1] as f64;
        let tz = t * params.times[2] as f64;

        let [sx, sy, sz] = self.floored_spikes(params);

        let avg = spectrum::average_raw(raw_spectrum);
        let scale = 1.0 + avg * 2.0 / self.tuning.scale_divisor;
        let amp = self.tuning.amp_base + self.tuning.amp_audio * (avg / SPECTRUM_MAX);

        let noise = &self.noise;
        mesh.displace(|dir| {
            let n = noise.sample(
                (dir.x * sx) as f64 + tx,
                (dir.y * sy) as f64 + ty,
                (dir.z * sz) as f64 + tz,
            );
            dir * (1.0 + amp * n)
        });

        scale
    }

    /// Liquid variant: band intensities shape a direction-dependent
    /// amplitude; two noise octaves give fine surface detail.
    fn tick_liquid(
        &self,
        mesh: &mut BlobMesh,
        raw_spectrum: &[u8],
        params: &DeformParams,
        elapsed_ms: f64,
    ) -> f32 {
        let w = self.tuning.liquid.clone();
        let bands = BandIntensities::extract(raw_spectrum);

        let t = elapsed_ms * self.tuning.time_reduction;
        let tx = t * params.times[0] as f64;
        let ty = t * params.times[1] as f64;
        let tz = t * params.times[2] as f64;
        let wobble_t = (t * w.wobble_rate) as f32;

        let [sx, sy, sz] = self.floored_spikes(params);

        // Breathing: only the low band moves the whole mesh
        let scale = 1.0 + bands.low * w.breathing;

        let (blend1, blend2) = w.octave_blend;
        let oct = w.octave2_scale;

        let noise = &self.noise;
        mesh.displace(|dir| {
            // Directional factors: -1..1 height, 0..1 radial, -1..1 angle
            let height = dir.y;
            let radial = (dir.x * dir.x + dir.z * dir.z).sqrt();
            let angle = dir.z.atan2(dir.x) / PI;

            let bottom = 0.5 * (1.0 - height);
            let top = 0.5 * (1.0 + height);
            // Three angular lobes sweeping with time: the "speaking" wobble
            let wobble = 0.5 + 0.5 * (angle * 3.0 * PI + wobble_t).sin();

            let amp = w.base
                + bands.low * w.low * bottom
                + bands.mid * w.mid * wobble
                + bands.high * w.high * top
                + bands.ultra * w.ultra * radial;

            let o1 = noise.sample(
                (dir.x * sx) as f64 + tx,
                (dir.y * sy) as f64 + ty,
                (dir.z * sz) as f64 + tz,
            );
            // Finer, faster octave with band-driven time offsets
            let o2 = noise.sample(
                (dir.x * sx * oct) as f64 + tx * 2.0 + (bands.high * 0.5) as f64,
                (dir.y * sy * oct) as f64 + ty * 2.0 + (bands.mid * 0.5) as f64,
                (dir.z * sz * oct) as f64 + tz * 2.0 + (bands.ultra * 0.5) as f64,
            );
            let n = blend1 * o1 + blend2 * o2;

            dir * (1.0 + amp * n)
        });

        scale
    }

    fn floored_spikes(&self, params: &DeformParams) -> [f32; 3] {
        [
            params.spikes[0].max(self.tuning.spike_floor),
            params.spikes[1].max(self.tuning.spike_floor),
            params.spikes[2].max(self.tuning.spike_floor),
        ]
    }
}
