//! Deterministic 3D noise, the organic texture behind vertex displacement.
//!
//! OpenSimplex noise for smooth, artifact-free deformation. The wrapper
//! pins down the contract the engine relies on: deterministic for a given
//! seed, continuous, value in [-1, 1], no allocation per sample.

use noise::{NoiseFn, OpenSimplex};

/// Seeded gradient-noise field.
///
/// Immutable after construction, so it can be shared read-only across
/// threads and sampled millions of times per second from the vertex loop.
pub struct NoiseField {
    simplex: OpenSimplex,
}

impl NoiseField {
    /// Create a noise field with the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
        }
    }

    /// Sample 3D noise at position.
    ///
    /// Returns a value in range [-1, 1].
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f32 {
        self.simplex.get([x, y, z]) as f32
    }
}
