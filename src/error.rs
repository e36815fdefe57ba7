//! Typed errors shared across the crate.

use thiserror::Error;

/// Errors produced by the blob engine and DNA subsystem.
#[derive(Debug, Error)]
pub enum BlobError {
    /// Color string is not 3-, 6- or 8-digit hex (with optional `#` prefix).
    #[error("invalid color format: {0:?}")]
    InvalidColorFormat(String),

    /// Sphere resolution below the minimum needed for a closed surface.
    #[error("resolution must be at least 3 segments, got {0}")]
    InvalidResolution(u32),

    /// A numeric configuration field was NaN or infinite.
    #[error("non-finite numeric field: {0}")]
    NonFiniteValue(f64),

    /// A spectrum buffer was required but had no bins.
    #[error("spectrum is empty")]
    EmptySpectrum,

    /// Analyser configuration failed validation.
    #[error("invalid analyser config: {0}")]
    InvalidAnalyserConfig(String),

    /// No usable audio output device, or the device rejected our config.
    #[error("audio device unavailable: {0}")]
    AudioDevice(String),

    /// The audio output stream could not be built or started.
    #[error("audio stream failed: {0}")]
    AudioStream(String),

    /// The procedural synthesis engine rejected its composition.
    #[error("synthesis engine failed: {0}")]
    Synth(String),

    /// WAV capture failed.
    #[error("wav capture failed: {0}")]
    Wav(#[from] hound::Error),
}
