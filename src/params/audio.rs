//! Audio analysis configuration and constants.

use crate::error::BlobError;

/// Analyser configuration: FFT shape plus the dB-to-byte mapping used to
/// publish spectra as 0-255 magnitudes.
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Audio sample rate (Hz).
    /// Reference value: 44100
    pub sample_rate_hz: usize,

    /// FFT window size (must be power of 2); the published spectrum has
    /// `fft_size / 2` bins.
    /// Reference value: 2048 (= 1024 bins)
    pub fft_size: usize,

    /// Analysis update interval (milliseconds).
    /// Reference value: 50 (= 20 Hz update rate)
    pub update_interval_ms: u64,

    /// Exponential smoothing applied to linear magnitudes between frames,
    /// 0 = none, values near 1 = heavy smoothing.
    /// Reference value: 0.7
    pub smoothing: f32,

    /// Magnitudes at or below this level map to byte 0.
    /// Reference value: -90.0
    pub min_db: f32,

    /// Magnitudes at or above this level map to byte 255.
    /// Reference value: -10.0
    pub max_db: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            fft_size: 2048,
            update_interval_ms: 50,
            smoothing: 0.7,
            min_db: -90.0,
            max_db: -10.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins in published spectra.
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), BlobError> {
        if !self.fft_size.is_power_of_two() {
            return Err(BlobError::InvalidAnalyserConfig(format!(
                "fft size must be power of 2, got {}",
                self.fft_size
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(BlobError::InvalidAnalyserConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(BlobError::InvalidAnalyserConfig(format!(
                "smoothing must be in [0, 1), got {}",
                self.smoothing
            )));
        }
        if self.min_db >= self.max_db {
            return Err(BlobError::InvalidAnalyserConfig(format!(
                "min_db {} must be below max_db {}",
                self.min_db, self.max_db
            )));
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match the synthesis engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer).
    /// Reference value: 128 (= 2.9ms @ 44.1kHz)
    pub const BLOCK_SIZE: usize = 128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyserConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_count(), 1024);
    }

    #[test]
    fn test_rejects_non_power_of_two_fft() {
        let config = AnalyserConfig {
            fft_size: 1000,
            ..AnalyserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_db_range() {
        let config = AnalyserConfig {
            min_db: -10.0,
            max_db: -90.0,
            ..AnalyserConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
