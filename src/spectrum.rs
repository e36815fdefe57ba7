//! Frequency spectrum reduction: band intensities and whole-spectrum average.
//!
//! The spectrum arrives as raw byte magnitudes (0-255), one per frequency
//! bin, produced by the host's analyser. Everything here is pure arithmetic
//! recomputed from scratch each tick, so the bin count may change between
//! calls (device or analyser reconfiguration) without any stale state.

use crate::error::BlobError;

/// Maximum raw byte magnitude of a spectrum bin.
pub const SPECTRUM_MAX: f32 = 255.0;

/// Named band intensities, each the mean normalized magnitude of a
/// contiguous slice of the spectrum, in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandIntensities {
    /// Bass: first 10% of bins
    pub low: f32,
    /// Mids: 10-40% of bins
    pub mid: f32,
    /// Highs: 40-70% of bins
    pub high: f32,
    /// Air/presence: 70-100% of bins
    pub ultra: f32,
}

impl BandIntensities {
    /// Extract band intensities from a raw byte spectrum.
    ///
    /// Band boundaries are recomputed from the current length on every
    /// call. A band whose index range is empty (tiny or zero-length
    /// spectrum) reads as 0.0 rather than dividing by zero.
    pub fn extract(spectrum: &[u8]) -> Self {
        let n = spectrum.len();
        let b1 = n / 10;
        let b2 = n * 4 / 10;
        let b3 = n * 7 / 10;

        Self {
            low: mean_normalized(&spectrum[..b1]),
            mid: mean_normalized(&spectrum[b1..b2]),
            high: mean_normalized(&spectrum[b2..b3]),
            ultra: mean_normalized(&spectrum[b3..]),
        }
    }

    /// Sum of all four intensities; handy as a coarse loudness signal.
    pub fn total(&self) -> f32 {
        self.low + self.mid + self.high + self.ultra
    }

    /// Like [`extract`](Self::extract), but surfaces an empty spectrum as
    /// a typed error instead of all-zero bands.
    ///
    /// The engine itself degrades gracefully; this is for callers that
    /// must distinguish "silence" from "no analyser attached".
    pub fn try_extract(spectrum: &[u8]) -> Result<Self, BlobError> {
        if spectrum.is_empty() {
            return Err(BlobError::EmptySpectrum);
        }
        Ok(Self::extract(spectrum))
    }
}

/// Mean of byte magnitudes normalized to [0, 1]; 0.0 for an empty slice.
pub fn mean_normalized(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&v| v as u32).sum();
    sum as f32 / bins.len() as f32 / SPECTRUM_MAX
}

/// Whole-spectrum average of raw byte magnitudes, on the 0-255 scale.
///
/// This is the coarse summary the uniform deformation variant drives from;
/// an empty spectrum averages to 0.0 (no audio influence).
pub fn average_raw(spectrum: &[u8]) -> f32 {
    if spectrum.is_empty() {
        return 0.0;
    }
    let sum: u64 = spectrum.iter().map(|&v| v as u64).sum();
    sum as f32 / spectrum.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_1024() {
        // 1024 bins: low = 0..102, mid = 102..409, high = 409..716
        let mut spectrum = vec![0u8; 1024];
        for v in spectrum.iter_mut().take(102) {
            *v = 255;
        }

        let bands = BandIntensities::extract(&spectrum);
        assert!((bands.low - 1.0).abs() < 1e-6);
        assert_eq!(bands.mid, 0.0);
        assert_eq!(bands.high, 0.0);
        assert_eq!(bands.ultra, 0.0);
    }

    #[test]
    fn test_all_max_normalizes_to_one() {
        let spectrum = vec![255u8; 512];
        let bands = BandIntensities::extract(&spectrum);
        assert!((bands.low - 1.0).abs() < 1e-6);
        assert!((bands.mid - 1.0).abs() < 1e-6);
        assert!((bands.high - 1.0).abs() < 1e-6);
        assert!((bands.ultra - 1.0).abs() < 1e-6);
        assert!((average_raw(&spectrum) - 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_spectrum_is_all_zero() {
        let bands = BandIntensities::extract(&[]);
        assert_eq!(bands, BandIntensities::default());
        assert_eq!(average_raw(&[]), 0.0);
    }

    #[test]
    fn test_try_extract_surfaces_empty_spectrum() {
        assert!(matches!(
            BandIntensities::try_extract(&[]),
            Err(BlobError::EmptySpectrum)
        ));
        assert!(BandIntensities::try_extract(&[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_tiny_spectrum_empty_band_reads_zero() {
        // 5 bins: low range is 0..0 (empty), must not divide by zero
        let spectrum = [200u8, 200, 200, 200, 200];
        let bands = BandIntensities::extract(&spectrum);
        assert_eq!(bands.low, 0.0);
        assert!(bands.mid > 0.0);
        assert!(bands.ultra > 0.0);
    }

    #[test]
    fn test_length_change_between_calls() {
        // Boundaries must follow the new length, not a cached one
        let long = vec![100u8; 1000];
        let short = vec![100u8; 10];

        let a = BandIntensities::extract(&long);
        let b = BandIntensities::extract(&short);

        let expected = 100.0 / 255.0;
        assert!((a.mid - expected).abs() < 1e-6);
        assert!((b.mid - expected).abs() < 1e-6);
    }

    #[test]
    fn test_band_partition_covers_all_bins() {
        // Sum of band slice lengths equals the bin count for any n
        for n in [0usize, 1, 5, 9, 10, 11, 100, 1024] {
            let b1 = n / 10;
            let b2 = n * 4 / 10;
            let b3 = n * 7 / 10;
            assert!(b1 <= b2 && b2 <= b3 && b3 <= n);
            assert_eq!(b1 + (b2 - b1) + (b3 - b2) + (n - b3), n);
        }
    }
}
