//! FFT analysis thread: turns raw samples into analyser-style byte spectra.
//!
//! Output mimics a Web-Audio-style analyser: linear FFT magnitudes are
//! smoothed over time, mapped to decibels, and scaled into 0-255 bytes
//! across the configured dB range. The blob engine consumes these bytes
//! directly.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use crate::params::AnalyserConfig;

/// Spawn the FFT analysis thread.
///
/// Drains windows from `sample_buffer` with 50% overlap and publishes
/// `fft_size / 2` byte magnitudes into `spectrum_out` every update
/// interval.
pub fn spawn_analysis_thread(
    config: AnalyserConfig,
    sample_buffer: Arc<Mutex<Vec<f32>>>,
    spectrum_out: Arc<Mutex<Vec<u8>>>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let mut fft_input = vec![Complex::new(0.0, 0.0); config.fft_size];
        let mut fft_output = vec![Complex::new(0.0, 0.0); config.fft_size];
        let mut smoothed = vec![0.0f32; config.bin_count()];

        loop {
            thread::sleep(Duration::from_millis(config.update_interval_ms));

            let mut samples = sample_buffer.lock().unwrap();
            if samples.len() < config.fft_size {
                continue;
            }

            // Apply Hann window
            for i in 0..config.fft_size {
                let window = hann_window(i, config.fft_size);
                fft_input[i] = Complex::new(samples[i] * window, 0.0);
            }

            // 50% overlap (drain half the buffer)
            samples.drain(0..config.fft_size / 2);
            drop(samples);

            // Perform FFT
            fft_output.copy_from_slice(&fft_input);
            fft.process(&mut fft_output);

            let mut spectrum = spectrum_out.lock().unwrap();
            spectrum.resize(config.bin_count(), 0);
            for (i, bin) in fft_output[..config.bin_count()].iter().enumerate() {
                let magnitude = bin.norm() / config.fft_size as f32;
                smoothed[i] =
                    config.smoothing * smoothed[i] + (1.0 - config.smoothing) * magnitude;
                spectrum[i] = magnitude_to_byte(smoothed[i], &config);
            }
        }
    })
}

/// Map a linear magnitude onto the analyser's 0-255 dB scale.
fn magnitude_to_byte(magnitude: f32, config: &AnalyserConfig) -> u8 {
    let db = 20.0 * magnitude.max(1e-12).log10();
    let scaled = 255.0 * (db - config.min_db) / (config.max_db - config.min_db);
    scaled.clamp(0.0, 255.0) as u8
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
