//! Live spectrum sampler: synthesis, playback, and analyser-style spectra.
//!
//! This is the host-side collaborator the deformation engine is fed by:
//! procedural synthesis plays through the default output device while an
//! analysis thread publishes byte spectra of what is being heard. The
//! engine core never depends on this module, which keeps the deformation
//! math testable without audio hardware.

pub mod analysis;
pub mod synth;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::error::BlobError;
use crate::params::{audio_constants::BLOCK_SIZE, AnalyserConfig};

/// Audio system managing synthesis, playback and spectrum analysis.
pub struct AudioSystem {
    /// Shared byte spectrum, refreshed by the analysis thread
    spectrum: Arc<Mutex<Vec<u8>>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,

    /// Analysis thread handle (runs for the process lifetime)
    _analysis_thread: thread::JoinHandle<()>,
}

impl AudioSystem {
    /// Create and start the audio system.
    ///
    /// Synthesis begins immediately; pass `record_path` to also capture
    /// the stereo output as 32-bit float WAV.
    pub fn new(config: AnalyserConfig, record_path: Option<&Path>) -> Result<Self, BlobError> {
        config.validate()?;

        let wav_writer = record_path
            .map(|path| -> Result<_, BlobError> {
                let spec = hound::WavSpec {
                    channels: 2,
                    sample_rate: config.sample_rate_hz as u32,
                    bits_per_sample: 32,
                    sample_format: hound::SampleFormat::Float,
                };
                Ok(Arc::new(Mutex::new(hound::WavWriter::create(path, spec)?)))
            })
            .transpose()?;
        let wav_writer_clone = wav_writer.clone();

        // Synthesis engine, shared with the output callback
        let engine = synth::create_engine(config.sample_rate_hz)?;
        let engine = Arc::new(Mutex::new(engine));
        let engine_clone = Arc::clone(&engine);

        let sample_buffer = Arc::new(Mutex::new(Vec::<f32>::new()));
        let sample_buffer_clone = Arc::clone(&sample_buffer);

        let spectrum = Arc::new(Mutex::new(vec![0u8; config.bin_count()]));

        // Setup audio output device
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| BlobError::AudioDevice("no output device found".to_string()))?;

        let stream_config = device
            .default_output_config()
            .map_err(|e| BlobError::AudioDevice(e.to_string()))?;

        log::info!(
            "audio: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "unknown".to_string()),
            stream_config.sample_rate().0
        );

        // Build audio output stream
        let stream = device
            .build_output_stream(
                &stream_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut engine = engine_clone.lock().unwrap();
                    let mut samples = sample_buffer_clone.lock().unwrap();

                    let frames_needed = data.len() / 2; // Stereo frames
                    let mut frame_idx = 0;

                    // Generate multiple blocks if needed to fill the entire buffer
                    while frame_idx < frames_needed {
                        let (buffers, _) = engine.next_block(vec![]);

                        let samples_to_copy = (frames_needed - frame_idx).min(BLOCK_SIZE);

                        for i in 0..samples_to_copy {
                            // Safety limiter: hard clip to ±0.5 to prevent ear damage
                            let left = buffers[0][i].clamp(-0.5, 0.5);
                            let right = buffers[1][i].clamp(-0.5, 0.5);

                            let out_idx = (frame_idx + i) * 2;
                            data[out_idx] = left;
                            data[out_idx + 1] = right;

                            samples.push(left); // Accumulate for analysis

                            if let Some(ref writer) = wav_writer_clone {
                                if let Ok(mut w) = writer.lock() {
                                    let _ = w.write_sample(left);
                                    let _ = w.write_sample(right);
                                }
                            }
                        }

                        frame_idx += samples_to_copy;
                    }
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| BlobError::AudioStream(e.to_string()))?;

        stream
            .play()
            .map_err(|e| BlobError::AudioStream(e.to_string()))?;

        // Start the analysis thread
        let analysis_thread =
            analysis::spawn_analysis_thread(config, sample_buffer, Arc::clone(&spectrum));

        Ok(Self {
            spectrum,
            _stream: stream,
            _analysis_thread: analysis_thread,
        })
    }

    /// Snapshot of the current byte spectrum (thread-safe).
    pub fn spectrum(&self) -> Vec<u8> {
        self.spectrum.lock().unwrap().clone()
    }
}
