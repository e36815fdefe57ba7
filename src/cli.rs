//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::deform::DeformMode;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "blobdna")]
#[command(about = "Audio-reactive blob engine with DNA fingerprinting", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the live audio-reactive deformation demo (headless)
    Run {
        /// Deformation variant: uniform (default) or liquid
        #[arg(long, value_name = "MODE", default_value = "uniform")]
        mode: String,

        /// How long to run (seconds)
        #[arg(long, value_name = "SECONDS", default_value_t = 10.0)]
        seconds: f32,

        /// Sphere resolution (segments per axis)
        #[arg(long, value_name = "SEGMENTS", default_value_t = 64)]
        resolution: u32,

        /// Record the synthesized audio to a WAV file
        #[arg(long, value_name = "PATH")]
        record: Option<PathBuf>,
    },

    /// Compute the DNA fingerprint of a blob configuration
    Dna {
        /// Randomize the configuration with this seed instead of using
        /// the defaults
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,

        /// Also print the canonical JSON that was hashed
        #[arg(long)]
        canonical: bool,
    },
}

/// Parse a deformation mode name from command-line arguments
pub fn parse_mode(name: &str) -> DeformMode {
    match name.to_lowercase().as_str() {
        "liquid" => DeformMode::Liquid,
        "uniform" => DeformMode::Uniform,
        other => {
            log::warn!("unknown deformation mode {other:?}, using uniform");
            DeformMode::Uniform
        }
    }
}
