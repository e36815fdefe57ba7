//! blobdna - an audio-reactive blob creature, without the pixels.
//!
//! The demo drives the full pipeline headless: procedural synthesis plays
//! through the default output device, the analyser publishes byte spectra,
//! and the deformation engine works the mesh every frame, logging what a
//! renderer would consume. The `dna` subcommand fingerprints a blob
//! configuration.

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use blobdna::audio::AudioSystem;
use blobdna::cli::{self, Args, Command};
use blobdna::deform::{DeformMode, DeformationEngine};
use blobdna::dna::{BlobConfig, CanonicalForm};
use blobdna::error::BlobError;
use blobdna::mesh::BlobMesh;
use blobdna::params::{AnalyserConfig, DeformTuning};
use blobdna::spectrum::BandIntensities;

fn main() {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Command::Run {
            mode,
            seconds,
            resolution,
            record,
        } => run_demo(cli::parse_mode(&mode), seconds, resolution, record.as_deref()),
        Command::Dna { seed, canonical } => print_dna(seed, canonical),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Run the headless animation loop for `seconds`.
fn run_demo(
    mode: DeformMode,
    seconds: f32,
    resolution: u32,
    record: Option<&Path>,
) -> Result<(), BlobError> {
    let config = BlobConfig::builder().resolution(resolution).build()?;
    let mut mesh = BlobMesh::sphere(config.resolution)?;
    let engine = DeformationEngine::new(mode, DeformTuning::default());
    let audio = AudioSystem::new(AnalyserConfig::default(), record)?;
    let params = config.deform_params();

    log::info!(
        "blob: {} vertices, mode {:?}, dna {}",
        mesh.vertex_count(),
        engine.mode(),
        config.fingerprint()?.short_id()
    );

    let start = Instant::now();
    let mut rotation = [0.0f64; 3];
    let mut last_report = 0;

    while start.elapsed().as_secs_f32() < seconds {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let spectrum = audio.spectrum();
        let scale = engine.tick(&mut mesh, &spectrum, &params, elapsed_ms);

        // The renderer would own orientation; the demo just accumulates it
        for (angle, rate) in rotation.iter_mut().zip(config.rotation) {
            *angle += rate;
        }

        let secs = start.elapsed().as_secs();
        if secs > last_report {
            last_report = secs;
            report(secs, scale, &mesh, &spectrum);
        }

        thread::sleep(Duration::from_millis(16));
    }

    Ok(())
}

/// Log the per-second state a renderer would consume.
fn report(secs: u64, scale: f32, mesh: &BlobMesh, spectrum: &[u8]) {
    let bands = BandIntensities::extract(spectrum);
    let (mut min_r, mut max_r) = (f32::INFINITY, 0.0f32);
    for pos in mesh.positions() {
        let r = pos.length();
        min_r = min_r.min(r);
        max_r = max_r.max(r);
    }

    log::info!(
        "t={secs}s scale={scale:.3} radius=[{min_r:.3}, {max_r:.3}] \
         bands low={:.2} mid={:.2} high={:.2} ultra={:.2}",
        bands.low,
        bands.mid,
        bands.high,
        bands.ultra
    );
}

/// Fingerprint a configuration and print it.
fn print_dna(seed: Option<u64>, show_canonical: bool) -> Result<(), BlobError> {
    let config = match seed {
        Some(seed) => BlobConfig::random(&mut StdRng::seed_from_u64(seed)),
        None => BlobConfig::default(),
    };

    let canonical = CanonicalForm::from_config(&config)?;
    let dna = canonical.fingerprint();

    if show_canonical {
        println!("{}", canonical.to_json());
    }
    println!("dna:   {dna}");
    println!("short: {}", dna.short_id());

    Ok(())
}
