//! Procedural synthesis for the demo: a small generative composition so
//! the blob has something to react to without any input files.

use glicol::Engine;

use crate::error::BlobError;
use crate::params::audio_constants::BLOCK_SIZE;

/// Glicol composition (procedural music code)
pub const COMPOSITION: &str = r#"
~gate: speed 2.0 >> seq 48 _48 _~n 60
~n: choose 60 60 60 72 55 0 0
~amp: ~gate >> envperc 0.002 0.12
~pit: ~gate >> mul 220.0
~bass: saw ~pit >> mul ~amp >> lpf ~cut 3.0 >> mul 0.12
~cut: sin 0.15 >> mul 1200 >> add 1400
o: ~bass >> plate 0.12
"#;

/// Build and prime the synthesis engine for the demo track.
pub fn create_engine(sample_rate_hz: usize) -> Result<Engine<BLOCK_SIZE>, BlobError> {
    let mut engine = Engine::<BLOCK_SIZE>::new();
    engine.set_sr(sample_rate_hz);
    engine.update_with_code(COMPOSITION);
    engine
        .update()
        .map_err(|e| BlobError::Synth(format!("{e:?}")))?;
    Ok(engine)
}
