//! monovox - MIDI-controlled monophonic tone generator
//!
//! Run with: cargo run

mod audio;
mod menu;
mod midi_in;

use std::thread;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use monovox::{EngineConfig, SynthEngine};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    // The engine must run at whatever rate the output device actually uses,
    // so the device is opened before the engine is built.
    let output = audio::OutputDevice::open()?;
    let config = EngineConfig {
        sample_rate: output.sample_rate(),
        ..EngineConfig::default()
    };

    let (engine, midi_tx, control) = SynthEngine::new(config);
    let stream = output.start(engine)?;
    let midi_connection = midi_in::connect(midi_tx)?;

    menu::run(control);

    // Teardown order: stop the MIDI producer first, give an in-flight audio
    // callback time to drain, then stop the stream.
    drop(midi_connection);
    thread::sleep(Duration::from_millis(1000));
    drop(stream);

    println!("Finished.");
    Ok(())
}
