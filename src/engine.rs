use log::info;
use rtrb::{Producer, RingBuffer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::Waveform;
use crate::io::queue::{midi_event_queue, MidiEventSender};
use crate::synth::mono::MonoSynth;
use crate::MIDI_QUEUE_CAPACITY;

/// Engine construction parameters. There is no ambient configuration: the
/// sample rate, buffer size and queue capacity all live here and are fixed
/// for the engine's lifetime.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per output buffer the caller intends to render. Informational
    /// for stream setup; `render` accepts any buffer length.
    pub frames_per_buffer: u32,
    /// Capacity of the MIDI event queue.
    pub midi_queue_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            frames_per_buffer: 128,
            midi_queue_capacity: MIDI_QUEUE_CAPACITY,
        }
    }
}

/// A change requested by the control surface (menu, UI, test).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    SetWaveform(Waveform),
    SetAttackMs(u32),
    SetDecayMs(u32),
    SetSustainPercent(u32),
    SetReleaseMs(u32),
}

const CONTROL_QUEUE_CAPACITY: usize = 16;

/// Producer half of the control-surface command queue.
///
/// Commands are applied by the renderer at the next buffer boundary. Like
/// the MIDI queue, pushing into a full queue drops the command rather than
/// blocking.
pub struct ControlHandle {
    tx: Producer<ControlCommand>,
}

impl ControlHandle {
    pub fn set_waveform(&mut self, waveform: Waveform) {
        let _ = self.tx.push(ControlCommand::SetWaveform(waveform));
    }

    pub fn set_attack_ms(&mut self, ms: u32) {
        let _ = self.tx.push(ControlCommand::SetAttackMs(ms));
    }

    pub fn set_decay_ms(&mut self, ms: u32) {
        let _ = self.tx.push(ControlCommand::SetDecayMs(ms));
    }

    pub fn set_sustain_percent(&mut self, percent: u32) {
        let _ = self.tx.push(ControlCommand::SetSustainPercent(percent));
    }

    pub fn set_release_ms(&mut self, ms: u32) {
        let _ = self.tx.push(ControlCommand::SetReleaseMs(ms));
    }
}

/// The synthesis engine: owns the renderer and its queues.
///
/// `new` hands back the two producer handles; the engine itself is moved
/// into the audio callback and rendered there. Teardown order matters for
/// the callers wiring this to real devices: stop the MIDI input (dropping
/// the [`MidiEventSender`]) before the audio stream, and give an in-flight
/// callback time to finish before dropping the stream.
pub struct SynthEngine {
    synth: MonoSynth,
    config: EngineConfig,
}

impl SynthEngine {
    pub fn new(config: EngineConfig) -> (Self, MidiEventSender, ControlHandle) {
        let (midi_tx, midi_rx) = midi_event_queue(config.midi_queue_capacity);
        let (control_tx, control_rx) = RingBuffer::new(CONTROL_QUEUE_CAPACITY);

        let synth = MonoSynth::new(config.sample_rate as f32, midi_rx, control_rx);
        info!(
            "engine ready: {} Hz, {} frames per buffer, midi queue {}",
            config.sample_rate, config.frames_per_buffer, config.midi_queue_capacity
        );

        (
            Self { synth, config },
            midi_tx,
            ControlHandle { tx: control_tx },
        )
    }

    /// Render one buffer of interleaved stereo f32 samples.
    pub fn render(&mut self, out: &mut [f32]) {
        self.synth.render_block(out);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The renderer, for state inspection (tests, meters).
    pub fn synth(&self) -> &MonoSynth {
        &self.synth
    }
}
