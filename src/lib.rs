pub mod dsp;
pub mod engine; // Engine context and control-surface handle
pub mod io;
pub mod synth; // Note tracking, controller routing and the mono render loop

pub use engine::{ControlCommand, ControlHandle, EngineConfig, SynthEngine};
pub use io::queue::{MidiEventReceiver, MidiEventSender};

/// Default capacity of the MIDI event queue between the input context and
/// the audio callback. Events arriving while the queue is full are dropped.
pub const MIDI_QUEUE_CAPACITY: usize = 128;
