// Purpose: everything between a decoded MIDI message and a rendered buffer.
// The dsp layer does the per-sample math; this layer owns the voice state
// and decides what the math is applied to.

pub mod control;
pub mod mono;
pub mod notes;
pub mod voice;

pub use mono::MonoSynth;
pub use notes::NoteTracker;
