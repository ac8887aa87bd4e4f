//! Low-level DSP primitives used by the mono synth voice.
//!
//! These components are allocation-free and realtime-safe, making them safe
//! to run inside the audio callback. They stay focused on the per-sample
//! math; note tracking and event dispatch live in `synth`.

/// Attack/decay/sustain/release amplitude envelope generator.
pub mod envelope;
/// Phase-accumulator oscillator with four waveforms.
pub mod oscillator;
/// Pitch-wheel bend, vibrato and note-to-frequency conversion.
pub mod pitch;

pub use envelope::EnvelopeStage;
pub use oscillator::Waveform;
