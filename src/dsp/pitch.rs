use std::f32::consts::TAU;

/*
Pitch Modulation
================

Two independent effects move the sounding frequency away from the note's
base frequency:

  bend      The pitch wheel. Its 7-bit position (center 64) scales the base
            frequency linearly. The scale factor is derived from a fixed
            2-semitone range; the linearization is only accurate for ranges
            up to 2 semitones, which is why the range is not configurable.

  vibrato   A control-rate sine that nudges the bent frequency every sample.
            Depth is tiny (the 1e-6 factor keeps it in the sub-percent
            range) and proportional to the base frequency, so vibrato width
            is musically constant across the keyboard. Channel pressure
            (aftertouch) controls the depth while playing.

The bent frequency is recomputed from the base on every note and wheel
event; between events the vibrato term keeps accumulating onto it.
*/

/// Frequency of MIDI note 0 in Hz (equal temperament, A4 = 440 Hz).
pub const NOTE_0_FREQ: f64 = 8.1757989156;

/// The twelfth root of two: the frequency ratio of one semitone.
pub const SEMITONE_RATIO: f64 = 1.0594630943;

/// Pitch wheel center position (no bend).
pub const WHEEL_CENTER: u8 = 64;

const BEND_RANGE_SEMITONES: i32 = 2;

/// Convert a MIDI note number to its frequency in Hz.
#[inline]
pub fn note_to_frequency(note: u8) -> f32 {
    (NOTE_0_FREQ * SEMITONE_RATIO.powi(i32::from(note))) as f32
}

pub struct PitchModulator {
    wheel: u8,
    vibrato_phase: f32,
    vibrato_depth: f32,
    vibrato_rate: f32, // Hz
}

impl PitchModulator {
    pub fn new() -> Self {
        Self {
            wheel: WHEEL_CENTER,
            vibrato_phase: 0.0,
            vibrato_depth: 0.5,
            vibrato_rate: 5.0,
        }
    }

    /// Store a new pitch-wheel position (7-bit, 64 = center).
    pub fn set_wheel(&mut self, value: u8) {
        self.wheel = value;
    }

    pub fn wheel(&self) -> u8 {
        self.wheel
    }

    /// Compute the bent frequency for a base frequency at the current wheel
    /// position.
    pub fn bent_frequency(&self, base: f32) -> f32 {
        let scale = (SEMITONE_RATIO.powi(BEND_RANGE_SEMITONES) / 64.0 * 0.1) as f32;
        base + f32::from(self.wheel as i16 - i16::from(WHEEL_CENTER)) * scale * base
    }

    /// Advance the vibrato oscillator one sample and return the bent
    /// frequency with this sample's vibrato added.
    pub fn apply_vibrato(&mut self, bent: f32, base: f32, sample_rate: f32) -> f32 {
        let modulated = bent + self.vibrato_phase.sin() * 1e-6 * self.vibrato_depth * base;
        self.vibrato_phase += TAU * self.vibrato_rate / sample_rate;
        if self.vibrato_phase >= TAU {
            self.vibrato_phase -= TAU;
        }
        modulated
    }

    /// Channel pressure (aftertouch) drives vibrato depth; zero pressure
    /// falls back to the resting depth.
    pub fn channel_pressure(&mut self, pressure: u8) {
        if pressure > 0 {
            self.vibrato_depth = f32::from(pressure) * 0.05;
        } else {
            self.vibrato_depth = 0.5;
        }
    }

    pub fn vibrato_depth(&self) -> f32 {
        self.vibrato_depth
    }

    pub fn vibrato_rate(&self) -> f32 {
        self.vibrato_rate
    }
}

impl Default for PitchModulator {
    fn default() -> Self {
        Self::new()
    }
}
