use std::f32::consts::{PI, TAU};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Waveform Generation
===================

A single phase accumulator drives all four waveforms. The phase runs over
[0, 2π) and each waveform is a piecewise function of it:

  Pulse      +1 while phase < 2π * width/100, else -1. The width parameter
             sets the fraction of the cycle spent high (50 = square).
  Triangle   rises linearly from -1 to +1 over the first half cycle,
             falls back to -1 over the second.
  Sawtooth   falls linearly from +1 at phase 0 to -1 at 2π.
  Sine       sin(phase).

Each sample the phase advances by 2π * frequency / sample_rate. A single
conditional subtraction is enough to wrap: the per-sample increment never
exceeds one full cycle for any audible frequency, so the phase can never run
more than one period ahead.
*/

/// Waveform selector, numbered 1-4 on the control surface.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Pulse,
    Triangle,
    Sawtooth,
    Sine,
}

impl Waveform {
    /// Map a 1-4 selector to a waveform, clamping out-of-range values.
    pub fn from_selector(selector: i32) -> Self {
        match selector {
            i32::MIN..=1 => Waveform::Pulse,
            2 => Waveform::Triangle,
            3 => Waveform::Sawtooth,
            _ => Waveform::Sine,
        }
    }

    /// The 1-4 selector number for this waveform.
    pub fn selector(self) -> u8 {
        match self {
            Waveform::Pulse => 1,
            Waveform::Triangle => 2,
            Waveform::Sawtooth => 3,
            Waveform::Sine => 4,
        }
    }
}

/// Phase-accumulator oscillator. Holds only the running phase; waveform and
/// pulse width are passed per sample so they can change between buffers
/// without touching oscillator state.
pub struct Oscillator {
    phase: f32,
}

impl Oscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Produce one sample in [-1, 1] at the current phase.
    ///
    /// `pulse_width_percent` only affects the pulse waveform: the percentage
    /// of each cycle spent at +1.
    pub fn sample(&self, waveform: Waveform, pulse_width_percent: f32) -> f32 {
        match waveform {
            Waveform::Pulse => {
                if self.phase < TAU / 100.0 * pulse_width_percent {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if self.phase < PI {
                    -1.0 + (2.0 / PI) * self.phase
                } else {
                    3.0 - (2.0 / PI) * self.phase
                }
            }
            Waveform::Sawtooth => 1.0 - (1.0 / PI) * self.phase,
            Waveform::Sine => self.phase.sin(),
        }
    }

    /// Advance the phase by one sample at the given frequency, wrapping
    /// back into [0, 2π).
    pub fn advance(&mut self, frequency: f32, sample_rate: f32) {
        self.phase += TAU * frequency / sample_rate;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_round_trips_and_clamps() {
        for selector in 1..=4 {
            assert_eq!(
                Waveform::from_selector(selector).selector(),
                selector as u8
            );
        }
        assert_eq!(Waveform::from_selector(0), Waveform::Pulse);
        assert_eq!(Waveform::from_selector(99), Waveform::Sine);
    }

    #[test]
    fn phase_stays_in_range_after_wrap() {
        for &(frequency, sample_rate) in &[
            (440.0, 44_100.0),
            (20.0, 8_000.0),
            (8_000.0, 22_050.0),
            (12_543.85, 44_100.0), // G9, top of the MIDI range
            (440.0, 192_000.0),
        ] {
            let mut osc = Oscillator::new();
            for _ in 0..10_000 {
                osc.advance(frequency, sample_rate);
                assert!(
                    osc.phase() >= 0.0 && osc.phase() < TAU,
                    "phase {} out of range at f={} sr={}",
                    osc.phase(),
                    frequency,
                    sample_rate
                );
            }
        }
    }

    #[test]
    fn square_pulse_splits_the_cycle() {
        let mut osc = Oscillator::new();
        // 100 samples per cycle at this frequency
        let sample_rate = 100.0;
        let frequency = 1.0;

        let mut high = 0;
        for _ in 0..100 {
            if osc.sample(Waveform::Pulse, 50.0) > 0.0 {
                high += 1;
            }
            osc.advance(frequency, sample_rate);
        }
        // one sample of slack for float rounding at the edge
        assert!(
            (49..=51).contains(&high),
            "50% width square must be high for about half the cycle, got {high}"
        );
    }

    #[test]
    fn narrow_pulse_width_shortens_the_high_phase() {
        let mut osc = Oscillator::new();
        let mut high = 0;
        for _ in 0..100 {
            if osc.sample(Waveform::Pulse, 10.0) > 0.0 {
                high += 1;
            }
            osc.advance(1.0, 100.0);
        }
        assert!((9..=11).contains(&high), "10% width, got {high} high samples");
    }

    #[test]
    fn triangle_is_continuous_and_bounded() {
        let mut osc = Oscillator::new();
        assert!((osc.sample(Waveform::Triangle, 50.0) - (-1.0)).abs() < 1e-6);

        let mut previous = -1.0;
        for _ in 0..1_000 {
            osc.advance(440.0, 44_100.0);
            let sample = osc.sample(Waveform::Triangle, 50.0);
            assert!((-1.0..=1.0).contains(&sample));
            // per-sample step of a triangle is bounded by 4f/sr
            assert!((sample - previous).abs() < 4.0 * 440.0 / 44_100.0 + 1e-4);
            previous = sample;
        }
    }

    #[test]
    fn sawtooth_falls_across_the_cycle() {
        let mut osc = Oscillator::new();
        assert!((osc.sample(Waveform::Sawtooth, 50.0) - 1.0).abs() < 1e-6);

        // halfway through the cycle the saw crosses zero
        for _ in 0..50 {
            osc.advance(1.0, 100.0);
        }
        assert!(osc.sample(Waveform::Sawtooth, 50.0).abs() < 1e-4);
    }

    #[test]
    fn sine_matches_reference() {
        let sample_rate = 48_000.0;
        let frequency = 440.0;
        let mut osc = Oscillator::new();

        for n in 0..256 {
            let expected = (TAU * frequency * n as f32 / sample_rate).sin();
            let actual = osc.sample(Waveform::Sine, 50.0);
            assert!(
                (actual - expected).abs() < 1e-3,
                "sample {n}: expected {expected}, got {actual}"
            );
            osc.advance(frequency, sample_rate);
        }
    }
}
