/*
ADSR Amplitude Envelope
=======================

A linear four-stage envelope driven once per sample by the audio callback.

Vocabulary
----------

  amplitude   The envelope's current output value. Multiplies the oscillator
              sample to shape loudness over time. Ranges 0.0 ..= peak.

  peak        The ceiling the attack ramps toward. Recomputed from note
              velocity on every retrigger: 0.2 + velocity * (0.8 / 127),
              so even the softest playable note keeps a 0.2 floor.

  stage       Which phase the state machine is in: Attack, Decay, Sustain,
              Release, or Off.

  timebase    Samples per millisecond (sample_rate / 1000). Stage durations
              are stored in milliseconds; timebase converts them to a
              per-sample increment.


The Shape
---------

  amplitude
   peak ┐     ╱╲
        │    ╱  ╲___________
  floor │   ╱               ╲        floor = peak * sustain% / 100
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ time
         Attack Decay Sustain Release

Stage transitions:

  trigger()  →  Attack, but only from Off, Release, or Sustain with a zero
                sustain level. A trigger while the envelope is already
                rising or sustaining is legato: pitch may change upstream,
                the envelope keeps going.
  Attack     →  Decay when amplitude reaches peak.
  Decay      →  Sustain when amplitude reaches the sustain floor.
  Sustain    →  holds until release().
  Release    →  Off when amplitude reaches zero.

Zero-duration stages need care: a zero attack would divide by zero (and an
instant jump to peak pops audibly), so attack substitutes 1 ms. Zero decay
snaps straight to the sustain floor; zero release cuts straight to Off.
*/

/// Upper bound for the attack time in milliseconds.
pub const ATTACK_MAX_MS: u32 = 3000;
/// Upper bound for the decay time in milliseconds.
pub const DECAY_MAX_MS: u32 = 3000;
/// Upper bound for the sustain level in percent of peak.
pub const SUSTAIN_MAX_PERCENT: u32 = 100;
/// Upper bound for the release time in milliseconds.
pub const RELEASE_MAX_MS: u32 = 3000;

const PEAK_FLOOR: f32 = 0.2;
const PEAK_VELOCITY_SCALE: f32 = 0.8 / 127.0;

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,  // ramping up toward peak
    Decay,   // falling from peak to the sustain floor
    Sustain, // holding the floor while a key is down
    Release, // falling from the current level to zero
    Off,     // silent, waiting for the next trigger
}

pub struct Envelope {
    stage: EnvelopeStage,
    amplitude: f32,
    peak: f32,

    // Stage parameters in milliseconds (sustain: percent of peak)
    attack_ms: u32,
    decay_ms: u32,
    sustain_percent: u32,
    release_ms: u32,

    timebase: f32, // samples per millisecond
}

impl Envelope {
    /// Create an envelope with the default shape: 3 ms attack, 180 ms decay,
    /// 60 % sustain, 800 ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            stage: EnvelopeStage::Off,
            amplitude: 0.0,
            peak: 0.0,
            attack_ms: 3,
            decay_ms: 180,
            sustain_percent: 60,
            release_ms: 800,
            timebase: sample_rate / 1000.0,
        }
    }

    /// Start an attack toward a velocity-scaled peak.
    ///
    /// Only acts when the envelope is Off, releasing, or sustaining at a
    /// zero sustain level; otherwise the note change is legato and the
    /// envelope continues undisturbed. The ramp starts from the current
    /// amplitude, not from zero, so retriggering mid-release does not click.
    pub fn trigger(&mut self, velocity: u8) {
        let retrigger = matches!(self.stage, EnvelopeStage::Off | EnvelopeStage::Release)
            || (self.stage == EnvelopeStage::Sustain && self.sustain_percent == 0);
        if retrigger {
            self.stage = EnvelopeStage::Attack;
            self.peak = PEAK_FLOOR + f32::from(velocity) * PEAK_VELOCITY_SCALE;
        }
    }

    /// Enter the release stage from wherever the envelope currently is.
    pub fn release(&mut self) {
        self.stage = EnvelopeStage::Release;
    }

    /// Advance the state machine by one sample and return the new amplitude.
    pub fn advance(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Attack => {
                if self.amplitude < self.peak {
                    // Zero attack would divide by zero; 1 ms is short enough
                    // to feel instant without the pop of a hard jump.
                    let attack_ms = self.attack_ms.max(1);
                    self.amplitude += self.peak / (attack_ms as f32 * self.timebase);
                    if self.amplitude >= self.peak {
                        self.amplitude = self.peak;
                        self.stage = EnvelopeStage::Decay;
                    }
                } else {
                    // Retriggered with a softer velocity than the level we
                    // are already at: let the decay ramp bring us down.
                    self.stage = EnvelopeStage::Decay;
                }
            }
            EnvelopeStage::Decay => {
                let floor = self.peak * self.sustain_percent as f32 * 0.01;
                if self.decay_ms == 0 {
                    self.amplitude = floor;
                    self.stage = EnvelopeStage::Sustain;
                } else if self.amplitude <= floor {
                    // The sustain level was raised past the current
                    // amplitude mid-decay; hold where we are.
                    self.stage = EnvelopeStage::Sustain;
                } else {
                    self.amplitude -= self.peak / (self.decay_ms as f32 * self.timebase);
                    if self.amplitude <= floor {
                        self.amplitude = floor;
                        self.stage = EnvelopeStage::Sustain;
                    }
                }
            }
            EnvelopeStage::Sustain => {
                // Hold until release() or a qualifying trigger()
            }
            EnvelopeStage::Release => {
                if self.release_ms == 0 {
                    self.amplitude = 0.0;
                    self.stage = EnvelopeStage::Off;
                } else {
                    self.amplitude -= self.peak / (self.release_ms as f32 * self.timebase);
                    if self.amplitude <= 0.0 {
                        self.amplitude = 0.0;
                        self.stage = EnvelopeStage::Off;
                    }
                }
            }
            EnvelopeStage::Off => {}
        }

        debug_assert!(self.amplitude >= 0.0);
        self.amplitude
    }

    /// Set the attack time, clamped to [`ATTACK_MAX_MS`].
    pub fn set_attack_ms(&mut self, ms: u32) {
        self.attack_ms = ms.min(ATTACK_MAX_MS);
    }

    /// Set the decay time, clamped to [`DECAY_MAX_MS`].
    pub fn set_decay_ms(&mut self, ms: u32) {
        self.decay_ms = ms.min(DECAY_MAX_MS);
    }

    /// Set the sustain level, clamped to [`SUSTAIN_MAX_PERCENT`].
    pub fn set_sustain_percent(&mut self, percent: u32) {
        self.sustain_percent = percent.min(SUSTAIN_MAX_PERCENT);
    }

    /// Set the release time, clamped to [`RELEASE_MAX_MS`].
    pub fn set_release_ms(&mut self, ms: u32) {
        self.release_ms = ms.min(RELEASE_MAX_MS);
    }

    pub fn attack_ms(&self) -> u32 {
        self.attack_ms
    }

    pub fn decay_ms(&self) -> u32 {
        self.decay_ms
    }

    pub fn sustain_percent(&self) -> u32 {
        self.sustain_percent
    }

    pub fn release_ms(&self) -> u32 {
        self.release_ms
    }

    /// Current amplitude multiplier, 0.0 ..= peak.
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Peak the current attack is (or last was) ramping toward.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    /// Returns true while the envelope is producing output.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Off
    }
}
