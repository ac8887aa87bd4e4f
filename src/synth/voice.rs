use crate::dsp::oscillator::Waveform;

/// The tone parameters of the single voice, owned and mutated exclusively
/// by the render context.
pub struct VoiceState {
    pub waveform: Waveform,
    /// Frequency of the active note before any modulation, Hz.
    pub base_frequency: f32,
    /// Frequency actually fed to the oscillator: base plus pitch-wheel
    /// bend, with vibrato accumulating on top between events.
    pub bent_frequency: f32,
    /// Pulse waveform duty cycle in percent.
    pub pulse_width: f32,
    /// Output gain, 0.0 ..= 1.0.
    pub gain: f32,
    /// While engaged, note release does not end the envelope.
    pub hold: bool,
}

impl VoiceState {
    pub fn new() -> Self {
        Self {
            waveform: Waveform::Pulse,
            base_frequency: 0.0,
            bent_frequency: 0.0,
            pulse_width: 50.0,
            gain: 0.5,
            hold: false,
        }
    }
}

impl Default for VoiceState {
    fn default() -> Self {
        Self::new()
    }
}
