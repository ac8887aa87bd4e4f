use crate::dsp::envelope::SUSTAIN_MAX_PERCENT;
use crate::dsp::oscillator::Waveform;

/// What a continuous controller is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlDestination {
    /// Not routed; the value is ignored.
    None,
    Volume,
    Waveform,
    Frequency,
    PulseWidth,
    VibratoDepth,
    VibratoRate,
    EnvAttack,
    EnvDecay,
    EnvSustain,
    EnvRelease,
    Hold,
}

/// Data-driven controller routing: one destination per controller number.
///
/// The default map routes the common hardware controls:
///
///   1  (mod wheel)   -> PulseWidth
///   6  (data entry)  -> Waveform
///   7  (volume)      -> Volume
///   64 (hold pedal)  -> Hold
///   22..=25          -> EnvAttack / EnvDecay / EnvSustain / EnvRelease
///
/// Controllers 22-25 are where Kurzweil keyboards put their front-panel
/// sliders; other manufacturers may need `assign`.
pub struct ControlMap {
    destinations: [ControlDestination; 128],
}

impl ControlMap {
    pub fn new() -> Self {
        let mut destinations = [ControlDestination::None; 128];
        destinations[1] = ControlDestination::PulseWidth;
        destinations[6] = ControlDestination::Waveform;
        destinations[7] = ControlDestination::Volume;
        destinations[22] = ControlDestination::EnvAttack;
        destinations[23] = ControlDestination::EnvDecay;
        destinations[24] = ControlDestination::EnvSustain;
        destinations[25] = ControlDestination::EnvRelease;
        destinations[64] = ControlDestination::Hold;
        Self { destinations }
    }

    /// Look up where a controller number is routed. Numbers above 127
    /// cannot appear in a valid message and map to `None`.
    pub fn destination(&self, controller: u8) -> ControlDestination {
        self.destinations
            .get(usize::from(controller))
            .copied()
            .unwrap_or(ControlDestination::None)
    }

    /// Reroute a controller number.
    pub fn assign(&mut self, controller: u8, destination: ControlDestination) {
        if let Some(slot) = self.destinations.get_mut(usize::from(controller)) {
            *slot = destination;
        }
    }
}

impl Default for ControlMap {
    fn default() -> Self {
        Self::new()
    }
}

// Scalings from a 7-bit controller value to the parameter's own range.
// Each is a pure function so the mapping can be tested without a synth.

/// Volume controller value to output gain in 0.0 ..= 1.0.
pub fn gain_from_control(value: u8) -> f32 {
    f32::from(value) * (1.0 / 127.0)
}

/// Waveform controller value to a selector: sweeps 0-127 across the four
/// waveforms.
pub fn waveform_from_control(value: u8) -> Waveform {
    Waveform::from_selector((f32::from(value) * (4.0 / 127.0) + 1.0) as i32)
}

/// Pulse-width controller value to a duty cycle percentage, 5 ..= ~50.
pub fn pulse_width_from_control(value: u8) -> f32 {
    5.0 + f32::from(value) * (95.0 / 268.0)
}

/// Stage-time controller value to milliseconds.
///
/// Integer arithmetic: the step size is `max_ms / 127` whole milliseconds,
/// so a full-range sweep tops out just under the stage maximum.
pub fn stage_ms_from_control(value: u8, max_ms: u32) -> u32 {
    u32::from(value) * (max_ms / 127)
}

/// Sustain controller value to a percentage of peak, clamped so that full
/// deflection is exactly 100.
pub fn sustain_percent_from_control(value: u8) -> u32 {
    (u32::from(value) * 100 / 127).min(SUSTAIN_MAX_PERCENT)
}
