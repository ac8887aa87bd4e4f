use rtrb::Consumer;

use crate::dsp::envelope::{Envelope, ATTACK_MAX_MS, DECAY_MAX_MS, RELEASE_MAX_MS};
use crate::dsp::oscillator::Oscillator;
use crate::dsp::pitch::{note_to_frequency, PitchModulator};
use crate::engine::ControlCommand;
use crate::io::midi::ChannelMessage;
use crate::io::queue::MidiEventReceiver;
use crate::synth::control::{self, ControlDestination, ControlMap};
use crate::synth::notes::NoteTracker;
use crate::synth::voice::VoiceState;

/*
The monophonic voice and its render loop.

Everything here runs on the audio callback thread and only there: the voice
state, the envelope, the oscillator and the note tracker have a single
owner and need no locks. The two rtrb consumers are the only inputs shared
with other threads.

Per buffer, at most ONE MIDI event is dequeued and applied. That bounds the
work done per callback and keeps event application deterministic; the cost
is that a burst of events drains at one per buffer (~3 ms at 44.1 kHz /
128 frames), which is accepted.

The per-sample order inside the loop is fixed:

  1. envelope advances one sample
  2. vibrato nudges the bent frequency
  3. the oscillator produces one sample at the current phase
  4. gain * envelope * sample goes to both stereo channels
  5. the phase advances by the (vibrato-modulated) bent frequency
*/

pub struct MonoSynth {
    events: MidiEventReceiver,
    commands: Consumer<ControlCommand>,

    notes: NoteTracker,
    controls: ControlMap,
    voice: VoiceState,
    envelope: Envelope,
    oscillator: Oscillator,
    pitch: PitchModulator,

    /// Physical keys currently down, counted from Note-On/Note-Off pairs.
    /// Tracked separately from the note list for the hold-pedal logic.
    keys_down: i32,
    sample_rate: f32,
}

impl MonoSynth {
    pub fn new(
        sample_rate: f32,
        events: MidiEventReceiver,
        commands: Consumer<ControlCommand>,
    ) -> Self {
        Self {
            events,
            commands,
            notes: NoteTracker::new(),
            controls: ControlMap::new(),
            voice: VoiceState::new(),
            envelope: Envelope::new(sample_rate),
            oscillator: Oscillator::new(),
            pitch: PitchModulator::new(),
            keys_down: 0,
            sample_rate,
        }
    }

    /// Render one buffer of interleaved stereo samples.
    ///
    /// Drains pending control-surface commands, applies at most one queued
    /// MIDI event, then fills `out`. Realtime-safe: no allocation, no
    /// blocking, work bounded by the buffer length.
    pub fn render_block(&mut self, out: &mut [f32]) {
        while let Ok(command) = self.commands.pop() {
            self.apply_command(command);
        }

        if let Some(event) = self.events.try_recv() {
            self.dispatch(event.message());
            self.refresh_frequency();
        }

        let sample_rate = self.sample_rate;
        for frame in out.chunks_exact_mut(2) {
            let amplitude = self.envelope.advance();
            self.voice.bent_frequency = self.pitch.apply_vibrato(
                self.voice.bent_frequency,
                self.voice.base_frequency,
                sample_rate,
            );

            let sample = self
                .oscillator
                .sample(self.voice.waveform, self.voice.pulse_width);
            let value = self.voice.gain * amplitude * sample;
            frame[0] = value;
            frame[1] = value;

            self.oscillator
                .advance(self.voice.bent_frequency, sample_rate);
        }
    }

    fn dispatch(&mut self, message: ChannelMessage) {
        match message {
            ChannelMessage::NoteOn {
                channel,
                key,
                velocity,
            } => {
                self.keys_down += 1;
                self.notes.insert(channel, key, velocity);
                self.envelope.trigger(velocity);
            }
            ChannelMessage::NoteOff { key, .. } => {
                self.keys_down -= 1;
                self.notes.remove(key);
                if self.notes.active().is_none() && !self.voice.hold {
                    self.envelope.release();
                }
            }
            ChannelMessage::ControlChange {
                controller, value, ..
            } => self.apply_control(controller, value),
            ChannelMessage::ChannelPressure { pressure, .. } => {
                self.pitch.channel_pressure(pressure);
            }
            ChannelMessage::PitchBend { value, .. } => {
                self.pitch.set_wheel(value);
                self.voice.bent_frequency = self.pitch.bent_frequency(self.voice.base_frequency);
            }
            ChannelMessage::Unsupported => {}
        }
    }

    /// Re-derive base and bent frequency from the active note. Runs after
    /// every dispatched event.
    ///
    /// The pitch-wheel state persists across notes, so the bend is
    /// reapplied to every new base frequency. When the last note is
    /// released the previous frequency is kept for the release tail.
    fn refresh_frequency(&mut self) {
        if let Some(active) = self.notes.active() {
            self.voice.base_frequency = note_to_frequency(active.note);
            self.voice.bent_frequency = self.pitch.bent_frequency(self.voice.base_frequency);
        }
    }

    fn apply_control(&mut self, controller: u8, value: u8) {
        match self.controls.destination(controller) {
            ControlDestination::Volume => {
                self.voice.gain = control::gain_from_control(value);
            }
            ControlDestination::Waveform => {
                self.voice.waveform = control::waveform_from_control(value);
            }
            ControlDestination::PulseWidth => {
                self.voice.pulse_width = control::pulse_width_from_control(value);
            }
            ControlDestination::EnvAttack => {
                self.envelope
                    .set_attack_ms(control::stage_ms_from_control(value, ATTACK_MAX_MS));
            }
            ControlDestination::EnvDecay => {
                self.envelope
                    .set_decay_ms(control::stage_ms_from_control(value, DECAY_MAX_MS));
            }
            ControlDestination::EnvSustain => {
                self.envelope
                    .set_sustain_percent(control::sustain_percent_from_control(value));
            }
            ControlDestination::EnvRelease => {
                self.envelope
                    .set_release_ms(control::stage_ms_from_control(value, RELEASE_MAX_MS));
            }
            ControlDestination::Hold => {
                self.voice.hold = !self.voice.hold;
                if !self.voice.hold && self.keys_down == 0 {
                    self.envelope.release();
                }
            }
            // Recognized but not routed to the voice; aftertouch is the
            // only vibrato control for now.
            ControlDestination::VibratoDepth | ControlDestination::VibratoRate => {}
            ControlDestination::Frequency => {}
            ControlDestination::None => {}
        }
    }

    fn apply_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::SetWaveform(waveform) => self.voice.waveform = waveform,
            ControlCommand::SetAttackMs(ms) => self.envelope.set_attack_ms(ms),
            ControlCommand::SetDecayMs(ms) => self.envelope.set_decay_ms(ms),
            ControlCommand::SetSustainPercent(percent) => {
                self.envelope.set_sustain_percent(percent);
            }
            ControlCommand::SetReleaseMs(ms) => self.envelope.set_release_ms(ms),
        }
    }

    pub fn voice(&self) -> &VoiceState {
        &self.voice
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn notes(&self) -> &NoteTracker {
        &self.notes
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
