/// A raw channel-voice MIDI event as read from the input device.
///
/// Events are immutable once enqueued; the render side decodes them with
/// [`MidiEvent::message`]. The timestamp is whatever clock the input source
/// provides (microseconds for hardware input) and is carried through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
    pub timestamp: u64,
}

/// A decoded channel-voice message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMessage {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
    /// Coarse pitch-wheel position: the 7-bit most significant data byte
    /// only, 64 = center. The fine byte is ignored.
    PitchBend { channel: u8, value: u8 },
    /// Anything this synth does not react to (program change, system
    /// messages, ...).
    Unsupported,
}

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xB0;
const CHANNEL_PRESSURE: u8 = 0xD0;
const PITCH_BEND: u8 = 0xE0;

impl MidiEvent {
    pub fn new(status: u8, data1: u8, data2: u8, timestamp: u64) -> Self {
        Self {
            status,
            data1,
            data2,
            timestamp,
        }
    }

    /// Build an event from raw wire bytes.
    ///
    /// Accepts three-byte channel-voice messages and the two-byte channel
    /// pressure message. Returns `None` for byte strings that do not start
    /// with a status byte.
    pub fn from_bytes(bytes: &[u8], timestamp: u64) -> Option<Self> {
        match *bytes {
            [status, data1, data2, ..] if status & 0x80 != 0 => {
                Some(Self::new(status, data1, data2, timestamp))
            }
            [status, data1] if status & 0x80 != 0 => Some(Self::new(status, data1, 0, timestamp)),
            _ => None,
        }
    }

    /// Decode the status byte into a channel message.
    ///
    /// Note-On with velocity 0 decodes as Note-Off: many keyboards use it
    /// that way to keep the running-status byte stream short.
    pub fn message(&self) -> ChannelMessage {
        let kind = self.status & 0xF0;
        let channel = self.status & 0x0F;

        match kind {
            NOTE_ON if self.data2 > 0 => ChannelMessage::NoteOn {
                channel,
                key: self.data1,
                velocity: self.data2,
            },
            NOTE_ON | NOTE_OFF => ChannelMessage::NoteOff {
                channel,
                key: self.data1,
                velocity: self.data2,
            },
            CONTROL_CHANGE => ChannelMessage::ControlChange {
                channel,
                controller: self.data1,
                value: self.data2,
            },
            CHANNEL_PRESSURE => ChannelMessage::ChannelPressure {
                channel,
                pressure: self.data1,
            },
            PITCH_BEND => ChannelMessage::PitchBend {
                channel,
                value: self.data2,
            },
            _ => ChannelMessage::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_note_on_with_channel() {
        let event = MidiEvent::new(0x93, 60, 100, 0);
        assert_eq!(
            event.message(),
            ChannelMessage::NoteOn {
                channel: 3,
                key: 60,
                velocity: 100
            }
        );
    }

    #[test]
    fn zero_velocity_note_on_is_note_off() {
        let event = MidiEvent::new(0x90, 60, 0, 0);
        assert_eq!(
            event.message(),
            ChannelMessage::NoteOff {
                channel: 0,
                key: 60,
                velocity: 0
            }
        );
    }

    #[test]
    fn pitch_bend_takes_the_coarse_byte() {
        let event = MidiEvent::new(0xE0, 0x7F, 96, 0);
        assert_eq!(
            event.message(),
            ChannelMessage::PitchBend {
                channel: 0,
                value: 96
            }
        );
    }

    #[test]
    fn channel_pressure_parses_from_two_bytes() {
        let event = MidiEvent::from_bytes(&[0xD2, 88], 7).unwrap();
        assert_eq!(
            event.message(),
            ChannelMessage::ChannelPressure {
                channel: 2,
                pressure: 88
            }
        );
        assert_eq!(event.timestamp, 7);
    }

    #[test]
    fn data_bytes_without_status_are_rejected() {
        assert_eq!(MidiEvent::from_bytes(&[60, 100, 0], 0), None);
        assert_eq!(MidiEvent::from_bytes(&[], 0), None);
        assert_eq!(MidiEvent::from_bytes(&[0x45], 0), None);
    }

    #[test]
    fn unknown_status_decodes_as_unsupported() {
        // program change
        let event = MidiEvent::new(0xC0, 5, 0, 0);
        assert_eq!(event.message(), ChannelMessage::Unsupported);
    }
}
