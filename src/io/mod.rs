/// Raw MIDI events and channel-voice message parsing.
pub mod midi;
/// Bounded single-producer/single-consumer event queue.
pub mod queue;
