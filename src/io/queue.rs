use rtrb::{Consumer, Producer, RingBuffer};

use crate::io::midi::MidiEvent;

/*
The queue is the only state shared between the MIDI input context and the
audio callback. Both ends are wait-free: the producer drops events when the
ring is full rather than blocking or signalling backpressure, which keeps
the input thread realtime-safe and the renderer deterministic. Delivery is
strictly FIFO for the events that are retained.
*/

/// Producer half of the MIDI event queue. Owned by the input context.
pub struct MidiEventSender {
    tx: Producer<MidiEvent>,
}

impl MidiEventSender {
    /// Enqueue an event without blocking.
    ///
    /// Returns `false` when the queue was full and the event was dropped.
    /// Dropping is deliberate policy, not an error: the renderer's timing
    /// wins over event completeness.
    pub fn try_send(&mut self, event: MidiEvent) -> bool {
        self.tx.push(event).is_ok()
    }
}

/// Consumer half of the MIDI event queue. Owned by the render context.
pub struct MidiEventReceiver {
    rx: Consumer<MidiEvent>,
}

impl MidiEventReceiver {
    /// Dequeue at most one event without blocking.
    pub fn try_recv(&mut self) -> Option<MidiEvent> {
        self.rx.pop().ok()
    }
}

/// Create a bounded event queue pair with the given capacity.
pub fn midi_event_queue(capacity: usize) -> (MidiEventSender, MidiEventReceiver) {
    let (tx, rx) = RingBuffer::new(capacity);
    (MidiEventSender { tx }, MidiEventReceiver { rx })
}
