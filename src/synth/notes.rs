/// A note currently held on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldNote {
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
}

/// Insertion-ordered set of held notes.
///
/// The synth is monophonic: only the most recently pressed note that is
/// still held actually sounds. Earlier notes stay in the list so that
/// releasing the newest one falls back to the one pressed before it.
pub struct NoteTracker {
    held: Vec<HeldNote>,
}

impl NoteTracker {
    pub fn new() -> Self {
        Self { held: Vec::new() }
    }

    /// Record a newly pressed note at the end of the list.
    pub fn insert(&mut self, channel: u8, note: u8, velocity: u8) {
        self.held.push(HeldNote {
            channel,
            note,
            velocity,
        });
    }

    /// Remove the oldest held entry with this note number.
    ///
    /// Matching is by note number alone; the channel is recorded on insert
    /// but never compared here, so the same note held on two channels
    /// releases in insertion order. Remaining entries keep their relative
    /// order.
    pub fn remove(&mut self, note: u8) {
        if let Some(index) = self.held.iter().position(|held| held.note == note) {
            self.held.remove(index);
        }
    }

    /// The note that should sound: the most recently pressed one still
    /// held, or `None` when nothing is held.
    pub fn active(&self) -> Option<HeldNote> {
        self.held.last().copied()
    }

    /// Forget all held notes.
    pub fn reset(&mut self) {
        self.held.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }
}

impl Default for NoteTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_held_note_wins() {
        let mut tracker = NoteTracker::new();
        tracker.insert(0, 60, 100);
        tracker.insert(0, 64, 100);

        assert_eq!(tracker.active().map(|n| n.note), Some(64));

        // releasing the older note leaves the newer one active
        tracker.remove(60);
        assert_eq!(tracker.active().map(|n| n.note), Some(64));
    }

    #[test]
    fn releasing_the_newest_falls_back() {
        let mut tracker = NoteTracker::new();
        tracker.insert(0, 60, 100);
        tracker.insert(0, 64, 100);
        tracker.insert(0, 67, 100);

        tracker.remove(67);
        assert_eq!(tracker.active().map(|n| n.note), Some(64));
        tracker.remove(64);
        assert_eq!(tracker.active().map(|n| n.note), Some(60));
        tracker.remove(60);
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn remove_takes_the_oldest_duplicate_only() {
        let mut tracker = NoteTracker::new();
        tracker.insert(0, 60, 80);
        tracker.insert(0, 64, 90);
        tracker.insert(0, 60, 100);

        tracker.remove(60);
        assert_eq!(tracker.len(), 2);
        // the later press of 60 is still held and still the active note
        assert_eq!(tracker.active().map(|n| (n.note, n.velocity)), Some((60, 100)));
    }

    #[test]
    fn remove_ignores_the_channel() {
        let mut tracker = NoteTracker::new();
        tracker.insert(1, 60, 100);
        tracker.insert(2, 60, 100);

        tracker.remove(60);
        assert_eq!(tracker.active().map(|n| n.channel), Some(2));
    }

    #[test]
    fn removing_an_unknown_note_is_a_no_op() {
        let mut tracker = NoteTracker::new();
        tracker.insert(0, 60, 100);
        tracker.remove(99);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = NoteTracker::new();
        tracker.insert(0, 60, 100);
        tracker.insert(0, 64, 100);
        tracker.reset();

        assert!(tracker.is_empty());
        assert_eq!(tracker.active(), None);
    }
}
