use std::collections::VecDeque;
use crate::core::event::ShipEvent;

/// Ship events waiting to be shown to the player, oldest first.
///
/// Persists across frames: the simulation appends once per frame, but the
/// head may stay put for several frames while a dialog it caused is open.
/// `handled_front` remembers that the head's primary effect (notifying the
/// player) already ran, so resuming later only repeats the secondary checks.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ShipEvent>,
    handled_front: bool,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(32),
            handled_front: false,
        }
    }

    /// Append a tick's worth of events at the tail, keeping their order.
    pub fn splice(&mut self, events: impl IntoIterator<Item = ShipEvent>) {
        self.events.extend(events);
    }

    /// The oldest unretired event.
    pub fn front(&self) -> Option<&ShipEvent> {
        self.events.front()
    }

    /// Whether the head's primary effect has already been applied.
    pub fn handled_front(&self) -> bool {
        self.handled_front
    }

    /// Record that the head's primary effect ran. No-op on an empty queue.
    pub fn mark_front_handled(&mut self) {
        if !self.events.is_empty() {
            self.handled_front = true;
        }
    }

    /// Remove the fully handled head and reset the latch for the next one.
    pub fn retire_front(&mut self) -> Option<ShipEvent> {
        self.handled_front = false;
        self.events.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShipEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::EventKind;

    fn event(kind: EventKind) -> ShipEvent {
        ShipEvent::new(None, None, kind)
    }

    #[test]
    fn splice_keeps_production_order() {
        let mut q = EventQueue::new();
        q.splice(vec![event(EventKind::BOARD), event(EventKind::JUMP)]);
        q.splice(vec![event(EventKind::DESTROY)]);
        let kinds: Vec<_> = q.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec![EventKind::BOARD, EventKind::JUMP, EventKind::DESTROY]);
    }

    #[test]
    fn latch_survives_until_retirement() {
        let mut q = EventQueue::new();
        q.splice(vec![event(EventKind::BOARD), event(EventKind::JUMP)]);
        q.mark_front_handled();
        assert!(q.handled_front());
        // Still the same head on the next look.
        assert_eq!(q.front().unwrap().kind(), EventKind::BOARD);
        assert!(q.handled_front());

        let retired = q.retire_front().unwrap();
        assert_eq!(retired.kind(), EventKind::BOARD);
        assert!(!q.handled_front());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn empty_queue_never_latches() {
        let mut q = EventQueue::new();
        q.mark_front_handled();
        assert!(!q.handled_front());
        assert!(q.retire_front().is_none());
    }
}
