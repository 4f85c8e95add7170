//! Event bus for broadcasting match events

use crate::event::MatchEvent;

/// A simple event queue the session pushes to and consumers drain
pub struct EventBus {
    events: Vec<MatchEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event onto the bus
    pub fn push(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    /// Drain all events from the bus, returning them
    pub fn drain(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut bus = EventBus::new();
        assert!(bus.is_empty());

        bus.push(MatchEvent::PlayerDefeated { index: 1 });
        bus.push(MatchEvent::ComboPerformed { index: 0, count: 3 });

        assert_eq!(bus.len(), 2);
        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(bus.is_empty());
    }

    #[test]
    fn drain_clears() {
        let mut bus = EventBus::new();
        bus.push(MatchEvent::PlayerDefeated { index: 0 });

        let _ = bus.drain();
        assert!(bus.drain().is_empty());
    }
}
