use crate::api::types::PageEvent;

/// A queue of engine-to-host commands.
/// The engine pushes while ticking; the web layer drains and applies them to the DOM.
pub struct EventQueue {
    events: Vec<PageEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: PageEvent) {
        self.events.push(event);
    }

    /// Mutable access for `Sequencer::advance`, which appends in place.
    pub fn buffer(&mut self) -> &mut Vec<PageEvent> {
        &mut self.events
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
