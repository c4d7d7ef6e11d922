use serde::{Deserialize, Serialize};

use crate::viewport::Viewport;

/// Counts rendered frames.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    pub frame: u64,
}

impl FrameClock {
    pub fn advance(&mut self) {
        self.frame += 1;
    }
}

/// Events that may arrive between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportEvent {
    Resize { width: u32, height: u32 },
}

impl ViewportEvent {
    pub fn resize(viewport: Viewport) -> Self {
        Self::Resize {
            width: viewport.width,
            height: viewport.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub frame: u64,
    pub event: ViewportEvent,
}

impl ScheduledEvent {
    pub fn new(frame: u64, event: ViewportEvent) -> Self {
        Self { frame, event }
    }
}

/// Replays viewport events at fixed frame numbers.
#[derive(Debug, Default)]
pub struct Scheduler {
    events: Vec<ScheduledEvent>,
    next_event: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the queue. Events scheduled for the same frame keep their
    /// relative order.
    pub fn set_events(&mut self, events: Vec<ScheduledEvent>) {
        self.events = events;
        self.events.sort_by_key(|event| event.frame);
        self.next_event = 0;
    }

    /// Returns every not-yet-delivered event scheduled at or before `frame`.
    pub fn due(&mut self, frame: u64) -> Vec<ViewportEvent> {
        let start = self.next_event;
        while self
            .events
            .get(self.next_event)
            .is_some_and(|event| event.frame <= frame)
        {
            self.next_event += 1;
        }

        self.events[start..self.next_event]
            .iter()
            .map(|scheduled| scheduled.event)
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.events.len() - self.next_event
    }
}
