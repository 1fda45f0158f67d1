//! Live channel coordinator
//!
//! The coordinator is the external collaborator that transports user events to
//! the server. This crate only needs fire-and-forget dispatch; transport,
//! retries and reconnection live behind the trait.
//!
//! All dispatch happens on the UI thread, so coordinators are shared with `Rc`.

use std::cell::RefCell;

use crate::payload::EventPayload;

/// Sink for user-generated events
pub trait Coordinator {
    /// Send an event over the live channel. Must not block.
    fn push_event(&self, kind: &str, payload: EventPayload);
}

impl<F> Coordinator for F
where
    F: Fn(&str, EventPayload),
{
    fn push_event(&self, kind: &str, payload: EventPayload) {
        self(kind, payload)
    }
}

/// Coordinator that keeps every pushed event in order
///
/// Useful for tests and for hosts that drain events once per frame.
#[derive(Debug, Default)]
pub struct RecordingCoordinator {
    events: RefCell<Vec<(String, EventPayload)>>,
}

impl RecordingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything pushed so far
    pub fn events(&self) -> Vec<(String, EventPayload)> {
        self.events.borrow().clone()
    }

    /// Remove and return everything pushed so far
    pub fn drain(&self) -> Vec<(String, EventPayload)> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl Coordinator for RecordingCoordinator {
    fn push_event(&self, kind: &str, payload: EventPayload) {
        tracing::trace!("push_event {} {}", kind, payload.event);
        self.events.borrow_mut().push((kind.to_string(), payload));
    }
}
