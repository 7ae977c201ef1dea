//! Recording notifier for testing.

use std::sync::Mutex;

use crate::application::lifecycle::{HostEvent, HostNotifier};

/// A [`HostNotifier`] that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().expect("lock poisoned").clone()
    }
}

impl HostNotifier for RecordingNotifier {
    fn notify(&self, event: HostEvent) {
        self.events.lock().expect("lock poisoned").push(event);
    }
}
