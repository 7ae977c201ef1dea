//! Host notification channel.
//!
//! The backend raises [`HostEvent`]s (currently only "credential required")
//! without knowing what kind of shell is hosting it.  [`ChannelNotifier`]
//! pushes each event into an unbounded Tokio channel; the host owns the
//! receiver and turns events into whatever its UI needs (a settings dialog,
//! a log line in the headless binary).
//!
//! Sending never blocks and never fails loudly: if the host dropped its
//! receiver the event is logged and discarded.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::application::lifecycle::{HostEvent, HostNotifier};

pub mod mock;

/// [`HostNotifier`] backed by an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl ChannelNotifier {
    /// Creates the notifier and the receiver the host should drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostNotifier for ChannelNotifier {
    fn notify(&self, event: HostEvent) {
        match self.tx.send(event) {
            Ok(()) => debug!(event = event.name(), "host event emitted"),
            Err(_) => warn!(event = event.name(), "host is not listening; event dropped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_reach_the_receiver() {
        // Arrange
        let (notifier, mut rx) = ChannelNotifier::new();

        // Act
        notifier.notify(HostEvent::CredentialRequired);

        // Assert
        assert_eq!(rx.recv().await, Some(HostEvent::CredentialRequired));
    }

    #[test]
    fn test_notify_after_receiver_dropped_does_not_panic() {
        let (notifier, rx) = ChannelNotifier::new();
        drop(rx);
        notifier.notify(HostEvent::CredentialRequired);
    }
}
