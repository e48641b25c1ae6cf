// SPDX-FileCopyrightText: 2026 Aerohost Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process status transport built on a tokio broadcast channel.

use aerohost_core::{AerohostError, StatusMessage, StatusPublisher};
use tokio::sync::broadcast;
use tracing::trace;

/// Upper bound on unread messages kept per subscriber.
pub const MAX_CAPACITY: usize = 65_536;

/// Publishes status messages to every subscriber of a topic.
///
/// Slow subscribers lag and skip messages rather than blocking the tick.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    topic: String,
    sender: broadcast::Sender<StatusMessage>,
}

impl BroadcastPublisher {
    /// Create a publisher keeping up to `capacity` unread messages per
    /// subscriber, clamped to `1..=MAX_CAPACITY`.
    pub fn new(topic: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_CAPACITY));
        Self {
            topic: topic.into(),
            sender,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl StatusPublisher for BroadcastPublisher {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, message: StatusMessage) -> Result<(), AerohostError> {
        // Sending only fails when nobody is subscribed, which is not an error
        // for a status topic.
        let delivered = self.sender.send(message).unwrap_or(0);
        trace!(topic = %self.topic, delivered, "status published");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerohost_core::{Clock, ControlMode, SystemClock};

    #[tokio::test]
    async fn subscribers_receive_messages() {
        let publisher = BroadcastPublisher::new("controller/info", 8);
        let mut rx = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 1);

        let msg = StatusMessage::new(SystemClock.now(), ControlMode::UNSET);
        publisher.publish(msg.clone()).unwrap();
        assert_eq!(rx.recv().await.unwrap(), msg);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let publisher = BroadcastPublisher::new("controller/info", 8);
        let msg = StatusMessage::new(SystemClock.now(), ControlMode::UNSET);
        assert!(publisher.publish(msg).is_ok());
        assert_eq!(publisher.topic(), "controller/info");
    }

    #[test]
    fn oversized_capacity_is_clamped() {
        let publisher = BroadcastPublisher::new("controller/info", usize::MAX);
        let msg = StatusMessage::new(SystemClock.now(), ControlMode::UNSET);
        assert!(publisher.publish(msg).is_ok());
    }
}
