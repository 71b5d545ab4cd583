//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{DisplayEvent, EligibilityEvent, TransferEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Registry updates (spawns, manual timers, discovery)
    Eligibility,
    /// Hop requests and orchestrator transitions
    Transfer,
    /// Per-tick status snapshots
    Display,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Eligibility(EligibilityEvent),
    Transfer(TransferEvent),
    Display(DisplayEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Eligibility(_) => Topic::Eligibility,
            Event::Transfer(_) => Topic::Transfer,
            Event::Display(_) => Topic::Display,
        }
    }
}

struct Channels {
    eligibility: broadcast::Sender<Event>,
    transfer: broadcast::Sender<Event>,
    display: broadcast::Sender<Event>,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. The set of topics is fixed at construction.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            channels: Arc::new(Channels {
                eligibility: broadcast::channel(capacity).0,
                transfer: broadcast::channel(capacity).0,
                display: broadcast::channel(capacity).0,
            }),
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Eligibility => &self.channels.eligibility,
            Topic::Transfer => &self.channels.transfer,
            Topic::Display => &self.channels.display,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::WorldId;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut transfer_rx = bus.subscribe(Topic::Transfer);
        let mut display_rx = bus.subscribe(Topic::Display);

        bus.publish(Event::Transfer(TransferEvent::Blocked));
        bus.publish(Event::Eligibility(EligibilityEvent::WorldsDiscovered {
            added: 1,
            total: 1,
        }));

        assert_eq!(
            transfer_rx.recv().await.unwrap(),
            Event::Transfer(TransferEvent::Blocked)
        );
        assert!(display_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::Transfer(TransferEvent::Cleared {
            target: WorldId(302),
        }));
    }

    #[test]
    fn events_serialize_with_their_topic_tag() {
        let event = Event::Transfer(TransferEvent::Aborted {
            target: WorldId(302),
            attempts: 10,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Transfer":{"Aborted":{"target":302,"attempts":10}}}"#);
    }

    #[test]
    fn multiple_subscriptions_cover_requested_topics() {
        let bus = EventBus::new();
        let receivers = bus.subscribe_multiple(&[Topic::Eligibility, Topic::Display]);
        assert_eq!(receivers.len(), 2);
        assert!(receivers.contains_key(&Topic::Eligibility));
        assert!(!receivers.contains_key(&Topic::Transfer));
    }
}
