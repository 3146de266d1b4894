//! Topic-based event bus.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use battle_core::BattleEvent;

use super::sink::EventSink;

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battles starting and ending
    Lifecycle,
    /// Resolved turns
    Turn,
}

impl Topic {
    pub fn of(event: &BattleEvent) -> Self {
        match event {
            BattleEvent::BattleStarted(_) | BattleEvent::BattleEnded(_) => Topic::Lifecycle,
            BattleEvent::TurnResult(_) => Topic::Turn,
        }
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to the topics they care about. Publishing never
/// blocks; a subscriber that falls behind by more than the channel capacity
/// observes `RecvError::Lagged`.
#[derive(Clone)]
pub struct EventBus {
    lifecycle: broadcast::Sender<BattleEvent>,
    turn: broadcast::Sender<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a bus with the given capacity for each topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lifecycle: broadcast::channel(capacity).0,
            turn: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<BattleEvent> {
        match topic {
            Topic::Lifecycle => &self.lifecycle,
            Topic::Turn => &self.turn,
        }
    }

    /// Publish an event to its topic.
    pub fn publish(&self, event: BattleEvent) {
        let topic = Topic::of(&event);
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: BattleEvent) {
        self.publish(event);
    }
}
