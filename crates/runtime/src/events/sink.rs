//! Event sink contract and simple implementations.

use std::sync::{Arc, Mutex};

use battle_core::{BattleEvent, SessionId};

/// Receiver of battle events.
///
/// Called synchronously inside the session's exclusive scope; implementations
/// must not block for long and must not call back into the arena.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BattleEvent);
}

/// Keeps every event in memory, in emission order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<BattleEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BattleEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events of one session, in emission order.
    pub fn for_session(&self, session: SessionId) -> Vec<BattleEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.session() == session)
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: BattleEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Writes each event to the tracing subscriber at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: BattleEvent) {
        match &event {
            BattleEvent::BattleStarted(started) => tracing::info!(
                session = %started.session,
                fighter_a = %started.fighter_a,
                fighter_b = %started.fighter_b,
                "battle started"
            ),
            BattleEvent::TurnResult(turn) => tracing::info!(
                session = %turn.session,
                character = %turn.acting_character,
                action = %turn.action,
                damage = turn.damage_dealt,
                health = turn.resulting_health,
                "turn resolved"
            ),
            BattleEvent::BattleEnded(ended) => tracing::info!(
                session = %ended.session,
                winner = ?ended.winner_identity,
                reason = ?ended.reason,
                "battle ended"
            ),
        }
    }
}

/// Delivers every event to each inner sink in order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: BattleEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}
