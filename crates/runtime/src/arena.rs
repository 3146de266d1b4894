//! Battle service: start battles, take turns, claim timeouts.
//!
//! [`Arena`] is synchronous and thread-safe. Every mutating operation takes
//! the target session's lock, reads the clock, runs the engine and emits the
//! resulting events before releasing the lock. Operations on different
//! sessions never wait on each other.

use std::sync::Arc;

use battle_core::{
    BattleEnded, BattleEngine, BattleEnv, BattleError, BattleEvent, BattleSession, BattleStarted,
    CharacterId, CharacterRegistry, CharacterStats, EntropySource, ErrorSeverity, GameError,
    Identity, PcgRng, SessionId, TurnAction, TurnReport,
};
use tokio::sync::broadcast;

use crate::api::{Result, RuntimeError};
use crate::clock::{Clock, SystemClock};
use crate::config::ArenaConfig;
use crate::entropy::OsEntropy;
use crate::events::{EventBus, EventSink, Topic};
use crate::oracle::DelegationRegistry;
use crate::repository::{InMemorySessionStore, RepositoryError, SessionEntry, SessionStore};

/// Host of all battle sessions.
pub struct Arena {
    config: ArenaConfig,
    registry: Arc<dyn CharacterRegistry>,
    delegations: Arc<DelegationRegistry>,
    entropy: Arc<dyn EntropySource>,
    store: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    sink: Option<Arc<dyn EventSink>>,
    bus: EventBus,
}

impl Arena {
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::new()
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn registry(&self) -> &dyn CharacterRegistry {
        self.registry.as_ref()
    }

    pub fn delegations(&self) -> &DelegationRegistry {
        &self.delegations
    }

    /// Subscribe to events of one topic across all sessions.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.bus.subscribe(topic)
    }

    /// Create a session between two registered characters.
    ///
    /// The faster fighter acts first; ties favour `fighter_a`. Nothing is
    /// stored when validation fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start_battle(&self, fighter_a: CharacterId, fighter_b: CharacterId) -> Result<SessionId> {
        let env = self.env();
        let setup = BattleEngine::setup(&env, fighter_a, fighter_b)
            .inspect_err(|error| log_rejection("start_battle", error))?;

        let id = self.store.next_id();
        let session = setup.into_session(id, self.clock.now());

        let started = BattleStarted::from_session(&session);
        self.store.insert(session)?;

        // A turn on the new session waits for this lock, so BattleStarted
        // is always its first event.
        let entry = self.entry(id)?;
        let _guard = entry.lock().map_err(|_| RepositoryError::LockPoisoned)?;
        self.publish(BattleEvent::BattleStarted(started));

        tracing::info!(
            session = %id,
            %fighter_a,
            %fighter_b,
            first = %setup.first,
            "battle started"
        );
        Ok(id)
    }

    /// Resolve the acting side's turn on behalf of `caller`.
    #[tracing::instrument(level = "debug", skip(self, caller), fields(caller = %caller))]
    pub fn perform_turn(
        &self,
        session: SessionId,
        caller: &Identity,
        action: TurnAction,
    ) -> Result<TurnReport> {
        let entry = self.entry(session)?;
        let mut guard = entry.lock().map_err(|_| RepositoryError::LockPoisoned)?;

        let now = self.clock.now();
        let env = self.env();
        let report = BattleEngine::new(&mut *guard)
            .perform_turn(&env, caller, action, now)
            .inspect_err(|error| log_rejection("perform_turn", error))?;

        tracing::debug!(
            session = %session,
            character = %report.result.acting_character,
            outcome = ?report.result.outcome,
            damage = report.result.damage_dealt,
            health = report.result.resulting_health,
            "turn resolved"
        );
        for event in report.events() {
            self.publish(event);
        }
        if let Some(ended) = &report.ended {
            log_ended(ended);
        }

        Ok(report)
    }

    /// End a stalled battle in favour of the side that is not due to act.
    ///
    /// Any caller may claim; the caller is recorded in logs only.
    #[tracing::instrument(level = "debug", skip(self, caller), fields(caller = %caller))]
    pub fn claim_victory_after_timeout(
        &self,
        session: SessionId,
        caller: &Identity,
    ) -> Result<BattleEnded> {
        let entry = self.entry(session)?;
        let mut guard = entry.lock().map_err(|_| RepositoryError::LockPoisoned)?;

        let now = self.clock.now();
        let env = self.env();
        let ended = BattleEngine::new(&mut *guard)
            .claim_timeout(&env, now)
            .inspect_err(|error| log_rejection("claim_victory_after_timeout", error))?;

        if ended.winner_identity.is_none() {
            tracing::warn!(
                session = %session,
                winner_character = %ended.winner_character,
                "timeout winner has no resolvable controller"
            );
        }
        self.publish(BattleEvent::BattleEnded(ended.clone()));
        log_ended(&ended);

        Ok(ended)
    }

    /// Snapshot of a session, active or ended.
    pub fn session(&self, session: SessionId) -> Result<BattleSession> {
        self.store
            .get(session)?
            .ok_or(RuntimeError::Battle(BattleError::SessionNotFound(session)))
    }

    /// Every session id ever created, in ascending order.
    pub fn sessions(&self) -> Result<Vec<SessionId>> {
        Ok(self.store.session_ids()?)
    }

    pub fn active_sessions(&self) -> Result<Vec<SessionId>> {
        Ok(self.store.active_sessions()?)
    }

    /// Current stats of a registered character.
    pub fn stats_of(&self, character: CharacterId) -> Result<CharacterStats> {
        Ok(self
            .registry
            .stats_of(character)
            .map_err(BattleError::from)?)
    }

    /// Appoint a delegate for one of the caller's characters.
    pub fn set_delegate(
        &self,
        caller: &Identity,
        character: CharacterId,
        delegate: Identity,
    ) -> Result<Option<Identity>> {
        Ok(self
            .delegations
            .set_delegate(self.registry.as_ref(), caller, character, delegate)?)
    }

    pub fn revoke_delegate(&self, caller: &Identity, character: CharacterId) -> Result<Option<Identity>> {
        Ok(self
            .delegations
            .revoke(self.registry.as_ref(), caller, character)?)
    }

    fn entry(&self, session: SessionId) -> Result<SessionEntry> {
        self.store
            .entry(session)?
            .ok_or(RuntimeError::Battle(BattleError::SessionNotFound(session)))
            .inspect_err(|_| tracing::debug!(%session, "unknown session"))
    }

    fn env(&self) -> BattleEnv<'_> {
        let env = BattleEnv::new(self.registry.as_ref(), self.entropy.as_ref())
            .with_seed(self.config.entropy_seed.unwrap_or_default());
        if self.config.accept_delegates {
            env.with_delegations(self.delegations.as_ref())
        } else {
            env
        }
    }

    fn publish(&self, event: BattleEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(event.clone());
        }
        self.bus.publish(event);
    }
}

fn log_rejection(operation: &'static str, error: &BattleError) {
    match error.severity() {
        ErrorSeverity::Recoverable | ErrorSeverity::Validation => tracing::debug!(
            operation,
            code = error.error_code(),
            %error,
            "call rejected"
        ),
        ErrorSeverity::Internal | ErrorSeverity::Fatal => tracing::warn!(
            operation,
            code = error.error_code(),
            %error,
            "call failed"
        ),
    }
}

fn log_ended(ended: &BattleEnded) {
    tracing::info!(
        session = %ended.session,
        winner = ?ended.winner_identity,
        winner_character = %ended.winner_character,
        loser_character = %ended.loser_character,
        reason = %ended.reason,
        "battle ended"
    );
}

/// Builder for [`Arena`].
///
/// Only the character registry is required. Defaults: OS entropy (or PCG
/// when [`ArenaConfig::entropy_seed`] is set), the system clock, an
/// in-memory session store and no extra sink besides the event bus.
pub struct ArenaBuilder {
    config: ArenaConfig,
    registry: Option<Arc<dyn CharacterRegistry>>,
    delegations: Option<Arc<DelegationRegistry>>,
    entropy: Option<Arc<dyn EntropySource>>,
    store: Option<Arc<dyn SessionStore>>,
    clock: Option<Arc<dyn Clock>>,
    sink: Option<Arc<dyn EventSink>>,
}

impl ArenaBuilder {
    fn new() -> Self {
        Self {
            config: ArenaConfig::default(),
            registry: None,
            delegations: None,
            entropy: None,
            store: None,
            clock: None,
            sink: None,
        }
    }

    /// Override arena configuration
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required character registry
    pub fn registry(mut self, registry: Arc<dyn CharacterRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Share a delegation registry with other components
    pub fn delegations(mut self, delegations: Arc<DelegationRegistry>) -> Self {
        self.delegations = Some(delegations);
        self
    }

    pub fn entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = Some(entropy);
        self
    }

    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Receive every event synchronously, in addition to the event bus
    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn accept_delegates(mut self, accept: bool) -> Self {
        self.config.accept_delegates = accept;
        self
    }

    /// Build the arena
    pub fn build(self) -> Result<Arena> {
        let registry = self.registry.ok_or(RuntimeError::MissingRegistry)?;

        let entropy: Arc<dyn EntropySource> = match (self.entropy, self.config.entropy_seed) {
            (Some(entropy), _) => entropy,
            (None, Some(_)) => Arc::new(PcgRng),
            (None, None) => Arc::new(OsEntropy),
        };

        tracing::debug!(config = ?self.config, "arena built");

        Ok(Arena {
            bus: EventBus::with_capacity(self.config.event_buffer_size),
            registry,
            delegations: self.delegations.unwrap_or_default(),
            entropy,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemorySessionStore::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            sink: self.sink,
            config: self.config,
        })
    }
}
