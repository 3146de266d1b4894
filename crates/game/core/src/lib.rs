//! Deterministic battle rules shared by the runtime and offline tools.
//!
//! `battle-core` defines the canonical duel rules (session record, combat
//! math, turn state machine) and exposes pure APIs. It never performs I/O or
//! locking: collaborators such as the character registry and the entropy
//! source are injected through [`env::BattleEnv`], and every state change
//! flows through [`engine::BattleEngine`].
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod state;

pub use action::TurnAction;
pub use combat::{AttackResolution, AttackRolls, AttackStyle, TurnOutcome};
pub use config::BattleConfig;
pub use engine::{BattleEngine, BattleError, BattleSetup, TurnReport};
pub use env::{
    BattleEnv, CharacterRegistry, CharacterStats, DelegationOracle, Element, EntropySource,
    PcgRng, RegistryError, RollContext, compute_seed,
};
pub use error::{ErrorSeverity, GameError};
pub use event::{BattleEnded, BattleEvent, BattleStarted, TurnResult};
pub use state::{BattleSession, CharacterId, EndReason, Identity, SessionId, Side, Timestamp};
