//! Lifecycle records produced by the engine.
//!
//! The engine only builds these values; delivering them to observers is the
//! runtime's concern.

use crate::action::TurnAction;
use crate::combat::TurnOutcome;
use crate::state::{BattleSession, CharacterId, EndReason, Identity, SessionId, Side};

/// A new session was created.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleStarted {
    pub session: SessionId,
    pub fighter_a: CharacterId,
    pub fighter_b: CharacterId,
    /// Side that acts first.
    pub first: Side,
}

impl BattleStarted {
    pub fn from_session(session: &BattleSession) -> Self {
        Self {
            session: session.id(),
            fighter_a: session.fighter(Side::A),
            fighter_b: session.fighter(Side::B),
            first: session.turn_owner(),
        }
    }
}

/// A turn was accepted and resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnResult {
    pub session: SessionId,
    pub acting_character: CharacterId,
    pub action: TurnAction,
    pub outcome: TurnOutcome,
    /// Damage actually removed from the defender (0 for Defend).
    pub damage_dealt: u32,
    /// Defender's health after an attack, or the actor's health after Defend.
    pub resulting_health: u32,
}

/// A session reached its terminal state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEnded {
    pub session: SessionId,
    /// Controller of the winning character at the moment the battle ended.
    ///
    /// `None` when a timeout was claimed while the registry could not resolve
    /// the winner; the battle ends regardless.
    pub winner_identity: Option<Identity>,
    pub winner_character: CharacterId,
    pub loser_character: CharacterId,
    pub reason: EndReason,
}

/// Any record emitted by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStarted(BattleStarted),
    TurnResult(TurnResult),
    BattleEnded(BattleEnded),
}

impl BattleEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::BattleStarted(event) => event.session,
            Self::TurnResult(event) => event.session,
            Self::BattleEnded(event) => event.session,
        }
    }
}

impl From<BattleStarted> for BattleEvent {
    fn from(event: BattleStarted) -> Self {
        Self::BattleStarted(event)
    }
}

impl From<TurnResult> for BattleEvent {
    fn from(event: TurnResult) -> Self {
        Self::TurnResult(event)
    }
}

impl From<BattleEnded> for BattleEvent {
    fn from(event: BattleEnded) -> Self {
        Self::BattleEnded(event)
    }
}
