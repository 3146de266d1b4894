//! Error types for the battle state machine.

use crate::env::RegistryError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, Identity, SessionId, Timestamp};

/// Errors surfaced while starting or advancing a battle.
///
/// Every variant rejects the whole call; the session is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session {0} has already ended")]
    SessionInactive(SessionId),

    #[error("turn in session {session} timed out at {deadline} (now {now})")]
    TurnTimedOut {
        session: SessionId,
        deadline: Timestamp,
        now: Timestamp,
    },

    #[error("session {session} cannot be claimed before {deadline} (now {now})")]
    TimeoutNotReached {
        session: SessionId,
        deadline: Timestamp,
        now: Timestamp,
    },

    #[error("caller {caller} does not control {character} in session {session}")]
    NotAuthorized {
        session: SessionId,
        caller: Identity,
        character: CharacterId,
    },

    #[error("invalid participants {fighter_a} vs {fighter_b}: {reason}")]
    InvalidParticipants {
        fighter_a: CharacterId,
        fighter_b: CharacterId,
        reason: &'static str,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl BattleError {
    pub(crate) fn invalid_participants(
        fighter_a: CharacterId,
        fighter_b: CharacterId,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParticipants {
            fighter_a,
            fighter_b,
            reason,
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Waiting longer makes the claim valid
            Self::TimeoutNotReached { .. } => ErrorSeverity::Recoverable,
            Self::SessionNotFound(_)
            | Self::SessionInactive(_)
            | Self::TurnTimedOut { .. }
            | Self::NotAuthorized { .. }
            | Self::InvalidParticipants { .. } => ErrorSeverity::Validation,
            Self::Registry(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "BATTLE_SESSION_NOT_FOUND",
            Self::SessionInactive(_) => "BATTLE_SESSION_INACTIVE",
            Self::TurnTimedOut { .. } => "BATTLE_TURN_TIMED_OUT",
            Self::TimeoutNotReached { .. } => "BATTLE_TIMEOUT_NOT_REACHED",
            Self::NotAuthorized { .. } => "BATTLE_NOT_AUTHORIZED",
            Self::InvalidParticipants { .. } => "BATTLE_INVALID_PARTICIPANTS",
            Self::Registry(error) => error.error_code(),
        }
    }
}
