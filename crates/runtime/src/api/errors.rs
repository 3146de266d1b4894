//! Unified error types surfaced by the runtime API.
//!
//! Wraps rule violations from the engine, store failures and delegation
//! failures so clients can bubble them up with consistent context.
use thiserror::Error;

use battle_core::{BattleError, ErrorSeverity, GameError};

pub use crate::oracle::DelegationError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Delegation(#[from] DelegationError),

    #[error("arena requires a character registry before building")]
    MissingRegistry,
}

impl RuntimeError {
    /// The engine error behind this failure, if any.
    pub fn as_battle(&self) -> Option<&BattleError> {
        match self {
            Self::Battle(error) => Some(error),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Battle(error) => error.severity(),
            Self::Delegation(error) => error.severity(),
            Self::Repository(_) => ErrorSeverity::Internal,
            Self::MissingRegistry => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Battle(error) => error.error_code(),
            Self::Delegation(error) => error.error_code(),
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::MissingRegistry => "RUNTIME_MISSING_REGISTRY",
        }
    }
}
