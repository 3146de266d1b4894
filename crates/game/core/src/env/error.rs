//! Registry access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterId;

/// Errors raised by character registry lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// The registry has no record for the character.
    #[error("character {0} is not registered")]
    UnknownCharacter(CharacterId),

    /// The registry backend could not be read.
    #[error("character registry unavailable")]
    Unavailable,
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCharacter(_) => ErrorSeverity::Validation,
            Self::Unavailable => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter(_) => "REGISTRY_UNKNOWN_CHARACTER",
            Self::Unavailable => "REGISTRY_UNAVAILABLE",
        }
    }
}
