//! Delegation registry: who may act on behalf of a character's controller.
//!
//! Independent of combat. The arena only consults it when
//! [`crate::ArenaConfig::accept_delegates`] is enabled.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::{
    CharacterId, CharacterRegistry, DelegationOracle, ErrorSeverity, GameError, Identity,
    RegistryError,
};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DelegationError {
    #[error("{caller} does not control {character}")]
    NotController {
        caller: Identity,
        character: CharacterId,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("delegation registry lock was poisoned")]
    LockPoisoned,
}

impl GameError for DelegationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotController { .. } => ErrorSeverity::Validation,
            Self::Registry(error) => error.severity(),
            Self::LockPoisoned => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotController { .. } => "DELEGATION_NOT_CONTROLLER",
            Self::Registry(error) => error.error_code(),
            Self::LockPoisoned => "DELEGATION_LOCK_POISONED",
        }
    }
}

/// Mapping from character to the identity acting for its controller.
#[derive(Default)]
pub struct DelegationRegistry {
    delegates: RwLock<HashMap<CharacterId, Identity>>,
}

impl DelegationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appoint `delegate` for `character`. Only the current controller may do so.
    ///
    /// Returns the delegate that was replaced, if any.
    pub fn set_delegate(
        &self,
        registry: &dyn CharacterRegistry,
        caller: &Identity,
        character: CharacterId,
        delegate: Identity,
    ) -> Result<Option<Identity>, DelegationError> {
        ensure_controller(registry, caller, character)?;
        let mut delegates = self
            .delegates
            .write()
            .map_err(|_| DelegationError::LockPoisoned)?;
        tracing::debug!(%character, %delegate, "delegate appointed");
        Ok(delegates.insert(character, delegate))
    }

    /// Remove the delegate of `character`. Only the current controller may do so.
    pub fn revoke(
        &self,
        registry: &dyn CharacterRegistry,
        caller: &Identity,
        character: CharacterId,
    ) -> Result<Option<Identity>, DelegationError> {
        ensure_controller(registry, caller, character)?;
        let mut delegates = self
            .delegates
            .write()
            .map_err(|_| DelegationError::LockPoisoned)?;
        tracing::debug!(%character, "delegate revoked");
        Ok(delegates.remove(&character))
    }

    /// All current delegations, ordered by character id.
    pub fn delegations(&self) -> Result<Vec<(CharacterId, Identity)>, DelegationError> {
        let delegates = self
            .delegates
            .read()
            .map_err(|_| DelegationError::LockPoisoned)?;
        let mut all: Vec<_> = delegates
            .iter()
            .map(|(character, delegate)| (*character, delegate.clone()))
            .collect();
        all.sort_unstable_by_key(|(character, _)| *character);
        Ok(all)
    }
}

impl DelegationOracle for DelegationRegistry {
    fn delegate_of(&self, character: CharacterId) -> Option<Identity> {
        self.delegates
            .read()
            .ok()
            .and_then(|delegates| delegates.get(&character).cloned())
    }
}

fn ensure_controller(
    registry: &dyn CharacterRegistry,
    caller: &Identity,
    character: CharacterId,
) -> Result<(), DelegationError> {
    if &registry.controller_of(character)? == caller {
        Ok(())
    } else {
        Err(DelegationError::NotController {
            caller: caller.clone(),
            character,
        })
    }
}
