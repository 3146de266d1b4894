//! Error types raised by repository implementations.

use battle_core::SessionId;
use thiserror::Error;

/// Errors surfaced by session store implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("session store lock was poisoned")]
    LockPoisoned,

    #[error("session {0} already exists")]
    DuplicateSession(SessionId),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
