//! Repository contract for battle sessions.

use std::sync::{Arc, Mutex};

use battle_core::{BattleSession, SessionId};

use super::error::{RepositoryError, Result};

/// Shared handle to one stored session.
///
/// The mutex is the session's exclusive scope: every mutating operation
/// holds it from validation through event emission.
pub type SessionEntry = Arc<Mutex<BattleSession>>;

/// Store of all battle sessions, keyed by session id.
///
/// Sessions are created once and never deleted; ended sessions stay as
/// historical records.
pub trait SessionStore: Send + Sync {
    /// Reserve a fresh id. Ids are never handed out twice.
    fn next_id(&self) -> SessionId;

    /// Insert a newly created session under its reserved id.
    fn insert(&self, session: BattleSession) -> Result<()>;

    /// Handle to a stored session, for exclusive access.
    fn entry(&self, id: SessionId) -> Result<Option<SessionEntry>>;

    /// All stored session ids, in ascending order.
    fn session_ids(&self) -> Result<Vec<SessionId>>;

    /// Snapshot of a session.
    fn get(&self, id: SessionId) -> Result<Option<BattleSession>> {
        match self.entry(id)? {
            Some(entry) => {
                let session = entry.lock().map_err(|_| RepositoryError::LockPoisoned)?;
                Ok(Some(session.clone()))
            }
            None => Ok(None),
        }
    }

    /// Ids of sessions that still accept turns.
    fn active_sessions(&self) -> Result<Vec<SessionId>> {
        let mut active = Vec::new();
        for id in self.session_ids()? {
            if self.get(id)?.is_some_and(|session| session.is_active()) {
                active.push(id);
            }
        }
        Ok(active)
    }
}
