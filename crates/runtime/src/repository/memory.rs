//! In-memory SessionStore implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use battle_core::{BattleSession, SessionId};

use super::error::{RepositoryError, Result};
use super::traits::{SessionEntry, SessionStore};

/// Arena of sessions addressed by id.
///
/// The map lock is held only while looking up or inserting entries; each
/// session carries its own mutex, so operations on different sessions never
/// wait on each other.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    next_id: AtomicU64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|sessions| sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn next_id(&self) -> SessionId {
        SessionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, session: BattleSession) -> Result<()> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let id = session.id();
        if sessions.contains_key(&id) {
            return Err(RepositoryError::DuplicateSession(id));
        }
        sessions.insert(id, Arc::new(Mutex::new(session)));
        Ok(())
    }

    fn entry(&self, id: SessionId) -> Result<Option<SessionEntry>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(sessions.get(&id).cloned())
    }

    fn session_ids(&self) -> Result<Vec<SessionId>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut ids: Vec<SessionId> = sessions.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }
}
