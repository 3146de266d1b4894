//! Deterministic collaborators for engine unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::env::{CharacterRegistry, CharacterStats, DelegationOracle, EntropySource, RegistryError};
use crate::state::{BattleSession, CharacterId, Identity, SessionId, Side, Timestamp};

pub(crate) const ALICE: CharacterId = CharacterId(1);
pub(crate) const BOB: CharacterId = CharacterId(2);

#[derive(Default)]
pub(crate) struct StaticRegistry {
    characters: HashMap<CharacterId, (CharacterStats, Identity)>,
}

impl StaticRegistry {
    pub(crate) fn with(mut self, id: CharacterId, stats: CharacterStats, owner: &str) -> Self {
        self.characters.insert(id, (stats, Identity::from(owner)));
        self
    }

    /// Alice (atk 20, def 10, spd 10) against Bob (atk 20, def 15, spd 5).
    pub(crate) fn duel() -> Self {
        Self::default()
            .with(ALICE, CharacterStats::new(20, 10, 10, 0, 0), "alice")
            .with(BOB, CharacterStats::new(20, 15, 5, 0, 0), "bob")
    }
}

impl CharacterRegistry for StaticRegistry {
    fn stats_of(&self, character: CharacterId) -> Result<CharacterStats, RegistryError> {
        self.characters
            .get(&character)
            .map(|(stats, _)| *stats)
            .ok_or(RegistryError::UnknownCharacter(character))
    }

    fn controller_of(&self, character: CharacterId) -> Result<Identity, RegistryError> {
        self.characters
            .get(&character)
            .map(|(_, owner)| owner.clone())
            .ok_or(RegistryError::UnknownCharacter(character))
    }
}

/// Returns queued values in order; once empty every roll is `sides - 1`.
#[derive(Default)]
pub(crate) struct QueuedEntropy {
    values: Mutex<VecDeque<u32>>,
}

impl QueuedEntropy {
    pub(crate) fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

impl EntropySource for QueuedEntropy {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.values.lock().unwrap().pop_front().unwrap_or(u32::MAX)
    }

    fn roll(&self, _seed: u64, sides: u32) -> u32 {
        match self.values.lock().unwrap().pop_front() {
            Some(value) => value % sides,
            None => sides.saturating_sub(1),
        }
    }
}

pub(crate) struct SingleDelegate(pub CharacterId, pub Identity);

impl DelegationOracle for SingleDelegate {
    fn delegate_of(&self, character: CharacterId) -> Option<Identity> {
        (character == self.0).then(|| self.1.clone())
    }
}

/// Fresh session with Alice on side A opening at t=1000.
pub(crate) fn session() -> BattleSession {
    BattleSession::new(SessionId(1), ALICE, BOB, Side::A, Timestamp(1_000))
}
