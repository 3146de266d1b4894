//! In-memory CharacterRegistry implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use battle_core::{CharacterId, CharacterRegistry, CharacterStats, Identity, RegistryError};

#[derive(Clone, Debug)]
struct CharacterRecord {
    stats: CharacterStats,
    controller: Identity,
}

/// Characters with their stats and current controller.
///
/// Ownership changes through [`transfer`](Self::transfer) are visible to the
/// very next engine call.
#[derive(Default)]
pub struct InMemoryCharacterRegistry {
    characters: RwLock<HashMap<CharacterId, CharacterRecord>>,
}

impl InMemoryCharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(id, stats, controller)` triples.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (CharacterId, CharacterStats, Identity)>,
    ) -> Self {
        let characters = entries
            .into_iter()
            .map(|(id, stats, controller)| (id, CharacterRecord { stats, controller }))
            .collect();
        Self {
            characters: RwLock::new(characters),
        }
    }

    /// Register or replace a character.
    pub fn insert(
        &self,
        id: CharacterId,
        stats: CharacterStats,
        controller: Identity,
    ) -> Result<(), RegistryError> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RegistryError::Unavailable)?;
        characters.insert(id, CharacterRecord { stats, controller });
        Ok(())
    }

    /// Hand a character to a new controller. Returns the previous controller.
    pub fn transfer(&self, id: CharacterId, controller: Identity) -> Result<Identity, RegistryError> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RegistryError::Unavailable)?;
        let record = characters
            .get_mut(&id)
            .ok_or(RegistryError::UnknownCharacter(id))?;
        tracing::debug!(character = %id, from = %record.controller, to = %controller, "character transferred");
        Ok(std::mem::replace(&mut record.controller, controller))
    }

    /// Remove a character. Returns its stats if it was registered.
    pub fn remove(&self, id: CharacterId) -> Result<Option<CharacterStats>, RegistryError> {
        let mut characters = self
            .characters
            .write()
            .map_err(|_| RegistryError::Unavailable)?;
        Ok(characters.remove(&id).map(|record| record.stats))
    }

    fn record(&self, id: CharacterId) -> Result<CharacterRecord, RegistryError> {
        let characters = self
            .characters
            .read()
            .map_err(|_| RegistryError::Unavailable)?;
        characters
            .get(&id)
            .cloned()
            .ok_or(RegistryError::UnknownCharacter(id))
    }
}

impl CharacterRegistry for InMemoryCharacterRegistry {
    fn stats_of(&self, character: CharacterId) -> Result<CharacterStats, RegistryError> {
        self.record(character).map(|record| record.stats)
    }

    fn controller_of(&self, character: CharacterId) -> Result<Identity, RegistryError> {
        self.record(character).map(|record| record.controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_and_transfer() {
        let registry = InMemoryCharacterRegistry::from_entries([(
            CharacterId(1),
            CharacterStats::new(10, 5, 3, 10, 10),
            Identity::from("alice"),
        )]);

        assert_eq!(registry.stats_of(CharacterId(1)).unwrap().attack, 10);
        assert_eq!(
            registry.controller_of(CharacterId(1)).unwrap(),
            Identity::from("alice")
        );

        let previous = registry
            .transfer(CharacterId(1), Identity::from("bob"))
            .unwrap();
        assert_eq!(previous, Identity::from("alice"));
        assert_eq!(
            registry.controller_of(CharacterId(1)).unwrap(),
            Identity::from("bob")
        );
    }

    #[test]
    fn unknown_characters_are_reported() {
        let registry = InMemoryCharacterRegistry::new();
        assert_eq!(
            registry.stats_of(CharacterId(7)),
            Err(RegistryError::UnknownCharacter(CharacterId(7)))
        );
        assert_eq!(
            registry.transfer(CharacterId(7), Identity::from("bob")),
            Err(RegistryError::UnknownCharacter(CharacterId(7)))
        );
        assert!(!registry.contains(CharacterId(7)));
    }

    #[test]
    fn remove_drops_character() {
        let registry = InMemoryCharacterRegistry::new();
        let stats = CharacterStats::new(1, 2, 3, 4, 5);
        registry
            .insert(CharacterId(3), stats, Identity::from("carol"))
            .unwrap();
        assert_eq!(registry.remove(CharacterId(3)).unwrap(), Some(stats));
        assert_eq!(registry.remove(CharacterId(3)).unwrap(), None);
    }
}
