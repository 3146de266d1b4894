//! Roster loader.
//!
//! Loads the character catalog from RON files.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};
use battle_core::{CharacterId, CharacterStats, Identity};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One character as written in a roster file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u64,
    pub name: String,
    /// Identity that initially controls the character.
    pub controller: String,
    pub stats: CharacterStats,
}

impl RosterEntry {
    pub fn character(&self) -> CharacterId {
        CharacterId(self.id)
    }

    pub fn controller(&self) -> Identity {
        Identity::new(self.controller.clone())
    }
}

/// Validated character catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, character: CharacterId) -> Option<&RosterEntry> {
        self.entries.iter().find(|entry| entry.id == character.0)
    }

    /// Look up a character by name, ignoring ASCII case.
    pub fn find_by_name(&self, name: &str) -> Option<&RosterEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// `(id, stats, controller)` triples for seeding a character registry.
    pub fn registry_entries(
        &self,
    ) -> impl Iterator<Item = (CharacterId, CharacterStats, Identity)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.character(), entry.stats, entry.controller()))
    }
}

/// Loader for rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<RosterEntry>`
    pub fn load(path: &Path) -> LoadResult<Roster> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid roster {}", path.display()))
    }

    /// The roster bundled with this crate.
    pub fn bundled() -> LoadResult<Roster> {
        Self::parse(crate::DEFAULT_ROSTER).context("Invalid bundled roster")
    }

    /// Parse and validate roster RON.
    ///
    /// Rejects duplicate ids, empty controllers and percent stats above 100.
    pub fn parse(content: &str) -> LoadResult<Roster> {
        let entries: Vec<RosterEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id) {
                bail!("Duplicate character id {} ('{}')", entry.id, entry.name);
            }
            if entry.controller.trim().is_empty() {
                bail!("Character '{}' has no controller", entry.name);
            }
            if !entry.stats.is_valid() {
                bail!(
                    "Character '{}' has percent stats above {}: crit_chance={}, evasion={}",
                    entry.name,
                    CharacterStats::MAX_PERCENT,
                    entry.stats.crit_chance,
                    entry.stats.evasion
                );
            }
        }

        Ok(Roster { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::Element;
    use std::io::Write;

    const TWO_FIGHTERS: &str = r#"[
        (id: 1, name: "Alpha", controller: "alice",
         stats: (attack: 20, defense: 10, speed: 10, crit_chance: 0, evasion: 0)),
        (id: 2, name: "Beta", controller: "bob",
         stats: (attack: 20, defense: 15, speed: 5, crit_chance: 50, evasion: 5, element: Water)),
    ]"#;

    #[test]
    fn parses_entries_with_default_element() {
        let roster = RosterLoader::parse(TWO_FIGHTERS).unwrap();

        assert_eq!(roster.len(), 2);
        let alpha = roster.get(CharacterId(1)).unwrap();
        assert_eq!(alpha.stats.element, Element::Neutral);
        assert_eq!(alpha.controller(), Identity::from("alice"));
        assert_eq!(
            roster.find_by_name("BETA").unwrap().stats.element,
            Element::Water
        );
    }

    #[test]
    fn registry_entries_cover_every_character() {
        let roster = RosterLoader::parse(TWO_FIGHTERS).unwrap();
        let ids: Vec<_> = roster.registry_entries().map(|(id, _, _)| id).collect();
        assert_eq!(ids, vec![CharacterId(1), CharacterId(2)]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let content = r#"[
            (id: 1, name: "A", controller: "x",
             stats: (attack: 1, defense: 1, speed: 1, crit_chance: 0, evasion: 0)),
            (id: 1, name: "B", controller: "y",
             stats: (attack: 1, defense: 1, speed: 1, crit_chance: 0, evasion: 0)),
        ]"#;
        let error = RosterLoader::parse(content).unwrap_err();
        assert!(error.to_string().contains("Duplicate character id 1"));
    }

    #[test]
    fn rejects_percent_stats_above_hundred() {
        let content = r#"[
            (id: 1, name: "Lucky", controller: "x",
             stats: (attack: 1, defense: 1, speed: 1, crit_chance: 150, evasion: 0)),
        ]"#;
        assert!(RosterLoader::parse(content).is_err());
    }

    #[test]
    fn bundled_roster_is_valid() {
        let roster = RosterLoader::bundled().unwrap();
        assert!(roster.len() >= 2);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_FIGHTERS.as_bytes()).unwrap();

        let roster = RosterLoader::load(file.path()).unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = RosterLoader::load(Path::new("/nonexistent/roster.ron")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/roster.ron"));
    }
}
