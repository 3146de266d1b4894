//! Character registry contract.
//!
//! Minting characters and assigning stats happen elsewhere; the engine only
//! reads stats and the identity currently controlling a character, fresh on
//! every call.

use crate::state::{CharacterId, Identity};

use super::error::RegistryError;

/// Cosmetic affinity of a character. Has no effect on combat math.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    #[default]
    Neutral,
}

/// Combat stats of a character as reported by the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Critical hit chance in percent (0-100).
    pub crit_chance: u8,
    /// Chance to evade an incoming attack in percent (0-100).
    pub evasion: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
}

impl CharacterStats {
    /// Maximum value for percentage stats.
    pub const MAX_PERCENT: u8 = 100;

    /// Builds a stat block, clamping percentages into `[0, 100]`.
    pub fn new(attack: u32, defense: u32, speed: u32, crit_chance: u8, evasion: u8) -> Self {
        Self {
            attack,
            defense,
            speed,
            crit_chance: crit_chance.min(Self::MAX_PERCENT),
            evasion: evasion.min(Self::MAX_PERCENT),
            element: Element::Neutral,
        }
    }

    /// True when both percentage stats are within `[0, 100]`.
    pub fn is_valid(&self) -> bool {
        self.crit_chance <= Self::MAX_PERCENT && self.evasion <= Self::MAX_PERCENT
    }
}

/// Read-only source of character stats and current controllers.
pub trait CharacterRegistry: Send + Sync {
    /// Current combat stats of a character.
    fn stats_of(&self, character: CharacterId) -> Result<CharacterStats, RegistryError>;

    /// Identity currently controlling a character.
    ///
    /// Ownership can change between turns; callers must not cache the result.
    fn controller_of(&self, character: CharacterId) -> Result<Identity, RegistryError>;

    /// Returns true if the registry knows the character.
    fn contains(&self, character: CharacterId) -> bool {
        self.stats_of(character).is_ok()
    }
}

/// Optional lookup of identities acting on behalf of a character's controller.
pub trait DelegationOracle: Send + Sync {
    fn delegate_of(&self, character: CharacterId) -> Option<Identity>;
}
