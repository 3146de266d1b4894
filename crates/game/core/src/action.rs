//! Actions a fighter can choose on its turn.

/// Action submitted by the turn owner.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TurnAction {
    /// Regular attack that can critically hit.
    Standard,
    /// Double-damage attack with a flat miss chance.
    Heavy,
    /// Heal and raise a one-shot shield against the next incoming attack.
    Defend,
}

impl TurnAction {
    /// Returns true for actions that strike the opponent.
    pub const fn is_attack(self) -> bool {
        matches!(self, Self::Standard | Self::Heavy)
    }
}
