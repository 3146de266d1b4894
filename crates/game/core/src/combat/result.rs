//! Attack rolls and resolution.

use crate::action::TurnAction;
use crate::config::BattleConfig;
use crate::env::{CharacterStats, EntropySource, RollContext, compute_seed};
use crate::state::SessionId;

use super::damage::base_damage;

/// Which branch of the turn resolution fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnOutcome {
    /// Attack landed without a modifier (Standard) or landed at all (Heavy).
    Hit,
    /// Standard attack rolled under the attacker's crit chance.
    Critical,
    /// Heavy attack rolled into the miss window.
    Miss,
    /// Defender evaded; overrides every other outcome.
    Evaded,
    /// Defend action: heal and raise the shield.
    Guarded,
}

/// Attack flavour, derived from the submitted [`TurnAction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackStyle {
    Standard,
    Heavy,
}

impl TurnAction {
    /// Attack style of this action, or `None` for Defend.
    pub const fn attack_style(self) -> Option<AttackStyle> {
        match self {
            TurnAction::Standard => Some(AttackStyle::Standard),
            TurnAction::Heavy => Some(AttackStyle::Heavy),
            TurnAction::Defend => None,
        }
    }
}

/// The three independent draws an attack consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackRolls {
    /// Base damage variance in `[0, 10)`.
    pub base: u32,
    /// Crit roll (Standard) or miss roll (Heavy) in `[0, 100)`.
    pub modifier: u32,
    /// Evasion roll in `[0, 100)`.
    pub evasion: u32,
}

impl AttackRolls {
    /// Draw the rolls for one attack, in base / modifier / evasion order.
    pub fn draw(entropy: &dyn EntropySource, base_seed: u64, session: SessionId, turn: u64) -> Self {
        let seed = |context| compute_seed(base_seed, session, turn, context);
        let base = entropy.roll(seed(RollContext::Base), BattleConfig::BASE_ROLL_SIDES);
        let modifier = entropy.roll(seed(RollContext::Modifier), BattleConfig::PERCENT_ROLL_SIDES);
        let evasion = entropy.roll(seed(RollContext::Evasion), BattleConfig::PERCENT_ROLL_SIDES);
        Self {
            base,
            modifier,
            evasion,
        }
    }
}

/// Damage of an attack before the defender's shield and health clamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackResolution {
    pub outcome: TurnOutcome,
    pub base_damage: u32,
    pub damage: u32,
}

/// Resolve an attack from already-drawn rolls.
///
/// ```text
/// base = max(1, attack + r0 - defense)
/// Standard: r1 < crit_chance  -> 2 * base (critical), else base
/// Heavy:    r2 < 20           -> 0 (miss),            else 2 * base
/// r3 < evasion                -> 0 (evaded), overrides the above
/// ```
pub fn resolve_attack(
    style: AttackStyle,
    attacker: &CharacterStats,
    defender: &CharacterStats,
    rolls: AttackRolls,
) -> AttackResolution {
    let base = base_damage(attacker.attack, rolls.base, defender.defense);
    let boosted = base.saturating_mul(BattleConfig::DAMAGE_MULTIPLIER);

    let (outcome, damage) = match style {
        AttackStyle::Standard if rolls.modifier < u32::from(attacker.crit_chance) => {
            (TurnOutcome::Critical, boosted)
        }
        AttackStyle::Standard => (TurnOutcome::Hit, base),
        AttackStyle::Heavy if rolls.modifier < BattleConfig::HEAVY_MISS_CHANCE => {
            (TurnOutcome::Miss, 0)
        }
        AttackStyle::Heavy => (TurnOutcome::Hit, boosted),
    };

    if rolls.evasion < u32::from(defender.evasion) {
        return AttackResolution {
            outcome: TurnOutcome::Evaded,
            base_damage: base,
            damage: 0,
        };
    }

    AttackResolution {
        outcome,
        base_damage: base,
        damage,
    }
}
