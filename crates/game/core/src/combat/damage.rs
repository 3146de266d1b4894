//! Damage calculation and application.

use crate::config::BattleConfig;

/// Damage before action modifiers.
///
/// ```text
/// base = max(MINIMUM_BASE_DAMAGE, attack + roll - defense)
/// ```
pub fn base_damage(attack: u32, roll: u32, defense: u32) -> u32 {
    attack
        .saturating_add(roll)
        .saturating_sub(defense)
        .max(BattleConfig::MINIMUM_BASE_DAMAGE)
}

/// Reduce damage for a shielded defender, truncating toward zero.
pub fn apply_shield(damage: u32) -> u32 {
    let kept = u64::from(100 - BattleConfig::DEFENSE_REDUCTION_PERCENT);
    (u64::from(damage) * kept / 100) as u32
}

/// Apply damage to current health.
///
/// Returns `(new_health, applied_damage)`; applied damage never exceeds the
/// health that was left.
pub fn apply_damage(current: u32, damage: u32) -> (u32, u32) {
    let applied = damage.min(current);
    (current - applied, applied)
}

/// Restore health, capped at [`BattleConfig::INITIAL_HEALTH`].
pub fn heal(current: u32, amount: u32) -> u32 {
    current
        .saturating_add(amount)
        .min(BattleConfig::INITIAL_HEALTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_damage_subtracts_defense() {
        assert_eq!(base_damage(20, 0, 15), 5);
        assert_eq!(base_damage(20, 9, 15), 14);
    }

    #[test]
    fn base_damage_never_drops_below_one() {
        assert_eq!(base_damage(5, 0, 40), 1);
        assert_eq!(base_damage(0, 0, 0), 1);
    }

    #[test]
    fn shield_halves_with_truncation() {
        assert_eq!(apply_shield(10), 5);
        assert_eq!(apply_shield(7), 3);
        assert_eq!(apply_shield(1), 0);
        assert_eq!(apply_shield(0), 0);
    }

    #[test]
    fn damage_is_clamped_to_remaining_health() {
        assert_eq!(apply_damage(3, 40), (0, 3));
        assert_eq!(apply_damage(100, 5), (95, 5));
        assert_eq!(apply_damage(0, 5), (0, 0));
    }

    #[test]
    fn heal_caps_at_initial_health() {
        assert_eq!(heal(95, 10), 100);
        assert_eq!(heal(50, 10), 60);
        assert_eq!(heal(100, 10), 100);
    }
}
