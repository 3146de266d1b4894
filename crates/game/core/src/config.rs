/// Fixed rule constants for every battle.
///
/// These values are policy, not tuning knobs: changing them changes the game
/// for every session, so they are exposed as associated constants only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleConfig;

impl BattleConfig {
    /// Health both fighters start with; also the healing cap.
    pub const INITIAL_HEALTH: u32 = 100;
    /// Time-units the turn owner has to act after the last accepted action.
    pub const TURN_TIMEOUT: u64 = 300;
    /// Health restored by a Defend action.
    pub const HEAL_AMOUNT: u32 = 10;
    /// Share of incoming damage removed by an active shield.
    pub const DEFENSE_REDUCTION_PERCENT: u32 = 50;
    /// Percentage chance that a Heavy attack misses outright.
    pub const HEAVY_MISS_CHANCE: u32 = 20;
    /// Base damage variance roll is drawn from `[0, BASE_ROLL_SIDES)`.
    pub const BASE_ROLL_SIDES: u32 = 10;
    /// Critical, heavy-miss and evasion rolls are drawn from `[0, PERCENT_ROLL_SIDES)`.
    pub const PERCENT_ROLL_SIDES: u32 = 100;
    /// Multiplier applied by critical hits and landed Heavy attacks.
    pub const DAMAGE_MULTIPLIER: u32 = 2;
    /// Floor for base damage before modifiers.
    pub const MINIMUM_BASE_DAMAGE: u32 = 1;
}
