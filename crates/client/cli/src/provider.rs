//! Action selection for automated fighters.

use async_trait::async_trait;
use battle_core::{BattleConfig, BattleSession, Side, TurnAction};

/// Chooses the action for the side whose turn it is.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn choose(&self, session: &BattleSession, side: Side) -> anyhow::Result<TurnAction>;
}

/// Built-in fighting styles.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Strategy {
    /// Always a Standard attack.
    Aggressive,
    /// Always a Heavy attack.
    Reckless,
    /// Defends when low on health and unshielded, otherwise attacks.
    Cautious,
    /// Heavy while the opponent is healthy, Standard to finish.
    Balanced,
}

impl Strategy {
    const LOW_HEALTH: u32 = BattleConfig::INITIAL_HEALTH * 3 / 10;
    const FINISHING_HEALTH: u32 = BattleConfig::INITIAL_HEALTH / 4;

    fn pick(self, session: &BattleSession, side: Side) -> TurnAction {
        match self {
            Strategy::Aggressive => TurnAction::Standard,
            Strategy::Reckless => TurnAction::Heavy,
            Strategy::Cautious
                if session.health(side) <= Self::LOW_HEALTH && !session.is_defending(side) =>
            {
                TurnAction::Defend
            }
            Strategy::Cautious => TurnAction::Standard,
            Strategy::Balanced if session.health(side.opponent()) > Self::FINISHING_HEALTH => {
                TurnAction::Heavy
            }
            Strategy::Balanced => TurnAction::Standard,
        }
    }
}

#[async_trait]
impl ActionProvider for Strategy {
    async fn choose(&self, session: &BattleSession, side: Side) -> anyhow::Result<TurnAction> {
        Ok(self.pick(session, side))
    }
}
