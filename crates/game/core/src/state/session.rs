use crate::config::BattleConfig;

use super::common::{CharacterId, SessionId, Timestamp};

/// One of the two participants of a session.
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
pub enum Side {
    A,
    B,
}

impl Side {
    /// Returns the other participant.
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Why a session stopped accepting turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    /// An attack reduced the opponent's health to zero.
    Knockout,
    /// The turn owner stalled past the deadline and the other side claimed victory.
    Timeout,
}

/// Combat state of one battle.
///
/// Fields are only mutated by [`crate::engine::BattleEngine`]; everything else
/// observes the record through the accessors below. Once `active` is false the
/// record is a frozen historical entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    pub(crate) id: SessionId,
    pub(crate) fighter_a: CharacterId,
    pub(crate) fighter_b: CharacterId,
    pub(crate) health_a: u32,
    pub(crate) health_b: u32,
    pub(crate) turn_owner: Side,
    pub(crate) active: bool,
    pub(crate) last_action_time: Timestamp,
    pub(crate) defending_a: bool,
    pub(crate) defending_b: bool,
    /// Number of accepted turns; feeds the per-roll entropy seed.
    pub(crate) turn: u64,
    pub(crate) winner: Option<Side>,
    pub(crate) end_reason: Option<EndReason>,
}

impl BattleSession {
    /// Creates a fresh session with both fighters at full health.
    pub(crate) fn new(
        id: SessionId,
        fighter_a: CharacterId,
        fighter_b: CharacterId,
        first: Side,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            fighter_a,
            fighter_b,
            health_a: BattleConfig::INITIAL_HEALTH,
            health_b: BattleConfig::INITIAL_HEALTH,
            turn_owner: first,
            active: true,
            last_action_time: now,
            defending_a: false,
            defending_b: false,
            turn: 0,
            winner: None,
            end_reason: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn fighter(&self, side: Side) -> CharacterId {
        match side {
            Side::A => self.fighter_a,
            Side::B => self.fighter_b,
        }
    }

    pub fn health(&self, side: Side) -> u32 {
        match side {
            Side::A => self.health_a,
            Side::B => self.health_b,
        }
    }

    pub fn is_defending(&self, side: Side) -> bool {
        match side {
            Side::A => self.defending_a,
            Side::B => self.defending_b,
        }
    }

    /// Side permitted to act next.
    pub fn turn_owner(&self) -> Side {
        self.turn_owner
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn last_action_time(&self) -> Timestamp {
        self.last_action_time
    }

    /// Number of accepted turns so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Character of the winning side, once the session has ended.
    pub fn winner_character(&self) -> Option<CharacterId> {
        self.winner.map(|side| self.fighter(side))
    }

    /// Returns which side a character fights on, if it participates.
    pub fn side_of(&self, character: CharacterId) -> Option<Side> {
        if character == self.fighter_a {
            Some(Side::A)
        } else if character == self.fighter_b {
            Some(Side::B)
        } else {
            None
        }
    }

    /// Last moment at which the turn owner may still act.
    pub fn deadline(&self) -> Timestamp {
        self.last_action_time + BattleConfig::TURN_TIMEOUT
    }

    /// True once `now` is strictly past the deadline.
    pub fn is_timed_out(&self, now: Timestamp) -> bool {
        now > self.deadline()
    }

    pub(crate) fn health_mut(&mut self, side: Side) -> &mut u32 {
        match side {
            Side::A => &mut self.health_a,
            Side::B => &mut self.health_b,
        }
    }

    pub(crate) fn defending_mut(&mut self, side: Side) -> &mut bool {
        match side {
            Side::A => &mut self.defending_a,
            Side::B => &mut self.defending_b,
        }
    }
}
