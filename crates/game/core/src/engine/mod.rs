//! Battle state machine.
//!
//! [`BattleEngine`] is the only code that mutates a [`BattleSession`]. Each
//! operation validates every precondition first, then computes the next state
//! on a copy and commits it in one assignment, so a rejected call never leaves
//! a partially updated session behind.

mod errors;
mod timeout;
mod turns;

#[cfg(test)]
mod test_support;

pub use errors::BattleError;

use crate::env::{BattleEnv, RegistryError};
use crate::event::{BattleEnded, BattleEvent, TurnResult};
use crate::state::{BattleSession, CharacterId, Identity, SessionId, Side, Timestamp};

/// Validated participants of a battle that has not been stored yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleSetup {
    pub fighter_a: CharacterId,
    pub fighter_b: CharacterId,
    pub first: Side,
}

impl BattleSetup {
    /// Materialize the session under its freshly allocated id.
    pub fn into_session(self, id: SessionId, now: Timestamp) -> BattleSession {
        BattleSession::new(id, self.fighter_a, self.fighter_b, self.first, now)
    }
}

/// Records produced by one accepted turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub result: TurnResult,
    /// Present when this turn ended the battle.
    pub ended: Option<BattleEnded>,
}

impl TurnReport {
    pub fn is_terminal(&self) -> bool {
        self.ended.is_some()
    }

    /// Events in emission order.
    pub fn events(&self) -> Vec<BattleEvent> {
        let mut events = vec![BattleEvent::TurnResult(self.result.clone())];
        if let Some(ended) = &self.ended {
            events.push(BattleEvent::BattleEnded(ended.clone()));
        }
        events
    }
}

/// Drives one session through its lifecycle.
pub struct BattleEngine<'a> {
    session: &'a mut BattleSession,
}

impl<'a> BattleEngine<'a> {
    pub fn new(session: &'a mut BattleSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &BattleSession {
        self.session
    }

    /// Validate two fighters and decide who opens.
    ///
    /// The faster fighter acts first; ties go to `fighter_a`.
    pub fn setup(
        env: &BattleEnv<'_>,
        fighter_a: CharacterId,
        fighter_b: CharacterId,
    ) -> Result<BattleSetup, BattleError> {
        if fighter_a == fighter_b {
            return Err(BattleError::invalid_participants(
                fighter_a,
                fighter_b,
                "a character cannot fight itself",
            ));
        }

        let speed_of = |character: CharacterId| match env.registry().stats_of(character) {
            Ok(stats) => Ok(stats.speed),
            Err(RegistryError::UnknownCharacter(_)) => Err(BattleError::invalid_participants(
                fighter_a,
                fighter_b,
                "character is not registered",
            )),
            Err(error) => Err(BattleError::Registry(error)),
        };

        let speed_a = speed_of(fighter_a)?;
        let speed_b = speed_of(fighter_b)?;
        let first = if speed_a >= speed_b { Side::A } else { Side::B };

        Ok(BattleSetup {
            fighter_a,
            fighter_b,
            first,
        })
    }

    fn ensure_active(&self) -> Result<(), BattleError> {
        if self.session.is_active() {
            Ok(())
        } else {
            Err(BattleError::SessionInactive(self.session.id()))
        }
    }

    /// Resolve the identity allowed to act for `side`, queried fresh.
    ///
    /// Returns the registry controller on success. When delegations are
    /// present in the env, the registered delegate is accepted too.
    fn authorize(
        &self,
        env: &BattleEnv<'_>,
        caller: &Identity,
        side: Side,
    ) -> Result<Identity, BattleError> {
        let character = self.session.fighter(side);
        let controller = env.registry().controller_of(character)?;
        if &controller == caller {
            return Ok(controller);
        }

        if let Some(delegations) = env.delegations()
            && delegations.delegate_of(character).as_ref() == Some(caller)
        {
            return Ok(controller);
        }

        Err(BattleError::NotAuthorized {
            session: self.session.id(),
            caller: caller.clone(),
            character,
        })
    }
}
