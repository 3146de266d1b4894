use crate::env::BattleEnv;
use crate::event::BattleEnded;
use crate::state::{EndReason, Timestamp};

use super::{BattleEngine, BattleError};

/// Timeout forfeiture for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// End the battle in favour of the side that is not due to act.
    ///
    /// Anyone may trigger the claim; only the deadline matters. Health is
    /// never touched, and the registry is consulted on a best-effort basis
    /// only, so a stalled session can always be ended.
    pub fn claim_timeout(
        &mut self,
        env: &BattleEnv<'_>,
        now: Timestamp,
    ) -> Result<BattleEnded, BattleError> {
        self.ensure_active()?;

        if !self.session.is_timed_out(now) {
            return Err(BattleError::TimeoutNotReached {
                session: self.session.id(),
                deadline: self.session.deadline(),
                now,
            });
        }

        let staller = self.session.turn_owner();
        let winner = staller.opponent();
        let winner_character = self.session.fighter(winner);
        let winner_identity = env.registry().controller_of(winner_character).ok();

        self.session.active = false;
        self.session.winner = Some(winner);
        self.session.end_reason = Some(EndReason::Timeout);

        Ok(BattleEnded {
            session: self.session.id(),
            winner_identity,
            winner_character,
            loser_character: self.session.fighter(staller),
            reason: EndReason::Timeout,
        })
    }
}
