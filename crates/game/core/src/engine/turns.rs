use crate::action::TurnAction;
use crate::combat::{
    AttackRolls, AttackStyle, TurnOutcome, apply_damage, apply_shield, heal, resolve_attack,
};
use crate::config::BattleConfig;
use crate::env::BattleEnv;
use crate::event::{BattleEnded, TurnResult};
use crate::state::{BattleSession, EndReason, Identity, Side, Timestamp};

use super::{BattleEngine, BattleError, TurnReport};

/// Turn execution for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Execute one turn for the current turn owner.
    ///
    /// Preconditions are checked in order: session active, deadline not
    /// passed, caller controls the acting character. The first failure
    /// rejects the call with the session unchanged.
    pub fn perform_turn(
        &mut self,
        env: &BattleEnv<'_>,
        caller: &Identity,
        action: TurnAction,
        now: Timestamp,
    ) -> Result<TurnReport, BattleError> {
        self.ensure_active()?;

        if self.session.is_timed_out(now) {
            return Err(BattleError::TurnTimedOut {
                session: self.session.id(),
                deadline: self.session.deadline(),
                now,
            });
        }

        let actor = self.session.turn_owner();
        let controller = self.authorize(env, caller, actor)?;

        let mut next = self.session.clone();
        let report = match action.attack_style() {
            None => defend(&mut next, actor),
            Some(style) => attack(&mut next, env, actor, style, controller)?,
        };

        next.turn += 1;
        next.last_action_time = now;
        if next.active {
            next.turn_owner = actor.opponent();
        }

        *self.session = next;
        Ok(report)
    }
}

fn defend(session: &mut BattleSession, actor: Side) -> TurnReport {
    let health = heal(session.health(actor), BattleConfig::HEAL_AMOUNT);
    *session.health_mut(actor) = health;
    *session.defending_mut(actor) = true;

    TurnReport {
        result: TurnResult {
            session: session.id(),
            acting_character: session.fighter(actor),
            action: TurnAction::Defend,
            outcome: TurnOutcome::Guarded,
            damage_dealt: 0,
            resulting_health: health,
        },
        ended: None,
    }
}

fn attack(
    session: &mut BattleSession,
    env: &BattleEnv<'_>,
    actor: Side,
    style: AttackStyle,
    controller: Identity,
) -> Result<TurnReport, BattleError> {
    let target = actor.opponent();
    let attacker_stats = env.registry().stats_of(session.fighter(actor))?;
    let defender_stats = env.registry().stats_of(session.fighter(target))?;

    let rolls = AttackRolls::draw(env.entropy(), env.seed(), session.id(), session.turn());
    let resolution = resolve_attack(style, &attacker_stats, &defender_stats, rolls);

    // The shield is spent by any resolved attack, even one dealing no damage
    let mut damage = resolution.damage;
    let shield = session.defending_mut(target);
    if *shield {
        damage = apply_shield(damage);
        *shield = false;
    }

    let (health, applied) = apply_damage(session.health(target), damage);
    *session.health_mut(target) = health;

    let action = match style {
        AttackStyle::Standard => TurnAction::Standard,
        AttackStyle::Heavy => TurnAction::Heavy,
    };
    let result = TurnResult {
        session: session.id(),
        acting_character: session.fighter(actor),
        action,
        outcome: resolution.outcome,
        damage_dealt: applied,
        resulting_health: health,
    };

    let ended = (health == 0).then(|| {
        session.active = false;
        session.winner = Some(actor);
        session.end_reason = Some(EndReason::Knockout);
        BattleEnded {
            session: session.id(),
            winner_identity: Some(controller),
            winner_character: session.fighter(actor),
            loser_character: session.fighter(target),
            reason: EndReason::Knockout,
        }
    });

    Ok(TurnReport { result, ended })
}
