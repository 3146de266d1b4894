//! End-to-end battles through the arena with scripted rolls and a manual clock.

use std::sync::Arc;

use battle_core::{
    BattleError, BattleEvent, BattleSession, CharacterId, CharacterStats, EndReason, Identity,
    SessionId, Side, Timestamp, TurnAction, TurnOutcome,
};
use battle_runtime::testing::{ManualClock, RecordingSink, ScriptedEntropy};
use battle_runtime::{Arena, ArenaConfig, InMemoryCharacterRegistry, RuntimeError};

const KNIGHT: CharacterId = CharacterId(1);
const WARDEN: CharacterId = CharacterId(2);
const START: Timestamp = Timestamp(1_000);

struct Fixture {
    arena: Arena,
    registry: Arc<InMemoryCharacterRegistry>,
    entropy: Arc<ScriptedEntropy>,
    clock: Arc<ManualClock>,
    sink: Arc<RecordingSink>,
}

impl Fixture {
    /// Knight (atk 20, def 10, spd 10) held by alice against
    /// Warden (atk 20, def 15, spd 5) held by bob.
    fn new() -> Self {
        Self::with_config(ArenaConfig::default())
    }

    fn with_config(config: ArenaConfig) -> Self {
        Self::with_stats(
            config,
            CharacterStats::new(20, 10, 10, 0, 0),
            CharacterStats::new(20, 15, 5, 0, 0),
        )
    }

    fn with_stats(config: ArenaConfig, knight: CharacterStats, warden: CharacterStats) -> Self {
        let registry = Arc::new(InMemoryCharacterRegistry::from_entries([
            (KNIGHT, knight, alice()),
            (WARDEN, warden, bob()),
        ]));
        let entropy = Arc::new(ScriptedEntropy::default());
        let clock = Arc::new(ManualClock::new(START));
        let sink = Arc::new(RecordingSink::new());

        let arena = Arena::builder()
            .config(config)
            .registry(registry.clone())
            .entropy(entropy.clone())
            .clock(clock.clone())
            .sink(sink.clone())
            .build()
            .unwrap();

        Self {
            arena,
            registry,
            entropy,
            clock,
            sink,
        }
    }

    fn start(&self) -> SessionId {
        self.arena.start_battle(KNIGHT, WARDEN).unwrap()
    }

    fn snapshot(&self, session: SessionId) -> BattleSession {
        self.arena.session(session).unwrap()
    }
}

fn alice() -> Identity {
    Identity::from("alice")
}

fn bob() -> Identity {
    Identity::from("bob")
}

fn battle_error(error: RuntimeError) -> BattleError {
    match error {
        RuntimeError::Battle(error) => error,
        other => panic!("expected battle error, got {other:?}"),
    }
}

#[test]
fn faster_fighter_takes_first_turn() {
    let fx = Fixture::new();
    let session = fx.start();

    let snapshot = fx.snapshot(session);
    assert_eq!(snapshot.turn_owner(), Side::A);
    assert_eq!(snapshot.fighter(Side::A), KNIGHT);
    assert_eq!(snapshot.health(Side::A), 100);
    assert_eq!(snapshot.health(Side::B), 100);
    assert_eq!(snapshot.last_action_time(), START);

    let reversed = fx.arena.start_battle(WARDEN, KNIGHT).unwrap();
    assert_eq!(fx.snapshot(reversed).turn_owner(), Side::B);
}

#[test]
fn standard_attack_deals_base_damage() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.entropy.push([0, 99, 99]);

    let report = fx
        .arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();

    assert_eq!(report.result.outcome, TurnOutcome::Hit);
    assert_eq!(report.result.damage_dealt, 5);
    assert_eq!(report.result.resulting_health, 95);
    assert!(!report.is_terminal());

    let snapshot = fx.snapshot(session);
    assert_eq!(snapshot.health(Side::B), 95);
    assert_eq!(snapshot.turn_owner(), Side::B);
}

#[test]
fn shield_halves_next_attack_then_drops() {
    let fx = Fixture::new();
    let session = fx.start();

    fx.entropy.push([0, 99, 99]);
    fx.arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();

    let guard = fx
        .arena
        .perform_turn(session, &bob(), TurnAction::Defend)
        .unwrap();
    assert_eq!(guard.result.outcome, TurnOutcome::Guarded);
    assert_eq!(guard.result.resulting_health, 100);
    assert!(fx.snapshot(session).is_defending(Side::B));

    // Raw damage 20 + 5 - 15 = 10, halved by the shield.
    fx.entropy.push([5, 99, 99]);
    let report = fx
        .arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();

    assert_eq!(report.result.damage_dealt, 5);
    let snapshot = fx.snapshot(session);
    assert_eq!(snapshot.health(Side::B), 95);
    assert!(!snapshot.is_defending(Side::B));
}

#[test]
fn heavy_attack_can_miss() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.entropy.push([0, 15, 99]);

    let report = fx
        .arena
        .perform_turn(session, &alice(), TurnAction::Heavy)
        .unwrap();

    assert_eq!(report.result.outcome, TurnOutcome::Miss);
    assert_eq!(report.result.damage_dealt, 0);
    let snapshot = fx.snapshot(session);
    assert_eq!(snapshot.health(Side::B), 100);
    assert_eq!(snapshot.turn_owner(), Side::B);
    assert_eq!(snapshot.turn(), 1);
}

#[test]
fn waiting_side_claims_victory_after_timeout() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.clock.advance(301);

    let ended = fx
        .arena
        .claim_victory_after_timeout(session, &bob())
        .unwrap();

    assert_eq!(ended.reason, EndReason::Timeout);
    assert_eq!(ended.winner_identity, Some(bob()));
    assert_eq!(ended.winner_character, WARDEN);
    assert_eq!(ended.loser_character, KNIGHT);

    let snapshot = fx.snapshot(session);
    assert!(!snapshot.is_active());
    assert_eq!(snapshot.winner(), Some(Side::B));
    assert_eq!(snapshot.health(Side::A), 100);
    assert_eq!(snapshot.health(Side::B), 100);
    assert!(fx.arena.active_sessions().unwrap().is_empty());
}

#[test]
fn deadline_boundary_is_inclusive_for_turns() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.clock.advance(300);

    let error = fx
        .arena
        .claim_victory_after_timeout(session, &bob())
        .unwrap_err();
    assert!(matches!(
        battle_error(error),
        BattleError::TimeoutNotReached { .. }
    ));

    fx.entropy.push([0, 99, 99]);
    fx.arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();
    assert_eq!(fx.snapshot(session).last_action_time(), Timestamp(1_300));
}

#[test]
fn late_turn_is_rejected_without_change() {
    let fx = Fixture::new();
    let session = fx.start();
    let before = fx.snapshot(session);
    fx.clock.advance(301);

    let error = fx
        .arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap_err();

    assert_eq!(
        battle_error(error),
        BattleError::TurnTimedOut {
            session,
            deadline: Timestamp(1_300),
            now: Timestamp(1_301),
        }
    );
    assert_eq!(fx.snapshot(session), before);
}

#[test]
fn third_party_cannot_act() {
    let fx = Fixture::new();
    let session = fx.start();
    let before = fx.snapshot(session);
    fx.entropy.push([0, 99, 99]);

    let error = fx
        .arena
        .perform_turn(session, &Identity::from("mallory"), TurnAction::Standard)
        .unwrap_err();

    assert_eq!(
        battle_error(error),
        BattleError::NotAuthorized {
            session,
            caller: Identity::from("mallory"),
            character: KNIGHT,
        }
    );
    assert_eq!(fx.snapshot(session), before);
    assert_eq!(fx.entropy.remaining(), 3);
}

#[test]
fn waiting_side_cannot_act_out_of_turn() {
    let fx = Fixture::new();
    let session = fx.start();

    let error = fx
        .arena
        .perform_turn(session, &bob(), TurnAction::Heavy)
        .unwrap_err();
    assert!(matches!(
        battle_error(error),
        BattleError::NotAuthorized { character: KNIGHT, .. }
    ));
}

#[test]
fn knockout_ends_battle_and_freezes_session() {
    let fx = Fixture::with_stats(
        ArenaConfig::default(),
        CharacterStats::new(120, 10, 10, 0, 0),
        CharacterStats::new(20, 15, 5, 0, 0),
    );
    let session = fx.start();
    fx.entropy.push([0, 99, 99]);

    let report = fx
        .arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();

    assert_eq!(report.result.damage_dealt, 100);
    assert_eq!(report.result.resulting_health, 0);
    let ended = report.ended.clone().unwrap();
    assert_eq!(ended.reason, EndReason::Knockout);
    assert_eq!(ended.winner_identity, Some(alice()));

    let frozen = fx.snapshot(session);
    assert!(!frozen.is_active());
    assert_eq!(frozen.winner_character(), Some(KNIGHT));

    let error = fx
        .arena
        .perform_turn(session, &bob(), TurnAction::Standard)
        .unwrap_err();
    assert_eq!(battle_error(error), BattleError::SessionInactive(session));

    fx.clock.advance(1_000);
    let error = fx
        .arena
        .claim_victory_after_timeout(session, &bob())
        .unwrap_err();
    assert_eq!(battle_error(error), BattleError::SessionInactive(session));
    assert_eq!(fx.snapshot(session), frozen);
}

#[test]
fn events_follow_session_order() {
    let fx = Fixture::with_stats(
        ArenaConfig::default(),
        CharacterStats::new(120, 10, 10, 0, 0),
        CharacterStats::new(20, 15, 5, 0, 0),
    );
    let session = fx.start();
    fx.entropy.push([0, 99, 99]);
    fx.arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();

    let events = fx.sink.for_session(session);
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], BattleEvent::BattleStarted(_)));
    assert!(matches!(events[1], BattleEvent::TurnResult(_)));
    assert!(matches!(events[2], BattleEvent::BattleEnded(_)));
}

#[test]
fn rejected_calls_emit_nothing() {
    let fx = Fixture::new();
    let session = fx.start();

    let _ = fx
        .arena
        .perform_turn(session, &bob(), TurnAction::Standard);
    let _ = fx.arena.claim_victory_after_timeout(session, &bob());
    let _ = fx.arena.start_battle(KNIGHT, KNIGHT);

    assert_eq!(fx.sink.events().len(), 1);
}

#[test]
fn ownership_transfer_applies_on_next_turn() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.registry.transfer(KNIGHT, Identity::from("carol")).unwrap();

    let error = fx
        .arena
        .perform_turn(session, &alice(), TurnAction::Defend)
        .unwrap_err();
    assert!(matches!(
        battle_error(error),
        BattleError::NotAuthorized { .. }
    ));

    fx.arena
        .perform_turn(session, &Identity::from("carol"), TurnAction::Defend)
        .unwrap();
    assert_eq!(fx.snapshot(session).turn_owner(), Side::B);
}

#[test]
fn delegates_are_ignored_unless_enabled() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.arena
        .set_delegate(&alice(), KNIGHT, Identity::from("squire"))
        .unwrap();

    let error = fx
        .arena
        .perform_turn(session, &Identity::from("squire"), TurnAction::Defend)
        .unwrap_err();
    assert!(matches!(
        battle_error(error),
        BattleError::NotAuthorized { .. }
    ));
}

#[test]
fn enabled_delegates_act_for_controller() {
    let fx = Fixture::with_config(ArenaConfig::default().with_delegates(true));
    let session = fx.start();
    fx.arena
        .set_delegate(&alice(), KNIGHT, Identity::from("squire"))
        .unwrap();

    fx.arena
        .perform_turn(session, &Identity::from("squire"), TurnAction::Defend)
        .unwrap();
    assert!(fx.snapshot(session).is_defending(Side::A));

    // Only the controller may appoint.
    assert!(matches!(
        fx.arena
            .set_delegate(&Identity::from("squire"), KNIGHT, Identity::from("squire")),
        Err(RuntimeError::Delegation(_))
    ));

    fx.arena.revoke_delegate(&alice(), KNIGHT).unwrap();
    fx.entropy.push([0, 99, 99]);
    fx.arena
        .perform_turn(session, &bob(), TurnAction::Standard)
        .unwrap();
    let error = fx
        .arena
        .perform_turn(session, &Identity::from("squire"), TurnAction::Defend)
        .unwrap_err();
    assert!(matches!(
        battle_error(error),
        BattleError::NotAuthorized { .. }
    ));
}

#[test]
fn session_ids_are_unique_and_sessions_persist() {
    let fx = Fixture::new();
    let first = fx.start();
    let second = fx.start();
    assert_ne!(first, second);

    fx.clock.advance(301);
    fx.arena.claim_victory_after_timeout(first, &bob()).unwrap();

    assert_eq!(fx.arena.sessions().unwrap(), vec![first, second]);
    assert!(!fx.snapshot(first).is_active());
}

#[test]
fn health_stays_in_bounds_over_long_battle() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.entropy.push((0..400).map(|i| i * 7 + 3));

    let actions = [TurnAction::Standard, TurnAction::Heavy, TurnAction::Defend];
    let mut step = 0;
    while fx.snapshot(session).is_active() && step < 200 {
        let snapshot = fx.snapshot(session);
        let caller = match snapshot.turn_owner() {
            Side::A => alice(),
            Side::B => bob(),
        };
        fx.arena
            .perform_turn(session, &caller, actions[step % actions.len()])
            .unwrap();
        let after = fx.snapshot(session);
        assert!(after.health(Side::A) <= 100);
        assert!(after.health(Side::B) <= 100);
        step += 1;
    }
}

#[test]
fn timeout_claim_survives_winner_leaving_registry() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.registry.remove(WARDEN).unwrap();
    fx.clock.advance(301);

    let ended = fx
        .arena
        .claim_victory_after_timeout(session, &bob())
        .unwrap();

    assert_eq!(ended.reason, EndReason::Timeout);
    assert_eq!(ended.winner_character, WARDEN);
    assert_eq!(ended.winner_identity, None);

    let snapshot = fx.snapshot(session);
    assert!(!snapshot.is_active());
    assert_eq!(snapshot.winner(), Some(Side::B));
    assert!(matches!(
        fx.sink.for_session(session).last(),
        Some(BattleEvent::BattleEnded(recorded)) if recorded == &ended
    ));
}

#[test]
fn recorded_events_survive_json() {
    let fx = Fixture::new();
    let session = fx.start();
    fx.entropy.push([0, 99, 99]);
    fx.arena
        .perform_turn(session, &alice(), TurnAction::Standard)
        .unwrap();
    fx.clock.advance(301);
    fx.arena
        .claim_victory_after_timeout(session, &alice())
        .unwrap();

    let events = fx.sink.for_session(session);
    assert_eq!(events.len(), 3);

    let json = serde_json::to_string(&events).unwrap();
    let decoded: Vec<BattleEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, events);
}
