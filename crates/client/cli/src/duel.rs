//! Automated duel between two providers.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use battle_core::{BattleConfig, BattleEvent, CharacterId, EndReason, Identity, Side};
use battle_runtime::{Arena, EventSink, ManualClock};

use crate::provider::ActionProvider;

/// Prints each event as one JSON object per line on stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonLinesSink;

impl EventSink for JsonLinesSink {
    fn emit(&self, event: BattleEvent) {
        match serde_json::to_string(&event) {
            Ok(line) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(error) = writeln!(stdout, "{line}") {
                    tracing::warn!(%error, "failed to write event");
                }
            }
            Err(error) => tracing::warn!(%error, "failed to serialize event"),
        }
    }
}

/// Final state of a finished duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelSummary {
    pub winner: CharacterId,
    pub winner_identity: Identity,
    pub reason: EndReason,
    pub turns: u64,
}

/// Plays one battle to completion on a manually advanced clock.
pub struct Duel {
    arena: Arena,
    clock: Arc<ManualClock>,
    providers: [Box<dyn ActionProvider>; 2],
    max_turns: u64,
}

impl Duel {
    pub fn new(
        arena: Arena,
        clock: Arc<ManualClock>,
        provider_a: Box<dyn ActionProvider>,
        provider_b: Box<dyn ActionProvider>,
        max_turns: u64,
    ) -> Self {
        Self {
            arena,
            clock,
            providers: [provider_a, provider_b],
            max_turns,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Fight until knockout, or claim the timeout once `max_turns` are played.
    pub async fn run(&self, fighter_a: CharacterId, fighter_b: CharacterId) -> Result<DuelSummary> {
        let session = self
            .arena
            .start_battle(fighter_a, fighter_b)
            .context("failed to start battle")?;

        loop {
            let snapshot = self.arena.session(session)?;
            if !snapshot.is_active() {
                break;
            }

            let side = snapshot.turn_owner();
            if snapshot.turn() >= self.max_turns {
                self.clock.advance(BattleConfig::TURN_TIMEOUT + 1);
                let claimant = self.controller(snapshot.fighter(side.opponent()))?;
                self.arena.claim_victory_after_timeout(session, &claimant)?;
                break;
            }

            let caller = self.controller(snapshot.fighter(side))?;
            let action = self.provider(side).choose(&snapshot, side).await?;
            self.arena.perform_turn(session, &caller, action)?;
            self.clock.advance(1);
        }

        let finished = self.arena.session(session)?;
        let (Some(winner), Some(reason)) = (finished.winner_character(), finished.end_reason())
        else {
            anyhow::bail!("session {session} ended without a winner");
        };
        Ok(DuelSummary {
            winner,
            winner_identity: self.controller(winner)?,
            reason,
            turns: finished.turn(),
        })
    }

    fn provider(&self, side: Side) -> &dyn ActionProvider {
        match side {
            Side::A => self.providers[0].as_ref(),
            Side::B => self.providers[1].as_ref(),
        }
    }

    fn controller(&self, character: CharacterId) -> Result<Identity> {
        self.arena
            .registry()
            .controller_of(character)
            .with_context(|| format!("no controller for {character}"))
    }
}
