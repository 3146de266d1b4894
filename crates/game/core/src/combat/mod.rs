//! Combat resolution system.
//!
//! Pure functions only: given stats and already-drawn rolls they compute the
//! damage of an attack. Session bookkeeping (shields, health, turn order) is
//! the engine's job.
//!
//! - `base_damage`: attack + variance - defense, floored at 1
//! - `resolve_attack`: critical / heavy-miss modifier, then evasion override
//! - `apply_shield`: one-shot defend reduction
//! - `apply_damage` / `heal`: health updates clamped to `[0, INITIAL_HEALTH]`

pub mod damage;
pub mod result;

pub use damage::{apply_damage, apply_shield, base_damage, heal};
pub use result::{AttackResolution, AttackRolls, AttackStyle, TurnOutcome, resolve_attack};
