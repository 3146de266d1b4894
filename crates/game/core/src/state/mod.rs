//! Battle state records.
//!
//! [`BattleSession`] is the only mutable record in the system. Identifiers in
//! [`common`] are opaque handles resolved by external collaborators.
mod common;
mod session;

pub use common::{CharacterId, Identity, SessionId, Timestamp};
pub use session::{BattleSession, EndReason, Side};
