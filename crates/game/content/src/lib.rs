//! Data-driven character rosters.
//!
//! A roster lists the characters available to an arena together with their
//! stats and initial controllers. Rosters are plain RON files; a small
//! default roster ships with the crate for local duels.
//!
//! Content is consumed by character registries and never appears in
//! battle state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{LoadResult, Roster, RosterEntry, RosterLoader};

/// Roster bundled with the crate.
pub const DEFAULT_ROSTER: &str = include_str!("../data/roster.ron");
