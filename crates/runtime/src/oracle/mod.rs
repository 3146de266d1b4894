//! In-memory registries backing the engine's read-only collaborators.
//!
//! Production deployments plug their own [`battle_core::CharacterRegistry`];
//! these implementations serve local runs, simulations and tests.

mod delegation;
mod registry;

pub use delegation::{DelegationError, DelegationRegistry};
pub use registry::InMemoryCharacterRegistry;
