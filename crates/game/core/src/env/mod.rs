//! Traits describing the read-only collaborators of the engine.
//!
//! The character registry, the optional delegation lookup and the entropy
//! source are external. [`BattleEnv`] bundles them so the engine can reach
//! everything it needs without coupling to concrete implementations.
mod error;
mod registry;
mod rng;

pub use error::RegistryError;
pub use registry::{CharacterRegistry, CharacterStats, DelegationOracle, Element};
pub use rng::{EntropySource, PcgRng, RollContext, compute_seed};

/// Aggregates the collaborators required by the engine for one call.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    registry: &'a dyn CharacterRegistry,
    entropy: &'a dyn EntropySource,
    delegations: Option<&'a dyn DelegationOracle>,
    seed: u64,
}

impl<'a> BattleEnv<'a> {
    pub fn new(registry: &'a dyn CharacterRegistry, entropy: &'a dyn EntropySource) -> Self {
        Self {
            registry,
            entropy,
            delegations: None,
            seed: 0,
        }
    }

    /// Accept registered delegates as additional controllers during authorization.
    pub fn with_delegations(mut self, delegations: &'a dyn DelegationOracle) -> Self {
        self.delegations = Some(delegations);
        self
    }

    /// Base seed mixed into every combat roll.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn registry(&self) -> &'a dyn CharacterRegistry {
        self.registry
    }

    pub fn entropy(&self) -> &'a dyn EntropySource {
        self.entropy
    }

    pub fn delegations(&self) -> Option<&'a dyn DelegationOracle> {
        self.delegations
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("delegations", &self.delegations.is_some())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
