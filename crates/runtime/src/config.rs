//! Arena configuration and its environment loader.
use std::env;

/// Tunables for an [`Arena`](crate::Arena).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Capacity of each event bus topic channel.
    pub event_buffer_size: usize,
    /// Accept registered delegates as acting identities.
    pub accept_delegates: bool,
    /// Replace OS entropy with a seeded PCG generator.
    pub entropy_seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            accept_delegates: false,
            entropy_seed: None,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `ARENA_ACCEPT_DELEGATES` - Let delegates act for controllers (default: false)
    /// - `ARENA_ENTROPY_SEED` - Seed for replayable rolls (default: OS entropy)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("ARENA_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(enable) = read_env::<bool>("ARENA_ACCEPT_DELEGATES") {
            config.accept_delegates = enable;
        }

        config.entropy_seed = read_env::<u64>("ARENA_ENTROPY_SEED");

        config
    }

    pub fn with_delegates(mut self, accept: bool) -> Self {
        self.accept_delegates = accept;
        self
    }

    pub fn with_entropy_seed(mut self, seed: u64) -> Self {
        self.entropy_seed = Some(seed);
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
