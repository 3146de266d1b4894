//! Duel driver configuration and its environment loader.
use std::env;
use std::path::PathBuf;

use crate::provider::Strategy;

/// Settings for one automated duel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Roster file; the bundled roster is used when absent.
    pub roster: Option<PathBuf>,
    /// Fighter id or name; defaults to the first roster entry.
    pub fighter_a: Option<String>,
    /// Fighter id or name; defaults to the second roster entry.
    pub fighter_b: Option<String>,
    pub strategy_a: Strategy,
    pub strategy_b: Strategy,
    /// Turns played before the waiting side claims the timeout.
    pub max_turns: u64,
    /// Directory for an additional log file.
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            roster: None,
            fighter_a: None,
            fighter_b: None,
            strategy_a: Strategy::Aggressive,
            strategy_b: Strategy::Cautious,
            max_turns: 50,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_ROSTER` - Path to a RON roster (default: bundled roster)
    /// - `ARENA_FIGHTER_A` / `ARENA_FIGHTER_B` - Fighter id or name
    /// - `ARENA_STRATEGY_A` / `ARENA_STRATEGY_B` - aggressive, reckless, cautious or balanced
    /// - `ARENA_MAX_TURNS` - Turn limit before a timeout claim (default: 50)
    /// - `ARENA_LOG_DIR` - Also write logs to `<dir>/arena.log`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.roster = env::var("ARENA_ROSTER").ok().map(PathBuf::from);
        config.fighter_a = env::var("ARENA_FIGHTER_A").ok();
        config.fighter_b = env::var("ARENA_FIGHTER_B").ok();

        if let Some(strategy) = read_env::<Strategy>("ARENA_STRATEGY_A") {
            config.strategy_a = strategy;
        }
        if let Some(strategy) = read_env::<Strategy>("ARENA_STRATEGY_B") {
            config.strategy_b = strategy;
        }

        if let Some(turns) = read_env::<u64>("ARENA_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
