//! Deterministic collaborators for integration tests and simulations.
//!
//! - [`ScriptedEntropy`] returns pre-chosen rolls in order
//! - [`ManualClock`] only advances when told to
//! - [`RecordingSink`] keeps every emitted event for inspection

use std::collections::VecDeque;
use std::sync::Mutex;

use battle_core::EntropySource;

pub use crate::clock::ManualClock;
pub use crate::events::RecordingSink;

/// Entropy that replays a script of roll results.
///
/// Each roll pops the next scripted value and reduces it modulo the die
/// size. When the script runs out, every roll yields the fallback instead.
pub struct ScriptedEntropy {
    script: Mutex<VecDeque<u32>>,
    fallback: u32,
}

impl ScriptedEntropy {
    pub fn new(script: impl IntoIterator<Item = u32>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback: 0,
        }
    }

    /// Value used once the script is exhausted.
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Append more rolls to the end of the script.
    pub fn push(&self, values: impl IntoIterator<Item = u32>) {
        if let Ok(mut script) = self.script.lock() {
            script.extend(values);
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|script| script.len()).unwrap_or(0)
    }

    fn pop(&self) -> u32 {
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(self.fallback)
    }
}

impl Default for ScriptedEntropy {
    fn default() -> Self {
        Self::new([])
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.pop()
    }
}
