//! Entropy abstraction for combat rolls.
//!
//! The engine never chooses its own randomness source. Every roll asks the
//! injected [`EntropySource`] for a bounded value, passing a seed derived from
//! the session, the turn counter and the roll's purpose. Deterministic sources
//! use the seed; cryptographic sources may ignore it.

use crate::state::SessionId;

/// Entropy source for bounded combat rolls.
pub trait EntropySource: Send + Sync {
    /// Produce a 32-bit value for the given seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a value in `[0, sides)`. Returns 0 when `sides` is 0.
    fn roll(&self, seed: u64, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        self.next_u32(seed) % sides
    }
}

/// Purpose of a roll within one attack; keeps the draws independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    /// Base damage variance.
    Base = 0,
    /// Critical hit (Standard) or miss check (Heavy).
    Modifier = 1,
    /// Defender evasion check.
    Evasion = 2,
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Stateless PCG-XSH-RR step: the same seed always produces the same output,
/// which makes whole battles replayable from their base seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl EntropySource for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Compute the seed for one roll.
///
/// * `base_seed` - configured seed for the whole arena
/// * `session` - session the roll belongs to
/// * `turn` - accepted-turn counter of that session
/// * `context` - which roll of the attack is being drawn
pub fn compute_seed(base_seed: u64, session: SessionId, turn: u64, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style mixing constants
    let mut hash = base_seed;
    hash ^= session.0.wrapping_mul(0x517cc1b727220a95);
    hash ^= turn.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
