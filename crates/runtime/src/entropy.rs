//! Operating-system backed entropy.

use battle_core::EntropySource;
use rand::RngCore;
use rand::rngs::OsRng;

/// Draws every roll from the operating system's CSPRNG.
///
/// Ignores the per-roll seed, so outcomes cannot be predicted from session
/// data. Use [`battle_core::PcgRng`] when replayable battles are wanted.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn next_u32(&self, _seed: u64) -> u32 {
        OsRng.next_u32()
    }
}
