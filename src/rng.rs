//! Worker-local randomness (Design Notes §4.8: "never share an RNG
//! across workers"). Each MCTS worker owns one [`WorkerRng`], seeded
//! once by the driver before the thread is spawned.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// A fast, non-cryptographic RNG private to a single search worker.
/// Wraps `rand`'s `SmallRng` (Xoshiro256++ on 64-bit targets) so rollout
/// move selection and opening-book picks never contend on a shared
/// generator.
pub struct WorkerRng(SmallRng);

impl WorkerRng {
    /// Seeds a fresh generator. The driver derives `seed` deterministically
    /// from a session seed and the worker's index so a run is reproducible
    /// given the same session seed and worker count.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        WorkerRng(SmallRng::seed_from_u64(seed))
    }
}

impl RngCore for WorkerRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

/// Derives a worker's seed from a session seed and its index, so a whole
/// search run is reproducible from one `u64` plus the worker count.
#[must_use]
pub fn derive_seed(session_seed: u64, worker_index: usize) -> u64 {
    session_seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(worker_index as u64)
}
