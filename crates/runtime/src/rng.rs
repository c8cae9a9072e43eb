//! Entropy-backed roll source for unseeded play.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tactics_core::RngOracle;

/// [`RngOracle`] over `rand`'s standard generator.
#[derive(Clone, Debug)]
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngOracle for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn roll_percent(&mut self) -> u32 {
        self.inner.gen_range(0..100)
    }
}
