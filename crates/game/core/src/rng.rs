//! Random roll sources for combat.
//!
//! Combat only ever asks for percentage rolls in `[0, 100)`. The rules never
//! reach for a global generator: every roll goes through an [`RngOracle`]
//! handed in by the caller, so a seeded [`PcgRng`] or a [`ScriptedRng`]
//! reproduces a battle exactly.

use std::collections::VecDeque;

use crate::config::GameConfig;

/// Source of random rolls.
pub trait RngOracle {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform integer in `[0, 100)`.
    ///
    /// Raw values at or above the largest multiple of 100 are redrawn so
    /// that every percentage is equally likely.
    fn roll_percent(&mut self) -> u32 {
        const ZONE: u32 = u32::MAX - u32::MAX % GameConfig::PERCENT_ROLL;
        loop {
            let value = self.next_u32();
            if value < ZONE {
                return value % GameConfig::PERCENT_ROLL;
            }
        }
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// - **Deterministic**: same seed, same sequence
/// - **Small state**: a single `u64`
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self {
            state: mix_seed(seed, 0),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output: xorshift the high bits, then rotate by the top five bits.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Derives an independent seed from a base seed and a stream index.
///
/// Used to give each battle (or each replay branch) its own sequence from a
/// single configured seed.
pub fn mix_seed(seed: u64, stream: u64) -> u64 {
    let mut hash = seed;
    hash ^= stream.wrapping_mul(0x9e3779b97f4a7c15);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Replays a fixed list of percentage rolls.
///
/// Once the script runs out every roll returns `fallback` (99 unless changed),
/// which fails every chance below 100%.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    rolls: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRng {
    pub const DEFAULT_FALLBACK: u32 = GameConfig::PERCENT_ROLL - 1;

    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: Self::DEFAULT_FALLBACK,
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of scripted rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
