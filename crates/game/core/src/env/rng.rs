//! RNG oracle for combat rolls, loot and enemy generation.
//!
//! Every random decision in the core goes through [`RngOracle`], so callers
//! choose between a seeded production generator ([`GameRng`]) and a scripted
//! one for tests ([`SequenceRng`]).
//!
//! # Determinism
//!
//! Given the same seed, [`GameRng`] produces the same sequence. Saving the
//! seed is enough to replay a session.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of randomness injected into the core.
pub trait RngOracle {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns true with probability `p`.
    ///
    /// Formula: `next_f64() < p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max - min + 1) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        min + offset.min(max - min)
    }

    /// Uniform index into a collection of `len` elements.
    fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.range(0, len as i64 - 1) as usize)
    }

    /// Index drawn proportionally to `weights`. Non-positive weights never win.
    fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.next_f64() * total;
        let mut last = None;
        for (index, weight) in weights.iter().enumerate() {
            if *weight <= 0.0 {
                continue;
            }
            if roll < *weight {
                return Some(index);
            }
            roll -= weight;
            last = Some(index);
        }
        last
    }
}

// ============================================================================
// ChaCha-backed generator
// ============================================================================

/// Seeded production RNG.
///
/// Only the seed is meaningful across saves; the stream restarts from it.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngOracle for GameRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

// ============================================================================
// Scripted generator
// ============================================================================

/// Replays a fixed list of rolls, then repeats `fallback` forever.
///
/// Scenario tests use it to force crits, dodges and drops.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl SequenceRng {
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.99,
        }
    }

    /// Every roll returns `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            rolls: VecDeque::new(),
            fallback: value,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RngOracle for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }
}
