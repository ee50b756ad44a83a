//! Injected sources of uniform draws in `[0, 1)`.
//!
//! The engine takes its critical-hit and status rolls from a [`RandomSource`]
//! so a battle can be replayed from a seed, or driven draw by draw in tests.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Seeded generator used for real matches.
#[derive(Clone, Debug)]
pub struct SeededRolls {
    rng: SmallRng,
}

impl SeededRolls {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRolls {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, then keeps returning `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedRolls {
    queued: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRolls {
    pub fn from_scripted(draws: Vec<f64>) -> Self {
        Self {
            queued: draws.into(),
            fallback: 0.99,
        }
    }

    /// A source whose every draw misses both the critical and the status threshold.
    pub fn always_fail() -> Self {
        Self::from_scripted(Vec::new())
    }

    /// Every draw is `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            queued: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queued.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn next_unit(&mut self) -> f64 {
        self.queued.pop_front().unwrap_or(self.fallback)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
