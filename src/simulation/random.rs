//! Injectable randomness
//!
//! Every random decision (lane choice, opponent speed targets, spawn jitter)
//! goes through `RandomSource`, so tests can replay exact sequences.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// Source of uniform values in [0, 1)
pub trait RandomSource: Send + Sync {
    fn next_unit(&mut self) -> f32;

    /// Uniform value in [low, high)
    fn range(&mut self, low: f32, high: f32) -> f32 {
        low + self.next_unit() * (high - low)
    }

    /// Uniform index in [0, len); `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        let picked = (self.next_unit() * len as f32) as usize;
        picked.min(len.saturating_sub(1))
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.next_unit() < probability
    }
}

/// Fisher-Yates shuffle driven by a `RandomSource`
pub fn shuffle<T>(rng: &mut dyn RandomSource, values: &mut [T]) {
    for i in (1..values.len()).rev() {
        let j = rng.index(i + 1);
        values.swap(i, j);
    }
}

/// Standard RNG, seeded for reproducible runs or from the OS
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.random_range(0.0..1.0)
    }
}

/// Replays a fixed cycle of values; used to make random branches predictable
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values are clamped into [0, 1); an empty script always yields 0
    pub fn new(values: Vec<f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A script that always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
