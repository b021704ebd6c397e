//! Random number sources for clip selection and ambient scheduling
//!
//! Both the clip selector and the ambient rule take their randomness through
//! `RandomSource` so tests can seed or script every draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform random draws
pub trait RandomSource: Send {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize;

    /// Uniform value in `low..=high`
    fn next_in_range(&mut self, low: i64, high: i64) -> i64;
}

/// Boxed random source that can be owned by rules and selectors
pub type BoxedRandom = Box<dyn RandomSource>;

/// `StdRng` backed random source
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source with a fixed seed (deterministic)
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Random source that replays a fixed sequence of draws
///
/// Indices and range values are queued separately. A queued value outside the
/// requested bounds is clamped into them; an exhausted queue yields the lower
/// bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    values: VecDeque<i64>,
}

impl ScriptedRandom {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue index draws
    pub fn with_indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.indices.extend(indices);
        self
    }

    /// Queue range draws
    pub fn with_values(mut self, values: impl IntoIterator<Item = i64>) -> Self {
        self.values.extend(values);
        self
    }

    /// Number of draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.indices.len() + self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, len: usize) -> usize {
        let index = self.indices.pop_front().unwrap_or(0);
        index.min(len.saturating_sub(1))
    }

    fn next_in_range(&mut self, low: i64, high: i64) -> i64 {
        let value = self.values.pop_front().unwrap_or(low);
        value.clamp(low, high.max(low))
    }
}
