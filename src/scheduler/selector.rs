//! Day selection for the allocator.
//!
//! Day choice is the only source of nondeterminism in a run, so it sits
//! behind a trait. Production runs wrap a seeded RNG; tests can script the
//! exact sequence of days.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks the day index for each allocation attempt.
pub trait DaySelector {
    /// Returns an index in `0..day_count`. `day_count` is never zero.
    fn select(&mut self, day_count: usize) -> usize;
}

/// Uniform random day selection.
#[derive(Debug, Clone)]
pub struct RandomDays<R> {
    rng: R,
}

impl<R: Rng> RandomDays<R> {
    /// Wraps an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDays<StdRng> {
    /// Reproducible selector: same seed, same day sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Selector seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> DaySelector for RandomDays<R> {
    fn select(&mut self, day_count: usize) -> usize {
        self.rng.random_range(0..day_count)
    }
}

/// Replays a fixed sequence of day indices, cycling when exhausted.
///
/// Indices are taken modulo the day count.
#[derive(Debug, Clone)]
pub struct ScriptedDays {
    sequence: Vec<usize>,
    position: usize,
}

impl ScriptedDays {
    /// Creates a scripted selector. An empty sequence always yields 0.
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            position: 0,
        }
    }

    /// Always selects the same day index.
    pub fn constant(index: usize) -> Self {
        Self::new(vec![index])
    }

    /// Number of selections made so far.
    pub fn calls(&self) -> usize {
        self.position
    }
}

impl DaySelector for ScriptedDays {
    fn select(&mut self, day_count: usize) -> usize {
        let value = if self.sequence.is_empty() {
            0
        } else {
            self.sequence[self.position % self.sequence.len()]
        };
        self.position += 1;
        value % day_count
    }
}
