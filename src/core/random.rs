use crate::domain::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Mutex;

/// Thread-local generator from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32 {
        rand::random_range(range)
    }
}

/// Reproducible sequence for a given seed.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(42);
        let b = SeededRandom::new(42);

        let first: Vec<u32> = (0..10).map(|_| a.next_in_range(1..=100)).collect();
        let second: Vec<u32> = (0..10).map(|_| b.next_in_range(1..=100)).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|v| (1..=100).contains(v)));
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        for _ in 0..100 {
            let value = ThreadRandom.next_in_range(5..=15);
            assert!((5..=15).contains(&value));
        }
    }
}
