//! Pluggable randomness.
//!
//! Handlers never touch a global generator. They go through [`RandomSource`],
//! so the binary installs [`ThreadRandom`] and tests install a
//! [`SeededRandom`] with a fixed seed and get reproducible pages.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform index source. The one primitive everything else is built on.
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..bound`. Callers guarantee `bound > 0`.
    fn pick(&self, bound: usize) -> usize;
}

/// Production source backed by the thread-local generator.
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Deterministic source for tests: same seed, same sequence.
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
    fn pick(&self, bound: usize) -> usize {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..bound)
    }
}

/// One uniformly chosen element, or `None` for an empty slice.
pub fn choose<'a, T>(random: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[random.pick(items.len())])
    }
}

/// `n` distinct uniformly chosen elements, clamped to the slice length.
pub fn sample<'a, T>(random: &dyn RandomSource, items: &'a [T], n: usize) -> Vec<&'a T> {
    let n = n.min(items.len());
    let mut pool: Vec<usize> = (0..items.len()).collect();
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let i = random.pick(pool.len());
        out.push(&items[pool.swap_remove(i)]);
    }
    out
}

/// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
pub fn roll(random: &dyn RandomSource, low: i64, high: i64) -> i64 {
    low + random.pick((high - low + 1) as usize) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        for bound in [1, 2, 10, 1000] {
            assert_eq!(a.pick(bound), b.pick(bound));
        }
    }

    #[test]
    fn choose_is_total_over_nonempty_slices() {
        let random = SeededRandom::new(1);
        let items = ["cool", "clever", "tenacious"];
        for _ in 0..50 {
            let picked = choose(&random, &items).expect("nonempty");
            assert!(items.contains(picked));
        }
        let empty: [&str; 0] = [];
        assert!(choose(&random, &empty).is_none());
    }

    #[test]
    fn sample_returns_distinct_elements() {
        let random = SeededRandom::new(3);
        let items = ["a", "b", "c", "d", "e"];
        for _ in 0..50 {
            let picked = sample(&random, &items, 3);
            assert_eq!(picked.len(), 3);
            let mut unique: Vec<_> = picked.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 3, "sample must not repeat");
        }
    }

    #[test]
    fn sample_clamps_to_available_items() {
        let random = SeededRandom::new(5);
        let items = ["a", "b"];
        assert_eq!(sample(&random, &items, 3).len(), 2);
    }

    #[test]
    fn roll_stays_in_the_inclusive_range() {
        let random = SeededRandom::new(11);
        for _ in 0..200 {
            let n = roll(&random, 1, 10);
            assert!((1..=10).contains(&n));
        }
        assert_eq!(roll(&random, 4, 4), 4);
    }
}
