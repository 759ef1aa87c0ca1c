//! Deterministic random number generation for dealing boards.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal, so rounds replay
//! - **Unbiased shuffle**: Fisher–Yates backward swap, every ordering equally likely
//! - **Replayable**: entropy-seeded RNGs still record their seed
//!
//! ```
//! use cyber_memory::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded RNG used for board shuffles.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// The chosen seed is still recorded, so the round can be replayed
    /// from [`GameRng::seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a uniform index in `0..=upper`.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..=upper)
    }

    /// Shuffle a slice in place.
    ///
    /// Walks `i` from the last index down to 1, draws `j` uniformly from
    /// `0..=i` and swaps positions `i` and `j`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_index(i);
            slice.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_index(999), rng2.gen_index(999));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_index(999)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_index(999)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_gen_index_inclusive_bounds() {
        let mut rng = GameRng::new(42);
        let mut seen = [false; 3];

        for _ in 0..200 {
            let idx = rng.gen_index(2);
            assert!(idx <= 2);
            seen[idx] = true;
        }

        assert!(seen.iter().all(|&s| s), "all of 0..=2 should be drawn");
        assert_eq!(rng.gen_index(0), 0);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = GameRng::new(42);

        let mut empty: Vec<u8> = vec![];
        rng.shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![9];
        rng.shuffle(&mut single);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_shuffle_reaches_every_ordering_of_three() {
        let mut rng = GameRng::new(7);
        let mut orderings = std::collections::HashSet::new();

        for _ in 0..500 {
            let mut data = [0, 1, 2];
            rng.shuffle(&mut data);
            orderings.insert(data);
        }

        assert_eq!(orderings.len(), 6);
    }

    #[test]
    fn test_from_entropy_records_seed() {
        let mut rng = GameRng::from_entropy();
        let mut replay = GameRng::new(rng.seed());

        let drawn: Vec<_> = (0..10).map(|_| rng.gen_index(999)).collect();
        let replayed: Vec<_> = (0..10).map(|_| replay.gen_index(999)).collect();
        assert_eq!(drawn, replayed);
    }
}
