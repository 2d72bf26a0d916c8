//! Bag randomizer
//!
//! Every piece type goes into the bag once, the bag is shuffled, and pieces are
//! drawn until it is empty. Any run of N draws starting at a refill therefore
//! contains each of the N types exactly once.

use tracing::trace;

/// Shuffled-permutation piece supply
#[derive(Debug, Clone)]
pub struct Bag {
    piece_count: usize,
    /// Remaining types; drawn from the back
    bag: Vec<usize>,
    rng: fastrand::Rng,
}

impl Bag {
    /// Bag over `piece_count` types, seeded from system entropy
    pub fn new(piece_count: usize) -> Self {
        Self::from_rng(piece_count, fastrand::Rng::new())
    }

    /// Deterministic bag for replays and tests
    pub fn with_seed(piece_count: usize, seed: u64) -> Self {
        Self::from_rng(piece_count, fastrand::Rng::with_seed(seed))
    }

    fn from_rng(piece_count: usize, rng: fastrand::Rng) -> Self {
        let mut bag = Self {
            piece_count,
            bag: Vec::with_capacity(piece_count),
            rng,
        };
        bag.refresh();
        bag
    }

    /// Refill with every type and reshuffle, discarding what was left
    pub fn refresh(&mut self) {
        self.bag.clear();
        self.bag.extend(0..self.piece_count);
        self.rng.shuffle(&mut self.bag);
        trace!(bag = ?self.bag, "bag refilled");
    }

    /// Draw the next piece type
    pub fn draw(&mut self) -> usize {
        if self.bag.is_empty() {
            self.refresh();
        }
        // `refresh` always leaves `piece_count` entries and the catalog is never empty.
        self.bag.pop().unwrap_or(0)
    }

    pub fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Types still in the current cycle, in no particular order
    pub fn remaining(&self) -> &[usize] {
        &self.bag
    }
}
