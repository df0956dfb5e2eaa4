//! The randomness seam.
//!
//! Question generation draws exactly two values per question: a coin flip for
//! the direction and an index into the chosen pool. Anything implementing
//! [`rand::Rng`] is a [`RandomSource`]; [`ScriptedSource`] replays a fixed
//! sequence so tests can pin the questions they get.

use std::collections::VecDeque;

use rand::Rng;

/// Source of the random draws used to pick questions.
pub trait RandomSource {
    /// An unbiased coin flip.
    fn coin(&mut self) -> bool;

    /// A uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn coin(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays fixed coin flips and picks, cycling when a script runs out.
///
/// An empty coin script always answers `false`; an empty pick script always
/// answers `0`. Picks are reduced modulo the pool length.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    coins: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new(
        coins: impl IntoIterator<Item = bool>,
        picks: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            coins: coins.into_iter().collect(),
            picks: picks.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedSource {
    fn coin(&mut self) -> bool {
        match self.coins.pop_front() {
            Some(value) => {
                self.coins.push_back(value);
                value
            }
            None => false,
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        match self.picks.pop_front() {
            Some(value) => {
                self.picks.push_back(value);
                value % len
            }
            None => 0,
        }
    }
}
