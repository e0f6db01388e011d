//! Random controller for testing and baseline gameplay
//!
//! Makes uniform random choices among the offered options.

use crate::core::HeroId;
use crate::game::controller::{DecisionMaker, GameStateView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A decider that makes random choices
#[derive(Debug, Clone)]
pub struct RandomController {
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a new random controller seeded from entropy
    pub fn new() -> Self {
        RandomController {
            rng: ChaCha12Rng::from_entropy(),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        RandomController {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionMaker for RandomController {
    fn make_choice(&mut self, _view: &GameStateView, _hero: HeroId, _prompt: &str, options: &[&str]) -> usize {
        if options.is_empty() {
            return 0;
        }
        self.rng.gen_range(0..options.len())
    }
}
