//! Scripted controller for testing
//!
//! This controller answers from a predetermined list of option indices,
//! useful for deterministic scenario tests.

use crate::core::HeroId;
use crate::game::controller::{DecisionMaker, GameStateView};

/// A decider that follows a predetermined sequence of choices
///
/// Once the script runs out every answer is out of range, so the engine
/// keeps asking until it gives up with `ChoiceExhausted`.
#[derive(Debug, Clone)]
pub struct ScriptedController {
    choices: Vec<usize>,
    current_step: usize,
}

impl ScriptedController {
    pub fn new(choices: Vec<usize>) -> Self {
        ScriptedController {
            choices,
            current_step: 0,
        }
    }

    /// Choices not yet given
    pub fn remaining(&self) -> usize {
        self.choices.len().saturating_sub(self.current_step)
    }
}

impl DecisionMaker for ScriptedController {
    fn make_choice(&mut self, _view: &GameStateView, _hero: HeroId, _prompt: &str, _options: &[&str]) -> usize {
        match self.choices.get(self.current_step) {
            Some(&choice) => {
                self.current_step += 1;
                choice
            }
            None => usize::MAX,
        }
    }
}
