//! Zero controller for testing and automation
//!
//! This controller always chooses the first option. Action lists end with
//! "End turn", so a zero hero plays every card, spends every token and buys
//! what it can before passing.

use crate::core::HeroId;
use crate::game::controller::{DecisionMaker, GameStateView};

/// A decider that always chooses the first option (index 0)
///
/// This is useful for:
/// - Automated testing
/// - Running games without interaction
/// - Benchmarking the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroController;

impl ZeroController {
    pub fn new() -> Self {
        ZeroController
    }
}

impl DecisionMaker for ZeroController {
    fn make_choice(&mut self, _view: &GameStateView, _hero: HeroId, _prompt: &str, _options: &[&str]) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::test_support::bare_game;

    #[test]
    fn test_zero_controller_chooses_first() {
        let game = bare_game();
        let mut controller = ZeroController::new();
        let view = GameStateView::new(&game);
        let choice = controller.make_choice(&view, HeroId::new(0), "pick", &["a", "b", "c"]);
        assert_eq!(choice, 0);
    }
}
