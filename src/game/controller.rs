//! Decision interface and read-only game view
//!
//! The engine asks for every decision through [`DecisionMaker::make_choice`]:
//! a prompt plus option labels, answered with an index. While a decision is
//! pending the decider only sees a [`GameStateView`], so nothing can change
//! underneath the engine.

use crate::core::{CardId, Foe, FoeId, Hero, HeroId};
use crate::game::{GameOutcome, GameSnapshot, GameState, TurnPhase};

/// Read-only view of game state for deciders and presentation layers
pub struct GameStateView<'a> {
    game: &'a GameState,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState) -> Self {
        GameStateView { game }
    }

    pub fn heroes(&self) -> &'a [Hero] {
        self.game.heroes()
    }

    pub fn hero(&self, id: HeroId) -> Option<&'a Hero> {
        self.game.hero(id).ok()
    }

    pub fn active_hero(&self) -> HeroId {
        self.game.active_hero()
    }

    pub fn phase(&self) -> TurnPhase {
        self.game.turn().phase
    }

    pub fn turn_number(&self) -> u32 {
        self.game.turn().turn_number
    }

    /// Cards in a hero's hand
    pub fn hand(&self, hero: HeroId) -> &'a [CardId] {
        self.game
            .hero(hero)
            .map(|h| h.zones.hand.cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn card_name(&self, card: CardId) -> Option<&'a str> {
        self.game.card(card).ok().map(|c| c.name.as_str())
    }

    pub fn card_cost(&self, card: CardId) -> Option<u32> {
        self.game.card(card).ok().map(|c| c.cost)
    }

    pub fn active_foes(&self) -> &'a [FoeId] {
        self.game.active_foes()
    }

    pub fn foe(&self, id: FoeId) -> Option<&'a Foe> {
        self.game.foe(id).ok()
    }

    pub fn market_row(&self) -> &'a [CardId] {
        &self.game.market().row.cards
    }

    pub fn control(&self) -> (u32, u32) {
        let location = self.game.location();
        (location.control(), location.max_control())
    }

    /// Most recent log lines, oldest first
    pub fn recent_log(&self, n: usize) -> Vec<String> {
        self.game.logger.recent(n)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }
}

/// Generic decision interface
///
/// Every game decision is reduced to "pick option 0 to N-1". The engine
/// validates the answer: an out-of-range index is asked again, never
/// clamped.
pub trait DecisionMaker {
    /// Pick an option for `hero`
    ///
    /// # Arguments
    /// * `view` - Frozen game state
    /// * `hero` - The hero the decision is for
    /// * `prompt` - Description of what decision is being made
    /// * `options` - Descriptions of each option (indexed 0 to N-1)
    fn make_choice(&mut self, view: &GameStateView, hero: HeroId, prompt: &str, options: &[&str]) -> usize;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _outcome: GameOutcome) {}
}
