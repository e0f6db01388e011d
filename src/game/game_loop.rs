//! Game loop implementation
//!
//! Drives the four phases of each hero's turn and checks for the end of the
//! game after every cleanup.

use crate::core::HeroId;
use crate::game::{GameState, HeroAction, TurnPhase};
use crate::Result;
use serde::{Deserialize, Serialize};

/// How a game finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every foe was defeated
    Won,
    /// The final stage of the location was lost
    Lost,
    /// Game reached maximum turn limit
    TurnLimit,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Won => f.write_str("won"),
            GameOutcome::Lost => f.write_str("lost"),
            GameOutcome::TurnLimit => f.write_str("turn limit"),
        }
    }
}

/// Result of running a game to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: GameOutcome,
    /// Total number of turns played
    pub turns_played: u32,
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Maximum turns before calling the game off
    max_turns: u32,
    /// Turn counter for the loop
    turns_elapsed: u32,
    /// Safety valve on actions within one turn
    max_actions_per_turn: u32,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state
    pub fn new(game: &'a mut GameState) -> Self {
        let max_turns = game.config().max_turns;
        GameLoop {
            game,
            max_turns,
            turns_elapsed: 0,
            max_actions_per_turn: 500,
        }
    }

    /// Set maximum turns before calling the game off
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn turns_elapsed(&self) -> u32 {
        self.turns_elapsed
    }

    /// Run turns until the game is won, lost or hits the turn limit
    pub fn run_game(&mut self) -> Result<GameResult> {
        loop {
            if let Some(result) = self.run_turn_once()? {
                self.game
                    .logger
                    .minimal(&format!("Game {} after {} turns", result.outcome, result.turns_played));
                self.game.notify_game_end(result.outcome);
                return Ok(result);
            }
        }
    }

    /// Run one full turn and report the result if the game is over
    pub fn run_turn_once(&mut self) -> Result<Option<GameResult>> {
        if let Some(outcome) = self.check_outcome() {
            return Ok(Some(self.result(outcome)));
        }
        if self.turns_elapsed >= self.max_turns {
            return Ok(Some(self.result(GameOutcome::TurnLimit)));
        }

        self.run_turn()?;
        self.turns_elapsed += 1;

        Ok(self.check_outcome().map(|outcome| self.result(outcome)))
    }

    fn result(&self, outcome: GameOutcome) -> GameResult {
        GameResult {
            outcome,
            turns_played: self.turns_elapsed,
        }
    }

    /// Loss is checked first: a location lost in the same cleanup that
    /// removed the last foe still loses the game
    pub fn check_outcome(&self) -> Option<GameOutcome> {
        if self.game.is_location_lost() {
            Some(GameOutcome::Lost)
        } else if self.game.all_foes_defeated() {
            Some(GameOutcome::Won)
        } else {
            None
        }
    }

    /// Run a single turn through all its phases
    fn run_turn(&mut self) -> Result<()> {
        let hero = self.game.active_hero();
        self.game.logger.normal(&format!(
            "=== Turn {} - {} ===",
            self.game.turn().turn_number,
            self.game.hero_name(hero)
        ));

        loop {
            self.execute_phase(hero)?;
            if !self.game.turn.advance_phase() {
                break;
            }
        }
        self.pass_turn();
        Ok(())
    }

    fn execute_phase(&mut self, hero: HeroId) -> Result<()> {
        let phase = self.game.turn().phase;
        self.game.logger.normal(&format!("--- {phase} ---"));
        match phase {
            TurnPhase::Hazard => self.hazard_phase(),
            TurnPhase::Foe => self.foe_phase(),
            TurnPhase::Action => self.action_phase(hero),
            TurnPhase::Cleanup => self.cleanup_phase(hero),
        }
    }

    /// Reveal the dark arts events the current stage calls for
    pub fn hazard_phase(&mut self) -> Result<()> {
        self.game.run_hazards()
    }

    /// Every active foe acts in reveal order
    pub fn foe_phase(&mut self) -> Result<()> {
        let foes: Vec<_> = self.game.active_foes().to_vec();
        for foe in foes {
            self.game.resolve_foe(foe)?;
        }
        Ok(())
    }

    /// Ask the hero for actions until they end the turn
    pub fn action_phase(&mut self, hero: HeroId) -> Result<()> {
        self.game.bus.clear_turn_scoped();
        self.game.recover_foes_stunned_by(hero)?;

        for _ in 0..self.max_actions_per_turn {
            let actions = self.game.available_actions(hero)?;
            let labels: Vec<String> = actions.iter().map(|&a| self.game.describe_action(a)).collect();
            let idx = self.game.choose(hero, "Choose an action", &labels)?;
            let action = actions[idx];
            if action == HeroAction::EndTurn {
                return Ok(());
            }
            // Offered actions are valid when offered; a rejection here is logged and play goes on
            let _outcome = self.game.perform_action(hero, action)?;
        }
        self.game
            .logger
            .normal(&format!("{} runs out of actions for this turn", self.game.hero_name(hero)));
        Ok(())
    }

    /// End of turn bookkeeping
    ///
    /// The active hero's piles are turned over first, then the table is
    /// restocked, stunned heroes recover and turn-scoped state expires.
    pub fn cleanup_phase(&mut self, hero: HeroId) -> Result<()> {
        let game = &mut *self.game;
        game.end_hero_turn(hero)?;
        game.resolve_location()?;
        game.refill_market();
        game.reveal_foes()?;
        game.recover_stunned_heroes();
        game.end_foe_turn();
        for h in game.heroes.iter_mut() {
            h.end_turn();
        }
        game.bus.clear_turn_scoped();
        Ok(())
    }

    fn pass_turn(&mut self) {
        let game = &mut *self.game;
        let next_idx = (game.turn.active_hero_idx + 1) % game.heroes.len();
        let next = game.heroes[next_idx].id;
        game.turn.next_turn(next, next_idx);
    }
}
