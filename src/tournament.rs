//! Simulation mode for running many games in parallel and collecting statistics
//!
//! Each game gets its own seed derived from the base seed, so a run is
//! reproducible regardless of how rayon schedules the work.

use crate::content;
use crate::game::{
    DecisionMaker, GameConfig, GameInitializer, GameLoop, GameOutcome, GameResult, OutputMode, RandomController,
    VerbosityLevel, ZeroController,
};
use crate::Result;
use rayon::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Decider used for every hero in a simulated game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeciderType {
    Zero,
    Random,
}

/// Settings for a batch of games
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub games: usize,
    pub heroes: usize,
    pub decider: DeciderType,
    pub seed: u64,
    pub max_turns: u32,
}

/// Aggregated results of a batch of games
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TournamentStats {
    pub won: usize,
    pub lost: usize,
    pub turn_limit: usize,
    /// Games that stopped with an engine error
    pub failed: usize,
    pub total_turns: u64,
    pub elapsed: Duration,
}

impl TournamentStats {
    pub fn games(&self) -> usize {
        self.won + self.lost + self.turn_limit
    }

    pub fn average_turns(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.total_turns as f64 / n as f64,
        }
    }

    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.won as f64 / n as f64,
        }
    }

    fn record(&mut self, result: &GameResult) {
        match result.outcome {
            GameOutcome::Won => self.won += 1,
            GameOutcome::Lost => self.lost += 1,
            GameOutcome::TurnLimit => self.turn_limit += 1,
        }
        self.total_turns += u64::from(result.turns_played);
    }
}

/// Seed for game `idx` of a run
pub fn game_seed(base: u64, idx: usize) -> u64 {
    base.wrapping_add((idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play one silent starter game
pub fn play_one(heroes: usize, decider: DeciderType, seed: u64, max_turns: u32) -> Result<GameResult> {
    let mut config = GameConfig::default()
        .with_seed(seed)
        .with_verbosity(VerbosityLevel::Silent);
    config.output_mode = OutputMode::Stdout;
    config.max_turns = max_turns;

    let decider: Rc<RefCell<dyn DecisionMaker>> = match decider {
        DeciderType::Zero => Rc::new(RefCell::new(ZeroController::new())),
        DeciderType::Random => Rc::new(RefCell::new(RandomController::with_seed(
            seed.wrapping_add(0x1234_5678_9ABC_DEF0),
        ))),
    };

    let setup = content::starter_setup(heroes, config)?;
    let mut game = GameInitializer::new(setup).init_game(decider)?;
    GameLoop::new(&mut game).run_game()
}

/// Run every game of the batch across the rayon pool
pub fn simulate(config: &SimulationConfig) -> TournamentStats {
    let start = Instant::now();
    let results: Vec<Result<GameResult>> = (0..config.games)
        .into_par_iter()
        .map(|idx| {
            play_one(
                config.heroes,
                config.decider,
                game_seed(config.seed, idx),
                config.max_turns,
            )
        })
        .collect();

    let mut stats = TournamentStats::default();
    for (idx, result) in results.iter().enumerate() {
        match result {
            Ok(result) => stats.record(result),
            Err(e) => {
                eprintln!("Warning: game {idx} failed: {e}");
                stats.failed += 1;
            }
        }
    }
    stats.elapsed = start.elapsed();
    stats
}

/// Print a summary of a finished batch
pub fn print_report(config: &SimulationConfig, stats: &TournamentStats) {
    println!("=== Simulation Complete ===");
    println!("Heroes: {}, decider: {:?}, base seed: {}", config.heroes, config.decider, config.seed);
    println!("Total games played: {}", stats.games());
    println!("Elapsed time: {:.2}s", stats.elapsed.as_secs_f64());
    if stats.elapsed.as_secs_f64() > 0.0 {
        println!(
            "Games per second: {:.2}",
            stats.games() as f64 / stats.elapsed.as_secs_f64()
        );
    }

    let total = stats.games();
    if total > 0 {
        let pct = |n: usize| 100.0 * n as f64 / total as f64;
        println!("Won: {} ({:.1}%)", stats.won, pct(stats.won));
        println!("Lost: {} ({:.1}%)", stats.lost, pct(stats.lost));
        println!("Turn limit: {} ({:.1}%)", stats.turn_limit, pct(stats.turn_limit));
        println!("Average turns: {:.1}", stats.average_turns());
    }
    if stats.failed > 0 {
        println!("Failed games: {}", stats.failed);
    }
}
