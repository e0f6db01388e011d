//! Game configuration

use crate::game::logger::{OutputMode, VerbosityLevel, DEFAULT_LOG_CAPACITY};
use serde::{Deserialize, Serialize};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards drawn for a fresh hand
    pub hand_size: usize,
    /// Face-up cards in the market row
    pub market_size: usize,
    /// Foes in play at once
    pub max_active_foes: usize,
    pub starting_hearts: u32,
    /// Recent log entries kept in memory
    pub log_capacity: usize,
    pub verbosity: VerbosityLevel,
    pub output_mode: OutputMode,
    /// Turns before the game is called off
    pub max_turns: u32,
    /// Fixed RNG seed (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            hand_size: 5,
            market_size: 6,
            max_active_foes: 1,
            starting_hearts: 10,
            log_capacity: DEFAULT_LOG_CAPACITY,
            verbosity: VerbosityLevel::Normal,
            output_mode: OutputMode::Stdout,
            max_turns: 200,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Silent stdout with every entry captured; what tests want
    pub fn captured(mut self) -> Self {
        self.verbosity = VerbosityLevel::Verbose;
        self.output_mode = OutputMode::Memory;
        self
    }
}
