//! Turn phases

use crate::core::HeroId;
use serde::{Deserialize, Serialize};

/// Phases of a turn, in fixed cyclic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Reveal dark arts events
    Hazard,
    /// Villains and creatures act
    Foe,
    /// The active hero plays cards, assigns tokens and buys
    Action,
    /// Refill, reveal, recover, expire turn state, pass the turn
    Cleanup,
}

impl TurnPhase {
    /// Next phase within the turn; None after cleanup
    pub fn next(&self) -> Option<TurnPhase> {
        match self {
            TurnPhase::Hazard => Some(TurnPhase::Foe),
            TurnPhase::Foe => Some(TurnPhase::Action),
            TurnPhase::Action => Some(TurnPhase::Cleanup),
            TurnPhase::Cleanup => None,
        }
    }
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnPhase::Hazard => "Dark Arts",
            TurnPhase::Foe => "Villains",
            TurnPhase::Action => "Hero actions",
            TurnPhase::Cleanup => "Cleanup",
        };
        f.write_str(name)
    }
}

/// Represents the current turn structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Current turn number (starts at 1)
    pub turn_number: u32,

    pub phase: TurnPhase,

    /// Hero whose turn it is
    pub active_hero: HeroId,

    /// Active hero's index in turn order
    pub active_hero_idx: usize,
}

impl TurnStructure {
    pub fn new(starting_hero: HeroId) -> Self {
        TurnStructure {
            turn_number: 1,
            phase: TurnPhase::Hazard,
            active_hero: starting_hero,
            active_hero_idx: 0,
        }
    }

    /// Advance to the next phase
    pub fn advance_phase(&mut self) -> bool {
        if let Some(next) = self.phase.next() {
            self.phase = next;
            true
        } else {
            false // End of turn
        }
    }

    /// Start a new turn for the given hero
    pub fn next_turn(&mut self, next_hero: HeroId, next_idx: usize) {
        self.turn_number += 1;
        self.phase = TurnPhase::Hazard;
        self.active_hero = next_hero;
        self.active_hero_idx = next_idx;
    }
}
