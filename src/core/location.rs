//! Locations and the control track

use crate::core::GameHook;
use serde::{Deserialize, Serialize};

/// One stage of a location
#[derive(Debug, Clone)]
pub struct Stage {
    pub name: String,
    /// Control at which this stage is lost
    pub max_control: u32,
    /// Dark arts events revealed each turn while this stage is current
    pub hazards_per_turn: u32,
    /// Control placed on this stage so far, within `0..=max_control`
    pub control: u32,
    /// Runs when this stage becomes current
    pub on_reveal: Option<GameHook>,
}

impl Stage {
    pub fn new(name: impl Into<String>, max_control: u32, hazards_per_turn: u32) -> Self {
        Stage {
            name: name.into(),
            max_control,
            hazards_per_turn,
            control: 0,
            on_reveal: None,
        }
    }

    pub fn with_on_reveal(mut self, hook: GameHook) -> Self {
        self.on_reveal = Some(hook);
        self
    }

    pub fn is_cleared(&self) -> bool {
        self.control >= self.max_control
    }
}

/// An ordered sequence of stages with a pointer to the current one
#[derive(Debug, Clone)]
pub struct Location {
    stages: Vec<Stage>,
    current: usize,
    /// Effects currently preventing control from being removed
    removal_blocks: u32,
}

/// Result of trying to move past a cleared stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// Stage not cleared, nothing happened
    Stay,
    /// Moved to the next stage
    Moved,
    /// Cleared the final stage
    Exhausted,
}

impl Location {
    /// Build a location; callers guarantee at least one stage
    pub fn new(stages: Vec<Stage>) -> Self {
        Location {
            stages,
            current: 0,
            removal_blocks: 0,
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stages_mut(&mut self) -> &mut [Stage] {
        &mut self.stages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Stage {
        &self.stages[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Stage {
        &mut self.stages[self.current]
    }

    pub fn control(&self) -> u32 {
        self.current().control
    }

    pub fn max_control(&self) -> u32 {
        self.current().max_control
    }

    pub fn has_next_stage(&self) -> bool {
        self.current + 1 < self.stages.len()
    }

    /// Set control to `control + delta` clamped to the stage bounds and
    /// return the delta actually applied
    pub fn apply_delta(&mut self, delta: i32) -> i32 {
        let stage = self.current_mut();
        let before = stage.control as i64;
        let after = (before + delta as i64).clamp(0, stage.max_control as i64);
        stage.control = after as u32;
        (after - before) as i32
    }

    /// Move past the current stage if it is cleared
    pub fn advance(&mut self) -> Advance {
        if !self.current().is_cleared() {
            return Advance::Stay;
        }
        if !self.has_next_stage() {
            return Advance::Exhausted;
        }
        self.current += 1;
        self.current_mut().control = 0;
        Advance::Moved
    }

    pub fn is_removal_blocked(&self) -> bool {
        self.removal_blocks > 0
    }

    pub fn block_removal(&mut self) {
        self.removal_blocks += 1;
    }

    pub fn release_removal_block(&mut self) {
        self.removal_blocks = self.removal_blocks.saturating_sub(1);
    }
}
