//! Ref-counted permission flags
//!
//! Several effects can independently restrict (or grant) the same thing, so
//! a flag is a count of overrides rather than a bool. Each effect releases
//! exactly what it placed. Overrides placed "this turn" live on a separate
//! layer that the cleanup phase wipes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Value when no override is active
    default_allowed: bool,
    /// Overrides held until explicitly released
    persistent: u32,
    /// Overrides that expire at cleanup
    turn: u32,
}

impl Permission {
    /// A permission that is allowed unless something restricts it
    pub const fn allowed_by_default() -> Self {
        Permission {
            default_allowed: true,
            persistent: 0,
            turn: 0,
        }
    }

    /// A permission that is denied unless something grants it
    pub const fn denied_by_default() -> Self {
        Permission {
            default_allowed: false,
            persistent: 0,
            turn: 0,
        }
    }

    pub fn is_allowed(&self) -> bool {
        if self.persistent + self.turn > 0 {
            !self.default_allowed
        } else {
            self.default_allowed
        }
    }

    /// Place an override until [`Permission::release`] is called
    pub fn flip(&mut self) {
        self.persistent += 1;
    }

    /// Remove one persistent override (never underflows)
    pub fn release(&mut self) {
        self.persistent = self.persistent.saturating_sub(1);
    }

    /// Place an override that expires at the end of the turn
    pub fn flip_this_turn(&mut self) {
        self.turn += 1;
    }

    /// Drop all turn-scoped overrides
    pub fn end_turn(&mut self) {
        self.turn = 0;
    }

    /// Number of active overrides (both layers)
    pub fn overrides(&self) -> u32 {
        self.persistent + self.turn
    }
}

/// The per-hero permission set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroPermissions {
    pub drawing: Permission,
    pub healing: Permission,
    pub gain_out_of_turn: Permission,
    pub gain_from_allies: Permission,
}

impl HeroPermissions {
    pub fn new() -> Self {
        HeroPermissions {
            drawing: Permission::allowed_by_default(),
            healing: Permission::allowed_by_default(),
            gain_out_of_turn: Permission::denied_by_default(),
            gain_from_allies: Permission::allowed_by_default(),
        }
    }

    pub fn end_turn(&mut self) {
        self.drawing.end_turn();
        self.healing.end_turn();
        self.gain_out_of_turn.end_turn();
        self.gain_from_allies.end_turn();
    }
}

impl Default for HeroPermissions {
    fn default() -> Self {
        Self::new()
    }
}
