//! Hogwarts engine - rules engine for a cooperative deck-building game
//!
//! Heroes take turns against villains, creatures and dark arts events while
//! control builds up on the current location. Card, foe and event behavior
//! is plugged in as hooks; the engine owns the ledgers, piles, listener bus
//! and turn structure they act on.

pub mod content;
pub mod core;
pub mod error;
pub mod game;
pub mod tournament;
pub mod zones;

pub use error::{GameError, Result};
