//! Results of rule-gated operations
//!
//! A rejected operation is part of normal play (the hero picks something
//! else), so it is a value, not an error. `Err(GameError)` is reserved for
//! broken card definitions and engine misuse.

use crate::core::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    HeroStunned,
    AtMaxHearts,
    HealingBlocked,
    OutOfTurnGain,
    AllyGainBlocked,
    DrawingBlocked,
    CardNotInHand,
    CardNotInMarket,
    NotActiveHero,
    NotEnoughInfluence { needed: u32, available: u32 },
    NoTokens(Resource),
    FoeNotActive,
    FoeNotVulnerable,
    ThresholdReached(Resource),
    TurnCapReached(Resource),
    ControlRemovalBlocked,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::HeroStunned => f.write_str("hero is stunned"),
            Rejection::AtMaxHearts => f.write_str("hero is already at max hearts"),
            Rejection::HealingBlocked => f.write_str("healing is not allowed"),
            Rejection::OutOfTurnGain => f.write_str("cannot gain tokens outside own turn"),
            Rejection::AllyGainBlocked => f.write_str("cannot gain tokens from allies"),
            Rejection::DrawingBlocked => f.write_str("drawing is not allowed"),
            Rejection::CardNotInHand => f.write_str("card is not in hand"),
            Rejection::CardNotInMarket => f.write_str("card is not in the market"),
            Rejection::NotActiveHero => f.write_str("not the active hero"),
            Rejection::NotEnoughInfluence { needed, available } => {
                write!(f, "needs {needed} influence, has {available}")
            }
            Rejection::NoTokens(resource) => write!(f, "no {resource} tokens to assign"),
            Rejection::FoeNotActive => f.write_str("foe is not in play"),
            Rejection::FoeNotVulnerable => f.write_str("foe cannot be targeted yet"),
            Rejection::ThresholdReached(resource) => write!(f, "foe already has enough {resource}"),
            Rejection::TurnCapReached(resource) => {
                write!(f, "foe cannot take more {resource} this turn")
            }
            Rejection::ControlRemovalBlocked => f.write_str("control cannot be removed"),
        }
    }
}

/// Outcome of a rule-gated operation
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    Done(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Done(_) => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Rejected(reason) => Outcome::Rejected(reason),
        }
    }
}

/// A change to a bounded counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Signed amount actually applied after clamping
    pub delta: i32,
    /// Counter value afterward
    pub total: u32,
}

impl Change {
    pub fn none(total: u32) -> Self {
        Change { delta: 0, total }
    }
}

/// What a successful assignment did to a foe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoeHit {
    Damaged,
    Defeated,
}
