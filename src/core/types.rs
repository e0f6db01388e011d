//! Strongly-typed wrappers for game concepts
//!
//! Newtypes keep names of different entity kinds from being mixed up, and
//! [`Source`] records who caused a ledger change.

use crate::core::{CardId, CardKind, FoeId};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                $name(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_string())
            }
        }
    };
}

name_type!(
    /// Card name (distinct from other string types)
    CardName
);

name_type!(
    /// Hero name
    HeroName
);

name_type!(
    /// Villain or creature name
    FoeName
);

/// What caused a change to a hero's hearts or tokens
///
/// Threaded explicitly through every ledger mutation so gates such as
/// "tokens gained from allies" read data instead of guessing at the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    /// A hero card's effect
    Card { card: CardId, kind: CardKind },
    /// A villain or creature effect or reward
    Foe(FoeId),
    /// A dark arts event
    Hazard,
    /// A location reveal effect
    Location,
    /// The game rules themselves (spending tokens, recovery, turn cleanup)
    Rule,
}

impl Source {
    pub fn card(card: CardId, kind: CardKind) -> Self {
        Source::Card { card, kind }
    }

    /// Did this change come from an ally card?
    pub fn is_ally(&self) -> bool {
        matches!(
            self,
            Source::Card {
                kind: CardKind::Ally,
                ..
            }
        )
    }

    /// Did this change come from the opposing side (foes, hazards, location)?
    pub fn is_adverse(&self) -> bool {
        matches!(self, Source::Foe(_) | Source::Hazard | Source::Location)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Card { card, kind } => write!(f, "{kind:?} card {card}"),
            Source::Foe(foe) => write!(f, "foe {foe}"),
            Source::Hazard => write!(f, "dark arts"),
            Source::Location => write!(f, "location"),
            Source::Rule => write!(f, "rules"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_name() {
        let name = CardName::new("Alohomora");
        assert_eq!(name.as_str(), "Alohomora");
        assert_eq!(name.to_string(), "Alohomora");
    }

    #[test]
    fn test_hero_name() {
        let name: HeroName = "Hermione".into();
        assert_eq!(name.as_str(), "Hermione");
    }

    #[test]
    fn test_source_ally_tag() {
        let card = CardId::new(3);
        assert!(Source::card(card, CardKind::Ally).is_ally());
        assert!(!Source::card(card, CardKind::Spell).is_ally());
        assert!(!Source::Hazard.is_ally());
        assert!(Source::Hazard.is_adverse());
        assert!(Source::Foe(FoeId::new(1)).is_adverse());
        assert!(!Source::Rule.is_adverse());
    }
}
