//! Card types and definitions

use crate::core::{CardHook, CardId, CardName, GameEntity, HeroHook, HeroId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Hero card categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Ally,
    Item,
    Spell,
}

/// Rule-relevant properties a card can carry while in hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Holding this card caps any single heart loss at 1
    DamageMitigation,
}

/// A card definition shared by every copy of that card
///
/// Definitions are data: the engine only ever calls the hooks.
#[derive(Debug, Clone)]
pub struct CardDef {
    pub name: CardName,
    pub kind: CardKind,
    pub cost: u32,
    pub text: String,
    pub capabilities: SmallVec<[Capability; 2]>,
    pub effect: Option<CardHook>,
    pub discard_effect: Option<HeroHook>,
}

impl CardDef {
    pub fn new(name: impl Into<CardName>, kind: CardKind, cost: u32) -> Self {
        CardDef {
            name: name.into(),
            kind,
            cost,
            text: String::new(),
            capabilities: SmallVec::new(),
            effect: None,
            discard_effect: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn with_effect(mut self, effect: CardHook) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn with_discard_effect(mut self, effect: HeroHook) -> Self {
        self.discard_effect = Some(effect);
        self
    }

    /// Create one card instance from this definition
    pub fn instantiate(&self, id: CardId, owner: Option<HeroId>) -> Card {
        Card {
            id,
            name: self.name.clone(),
            kind: self.kind,
            cost: self.cost,
            text: self.text.clone(),
            capabilities: self.capabilities.clone(),
            owner,
            effect: self.effect.clone(),
            discard_effect: self.discard_effect.clone(),
        }
    }
}

/// Represents a card in the game
///
/// Cards have a unique id but many cards can share the same definition.
/// This struct is the instance of a card during gameplay.
#[derive(Debug, Clone)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: CardId,

    /// Card name (e.g., "Alohomora")
    pub name: CardName,

    pub kind: CardKind,

    /// Influence needed to acquire the card from the market
    pub cost: u32,

    /// Rules text
    pub text: String,

    pub capabilities: SmallVec<[Capability; 2]>,

    /// Hero whose piles hold this card (None while in the market)
    pub owner: Option<HeroId>,

    /// Runs once when the card is played
    pub effect: Option<CardHook>,

    /// Runs whenever this instance is discarded
    pub discard_effect: Option<HeroHook>,
}

impl Card {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn is_ally(&self) -> bool {
        self.kind == CardKind::Ally
    }

    pub fn is_item(&self) -> bool {
        self.kind == CardKind::Item
    }

    pub fn is_spell(&self) -> bool {
        self.kind == CardKind::Spell
    }
}

impl GameEntity<Card> for Card {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
