//! Dark arts events

use crate::core::{GameEntity, GameHook, HazardId};

/// A dark arts event definition; decks hold several copies of some events
#[derive(Debug, Clone)]
pub struct HazardDef {
    pub name: String,
    pub text: String,
    pub effect: GameHook,
}

impl HazardDef {
    pub fn new(name: impl Into<String>, effect: GameHook) -> Self {
        HazardDef {
            name: name.into(),
            text: String::new(),
            effect,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn instantiate(&self, id: HazardId) -> HazardCard {
        HazardCard {
            id,
            name: self.name.clone(),
            text: self.text.clone(),
            effect: self.effect.clone(),
        }
    }
}

/// A dark arts event card
#[derive(Debug, Clone)]
pub struct HazardCard {
    pub id: HazardId,
    pub name: String,
    pub text: String,
    pub effect: GameHook,
}

impl GameEntity<HazardCard> for HazardCard {
    fn id(&self) -> HazardId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
