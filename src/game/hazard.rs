//! The dark arts deck

use crate::core::{EntityStore, HazardCard, HazardDef, HazardId};
use crate::game::GameState;
use crate::Result;
use rand::seq::SliceRandom;

/// Dark arts events with their own draw and discard piles
#[derive(Debug, Clone, Default)]
pub struct HazardDeck {
    pub(crate) cards: EntityStore<HazardCard>,
    /// Last element is the top
    pub(crate) deck: Vec<HazardId>,
    pub(crate) discard: Vec<HazardId>,
}

impl HazardDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a new copy of `def` on the draw pile
    pub fn add(&mut self, def: &HazardDef) -> HazardId {
        let id = self.cards.alloc(|id| def.instantiate(id));
        self.deck.push(id);
        id
    }

    pub fn get(&self, id: HazardId) -> Option<&HazardCard> {
        self.cards.get(id).ok()
    }

    pub fn remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn discarded(&self) -> usize {
        self.discard.len()
    }

    /// The most recently resolved event
    pub fn last_discarded(&self) -> Option<&HazardCard> {
        self.discard.last().and_then(|&id| self.get(id))
    }

    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        self.deck.shuffle(rng);
    }

    fn draw_top(&mut self, rng: &mut impl rand::Rng) -> Option<HazardId> {
        if self.deck.is_empty() {
            self.deck.append(&mut self.discard);
            self.deck.shuffle(rng);
        }
        self.deck.pop()
    }
}

impl GameState {
    /// Reveal and resolve the top dark arts event
    ///
    /// Safe to call from inside another event's effect. The event goes to
    /// the discard pile once its effect has finished. Returns None if there
    /// are no events at all.
    pub fn reveal_hazard(&mut self) -> Result<Option<HazardId>> {
        let Some(id) = self.hazards.draw_top(&mut self.rng) else {
            return Ok(None);
        };
        let card = self.hazards.cards.get(id)?;
        let effect = card.effect.clone();
        self.logger
            .normal(&format!("Dark Arts: {} - {}", card.name, card.text));

        let resolved = self.nested(|game| (effect.get())(game));
        self.hazards.discard.push(id);
        resolved.map(|()| Some(id))
    }

    /// Reveal as many events as the current stage calls for
    pub fn run_hazards(&mut self) -> Result<()> {
        let count = self.location.current().hazards_per_turn;
        for _ in 0..count {
            if self.reveal_hazard()?.is_none() {
                break;
            }
        }
        Ok(())
    }
}
