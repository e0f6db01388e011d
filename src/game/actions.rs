//! What the active hero can do during the action phase

use crate::core::{CardId, FoeId, HeroId, Resource};
use crate::game::{GameState, Outcome};
use crate::Result;
use serde::{Deserialize, Serialize};

/// One choice in the action phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroAction {
    Play(CardId),
    AssignDamage(FoeId),
    AssignInfluence(FoeId),
    Acquire(CardId),
    EndTurn,
}

impl GameState {
    /// Every action `hero` could take right now; ending the turn is always
    /// offered and always last
    pub fn available_actions(&self, hero: HeroId) -> Result<Vec<HeroAction>> {
        let h = self.hero(hero)?;
        let mut actions: Vec<HeroAction> = h.zones.hand.iter().map(HeroAction::Play).collect();

        for &foe in self.active_foes() {
            if h.damage_tokens > 0 && self.foe_accepts(foe, Resource::Damage)?.is_none() {
                actions.push(HeroAction::AssignDamage(foe));
            }
            if h.influence_tokens > 0 && self.foe_accepts(foe, Resource::Influence)?.is_none() {
                actions.push(HeroAction::AssignInfluence(foe));
            }
        }

        for card in self.market.row.iter() {
            if self.card(card)?.cost <= h.influence_tokens {
                actions.push(HeroAction::Acquire(card));
            }
        }

        actions.push(HeroAction::EndTurn);
        Ok(actions)
    }

    /// Option label shown to the decider
    pub fn describe_action(&self, action: HeroAction) -> String {
        match action {
            HeroAction::Play(card) => format!("Play {}", self.card_name(card)),
            HeroAction::AssignDamage(foe) => format!("Assign 1 damage to {}", self.foe_name(foe)),
            HeroAction::AssignInfluence(foe) => format!("Assign 1 influence to {}", self.foe_name(foe)),
            HeroAction::Acquire(card) => {
                let cost = self.card(card).map(|c| c.cost).unwrap_or_default();
                format!("Acquire {} ({} influence)", self.card_name(card), cost)
            }
            HeroAction::EndTurn => "End turn".to_string(),
        }
    }

    /// Carry out one action
    pub fn perform_action(&mut self, hero: HeroId, action: HeroAction) -> Result<Outcome> {
        match action {
            HeroAction::Play(card) => self.play_card(hero, card),
            HeroAction::AssignDamage(foe) => Ok(self.assign_damage(hero, foe)?.map(|_| ())),
            HeroAction::AssignInfluence(foe) => Ok(self.assign_influence(hero, foe)?.map(|_| ())),
            HeroAction::Acquire(card) => self.acquire(hero, card),
            HeroAction::EndTurn => Ok(Outcome::Done(())),
        }
    }
}
