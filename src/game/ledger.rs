//! Hearts and tokens
//!
//! Every change to a hero's hearts, damage tokens or influence tokens goes
//! through this module so that clamping and permission gates are the same
//! for every effect that causes one.

use crate::core::{Capability, HeroId, Resource, Source, StunState};
use crate::game::events::{GameEvent, LedgerChange};
use crate::game::{Change, GameState, Outcome, Rejection};
use crate::Result;

impl GameState {
    /// Change a hero's hearts by `amount` (negative = lose hearts)
    ///
    /// Rejected while the hero is stunned, and for positive amounts when the
    /// hero is already at max or healing is blocked. A loss of more than one
    /// is capped at one while the hero holds a damage-mitigation card.
    /// Reaching zero stuns the hero before `HeartsChanged` fires.
    pub fn add_hearts(&mut self, hero: HeroId, amount: i32, source: Source) -> Result<Outcome<Change>> {
        let idx = self.hero_idx(hero)?;
        let h = &self.heroes[idx];
        if amount == 0 {
            return Ok(Outcome::Done(Change::none(h.hearts)));
        }

        let what = format!("{} {:+} hearts", h.name, amount);
        if h.is_stunned() {
            return Ok(self.reject(&what, Rejection::HeroStunned));
        }
        if amount > 0 && h.is_at_max_hearts() {
            return Ok(self.reject(&what, Rejection::AtMaxHearts));
        }
        if amount > 0 && !h.permissions.healing.is_allowed() {
            return Ok(self.reject(&what, Rejection::HealingBlocked));
        }

        let amount = if amount < -1 && self.holds_capability(idx, Capability::DamageMitigation) {
            self.logger
                .normal(&format!("{}'s damage is reduced to 1", self.heroes[idx].name));
            -1
        } else {
            amount
        };

        let h = &mut self.heroes[idx];
        let before = h.hearts as i64;
        let after = (before + amount as i64).clamp(0, h.max_hearts as i64);
        h.hearts = after as u32;
        let change = Change {
            delta: (after - before) as i32,
            total: h.hearts,
        };
        self.logger.verbose(&format!(
            "{} hearts {:+} -> {}/{} ({})",
            h.name, change.delta, h.hearts, h.max_hearts, source
        ));

        if change.total == 0 {
            self.stun_hero(hero)?;
        }
        if change.delta != 0 {
            self.fire(GameEvent::HeartsChanged(LedgerChange {
                hero,
                delta: change.delta,
                total: change.total,
                source,
            }))?;
        }
        Ok(Outcome::Done(change))
    }

    /// Change a hero's damage tokens by `amount`
    pub fn add_damage(&mut self, hero: HeroId, amount: i32, source: Source) -> Result<Outcome<Change>> {
        self.add_tokens(hero, Resource::Damage, amount, source)
    }

    /// Change a hero's influence tokens by `amount`
    pub fn add_influence(&mut self, hero: HeroId, amount: i32, source: Source) -> Result<Outcome<Change>> {
        self.add_tokens(hero, Resource::Influence, amount, source)
    }

    fn add_tokens(&mut self, hero: HeroId, resource: Resource, amount: i32, source: Source) -> Result<Outcome<Change>> {
        let idx = self.hero_idx(hero)?;
        let h = &self.heroes[idx];
        let current = match resource {
            Resource::Damage => h.damage_tokens,
            Resource::Influence => h.influence_tokens,
        };
        if amount == 0 {
            return Ok(Outcome::Done(Change::none(current)));
        }

        if amount > 0 {
            let what = format!("{} +{} {}", h.name, amount, resource);
            if hero != self.turn.active_hero && !h.permissions.gain_out_of_turn.is_allowed() {
                return Ok(self.reject(&what, Rejection::OutOfTurnGain));
            }
            if source.is_ally() && !h.permissions.gain_from_allies.is_allowed() {
                return Ok(self.reject(&what, Rejection::AllyGainBlocked));
            }
        }

        let after = (current as i64 + amount as i64).max(0) as u32;
        let h = &mut self.heroes[idx];
        match resource {
            Resource::Damage => h.damage_tokens = after,
            Resource::Influence => h.influence_tokens = after,
        }
        let change = Change {
            delta: after as i32 - current as i32,
            total: after,
        };
        self.logger.verbose(&format!(
            "{} {} tokens {:+} -> {} ({})",
            self.heroes[idx].name, resource, change.delta, after, source
        ));
        Ok(Outcome::Done(change))
    }

    /// Is any card in this hero's hand carrying `capability`?
    fn holds_capability(&self, idx: usize, capability: Capability) -> bool {
        self.heroes[idx]
            .zones
            .hand
            .iter()
            .filter_map(|id| self.cards.get(id).ok())
            .any(|card| card.has_capability(capability))
    }

    /// Knock a hero out
    ///
    /// Tokens are cleared and control rises by one before the hero picks
    /// half their hand (rounded down) to discard.
    pub(crate) fn stun_hero(&mut self, hero: HeroId) -> Result<()> {
        let idx = self.hero_idx(hero)?;
        let h = &mut self.heroes[idx];
        h.stun = StunState::Stunned;
        h.clear_tokens();
        self.logger.normal(&format!("{} is stunned!", h.name));

        let _control = self.add_control(1, Source::Rule)?;

        let hand: Vec<_> = self.heroes[idx].zones.hand.cards.clone();
        let count = hand.len() / 2;
        if count > 0 {
            let picked = self.choose_cards(hero, "Choose a card to discard", &hand, count)?;
            for card in picked {
                let _discarded = self.discard_card(hero, card, true)?;
            }
        }
        Ok(())
    }

    /// Bring every stunned hero back with full hearts
    pub fn recover_stunned_heroes(&mut self) {
        for h in self.heroes.iter_mut().filter(|h| h.is_stunned()) {
            h.recover();
            self.logger
                .normal(&format!("{} recovers with {} hearts", h.name, h.hearts));
        }
    }
}
