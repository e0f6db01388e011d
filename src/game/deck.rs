//! Drawing, revealing, discarding and playing hero cards

use crate::core::{CardId, HeroId, Source};
use crate::game::events::GameEvent;
use crate::game::{GameState, Outcome, Rejection};
use crate::{GameError, Result};

impl GameState {
    /// Refill an empty deck from the discard pile
    ///
    /// Shuffle listeners run first so they can still add cards to the
    /// discard pile. Returns false if the deck is still empty afterward.
    fn ensure_deck(&mut self, hero: HeroId) -> Result<bool> {
        let idx = self.hero_idx(hero)?;
        if !self.heroes[idx].zones.deck.is_empty() {
            return Ok(true);
        }

        self.fire(GameEvent::Shuffle { hero })?;

        let zones = &mut self.heroes[idx].zones;
        zones.discard.move_all_to(&mut zones.deck);
        zones.deck.shuffle(&mut self.rng);
        if zones.deck.is_empty() {
            return Ok(false);
        }
        self.logger.verbose(&format!(
            "{} shuffles {} cards into their deck",
            self.heroes[idx].name,
            self.heroes[idx].zones.deck.len()
        ));
        Ok(true)
    }

    /// Draw up to `count` cards into the hero's hand
    ///
    /// Runs short without error when deck and discard are both exhausted.
    /// Returns how many cards were drawn.
    pub fn draw(&mut self, hero: HeroId, count: usize, bypass_permission: bool) -> Result<Outcome<usize>> {
        let idx = self.hero_idx(hero)?;
        if !bypass_permission && !self.heroes[idx].permissions.drawing.is_allowed() {
            let what = format!("{} draws {}", self.heroes[idx].name, count);
            return Ok(self.reject(&what, Rejection::DrawingBlocked));
        }

        let mut drawn = 0;
        for _ in 0..count {
            if !self.ensure_deck(hero)? {
                break;
            }
            let zones = &mut self.heroes[idx].zones;
            if let Some(card) = zones.deck.draw_top() {
                zones.hand.add(card);
                drawn += 1;
            }
        }
        if drawn > 0 {
            self.logger
                .verbose(&format!("{} draws {} card(s)", self.heroes[idx].name, drawn));
        }
        Ok(Outcome::Done(drawn))
    }

    /// Look at the top card of the hero's deck without taking it
    pub fn reveal_top(&mut self, hero: HeroId) -> Result<Option<CardId>> {
        let idx = self.hero_idx(hero)?;
        if !self.ensure_deck(hero)? {
            return Ok(None);
        }
        let top = self.heroes[idx].zones.deck.peek_top();
        if let Some(card) = top {
            self.logger.verbose(&format!(
                "{} reveals {}",
                self.heroes[idx].name,
                self.card_name(card)
            ));
        }
        Ok(top)
    }

    /// Move a card from the hero's hand, play area or deck to their discard pile
    ///
    /// The card's own discard effect always runs. `Discard` listeners only
    /// hear about it when `with_callbacks` is set.
    pub fn discard_card(&mut self, hero: HeroId, card: CardId, with_callbacks: bool) -> Result<Outcome> {
        let idx = self.hero_idx(hero)?;
        let zones = &mut self.heroes[idx].zones;
        let found = zones.hand.remove(card) || zones.play_area.remove(card) || zones.deck.remove(card);
        if !found {
            let what = format!("{} discards {}", self.heroes[idx].name, self.card_name(card));
            return Ok(self.reject(&what, Rejection::CardNotInHand));
        }
        zones.discard.add(card);
        self.logger.normal(&format!(
            "{} discards {}",
            self.heroes[idx].name,
            self.card_name(card)
        ));

        if let Some(effect) = self.card(card)?.discard_effect.clone() {
            self.nested(|game| (effect.get())(game, hero))?;
        }
        if with_callbacks {
            self.fire(GameEvent::Discard { hero, card })?;
        }
        Ok(Outcome::Done(()))
    }

    /// Play a card from hand: move it to the play area and run its effect
    pub fn play_card(&mut self, hero: HeroId, card: CardId) -> Result<Outcome> {
        let idx = self.hero_idx(hero)?;
        if !self.heroes[idx].zones.hand.contains(card) {
            let what = format!("{} plays {}", self.heroes[idx].name, self.card_name(card));
            return Ok(self.reject(&what, Rejection::CardNotInHand));
        }
        let effect = {
            let c = self.card(card)?;
            c.effect.clone().ok_or_else(|| GameError::MissingHook {
                name: c.name.to_string(),
                hook: "effect",
            })?
        };
        let source = self.card_source(card)?;

        let zones = &mut self.heroes[idx].zones;
        zones.hand.remove(card);
        zones.play_area.add(card);
        self.logger
            .normal(&format!("{} plays {}", self.heroes[idx].name, self.card_name(card)));

        self.nested(|game| (effect.get())(game, hero, source))?;
        self.fire(GameEvent::CardPlayed { hero, card })?;
        Ok(Outcome::Done(()))
    }

    /// Put the play area and hand into the discard pile, drop unspent
    /// tokens and draw a fresh hand
    ///
    /// Cards discarded here trigger neither their own discard effect nor
    /// `Discard` listeners.
    pub fn end_hero_turn(&mut self, hero: HeroId) -> Result<()> {
        let idx = self.hero_idx(hero)?;
        let h = &mut self.heroes[idx];
        let zones = &mut h.zones;
        zones.play_area.move_all_to(&mut zones.discard);
        zones.hand.move_all_to(&mut zones.discard);
        if h.damage_tokens > 0 || h.influence_tokens > 0 {
            self.logger.verbose(&format!(
                "{} loses {} unspent damage and {} unspent influence",
                h.name, h.damage_tokens, h.influence_tokens
            ));
        }
        h.clear_tokens();

        let hand_size = self.config.hand_size;
        let _drawn = self.draw(hero, hand_size, true)?;
        Ok(())
    }

    /// Source tag for effects of the given card
    pub fn card_source(&self, card: CardId) -> Result<Source> {
        let c = self.card(card)?;
        Ok(Source::card(card, c.kind))
    }
}
