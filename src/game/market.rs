//! The shared card market

use crate::core::{CardId, HeroId, Source};
use crate::game::events::GameEvent;
use crate::game::{GameState, Outcome, Rejection};
use crate::zones::{CardZone, Zone};
use crate::Result;

/// Face-down supply plus the face-up row heroes buy from
#[derive(Debug, Clone)]
pub struct Market {
    pub supply: CardZone,
    pub row: CardZone,
    /// Cards the row is refilled to
    pub target_size: usize,
}

impl Market {
    pub fn new(target_size: usize) -> Self {
        Market {
            supply: CardZone::new(Zone::MarketSupply),
            row: CardZone::new(Zone::MarketRow),
            target_size,
        }
    }

    /// Deal from the supply until the row is full or the supply is empty
    pub fn refill(&mut self) -> usize {
        let mut dealt = 0;
        while self.row.len() < self.target_size {
            let Some(card) = self.supply.draw_top() else {
                break;
            };
            self.row.add(card);
            dealt += 1;
        }
        dealt
    }
}

impl GameState {
    pub fn refill_market(&mut self) {
        let dealt = self.market.refill();
        if dealt > 0 {
            self.logger
                .verbose(&format!("Market refilled with {dealt} card(s)"));
        }
    }

    /// Buy a card from the market row into the hero's discard pile
    pub fn acquire(&mut self, hero: HeroId, card: CardId) -> Result<Outcome> {
        let h = self.hero(hero)?;
        let what = format!("{} acquires {}", h.name, self.card_name(card));
        if !self.is_active(hero) {
            return Ok(self.reject(&what, Rejection::NotActiveHero));
        }
        if !self.market.row.contains(card) {
            return Ok(self.reject(&what, Rejection::CardNotInMarket));
        }
        let cost = self.card(card)?.cost;
        let available = h.influence_tokens;
        if available < cost {
            return Ok(self.reject(&what, Rejection::NotEnoughInfluence { needed: cost, available }));
        }

        if let Outcome::Rejected(reason) = self.add_influence(hero, -(cost as i32), Source::Rule)? {
            return Ok(Outcome::Rejected(reason));
        }
        self.market.row.remove(card);
        self.cards.get_mut(card)?.owner = Some(hero);
        self.hero_mut(hero)?.zones.discard.add(card);
        self.logger.normal(&format!("{what} for {cost} influence"));

        self.fire(GameEvent::Acquire { hero, card })?;
        Ok(Outcome::Done(()))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{CardDef, CardKind, HeroId};
    use crate::game::events::{ListenerFn, TriggerKind};
    use crate::game::state::test_support::*;
    use crate::game::{GameState, Rejection};
    use std::cell::Cell;
    use std::rc::Rc;

    const HARRY: HeroId = HeroId::new(0);

    fn stock(game: &mut GameState, names: &[(&str, u32)]) -> Vec<crate::core::CardId> {
        names
            .iter()
            .map(|&(name, cost)| {
                let def = CardDef::new(name, CardKind::Item, cost);
                let id = game.cards.alloc(|id| def.instantiate(id, None));
                game.market.supply.add(id);
                id
            })
            .collect()
    }

    #[test]
    fn test_refill_stops_at_target_or_empty_supply() {
        let mut game = bare_game();
        game.market.target_size = 2;
        stock(&mut game, &[("A", 1), ("B", 1), ("C", 1)]);

        game.refill_market();
        assert_eq!(game.market.row.len(), 2);
        assert_eq!(game.market.supply.len(), 1);

        game.market.target_size = 5;
        game.refill_market();
        assert_eq!(game.market.row.len(), 3);
        assert!(game.market.supply.is_empty());
    }

    #[test]
    fn test_acquire_spends_influence_and_fires() {
        let mut game = bare_game();
        let ids = stock(&mut game, &[("Nimbus Two Thousand", 5)]);
        game.refill_market();
        let heard = Rc::new(Cell::new(0));
        let h = heard.clone();
        game.register_listener(
            TriggerKind::Acquire,
            ListenerFn::new(move |_, _| {
                h.set(h.get() + 1);
                Ok(())
            }),
        );

        game.heroes[0].influence_tokens = 4;
        assert_eq!(
            game.acquire(HARRY, ids[0]).unwrap().rejection(),
            Some(Rejection::NotEnoughInfluence { needed: 5, available: 4 })
        );

        game.heroes[0].influence_tokens = 6;
        assert!(game.acquire(HARRY, ids[0]).unwrap().is_done());
        assert_eq!(game.heroes[0].influence_tokens, 1);
        assert!(game.heroes[0].zones.discard.contains(ids[0]));
        assert_eq!(game.card(ids[0]).unwrap().owner, Some(HARRY));
        assert!(game.market.row.is_empty());
        assert_eq!(heard.get(), 1);

        assert_eq!(
            game.acquire(HARRY, ids[0]).unwrap().rejection(),
            Some(Rejection::CardNotInMarket)
        );
    }

    #[test]
    fn test_only_active_hero_buys() {
        let mut game = bare_game();
        let ids = stock(&mut game, &[("Essence of Dittany", 2)]);
        game.refill_market();
        game.heroes[1].influence_tokens = 3;
        assert_eq!(
            game.acquire(HeroId::new(1), ids[0]).unwrap().rejection(),
            Some(Rejection::NotActiveHero)
        );
    }
}
