//! Game initialization from card, foe and event lists

use crate::core::{CardDef, FoeDef, HazardDef, HeroId, Stage};
use crate::game::controller::DecisionMaker;
use crate::game::{GameConfig, GameState};
use crate::{GameError, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// `count` copies of one card
#[derive(Debug, Clone)]
pub struct DeckEntry {
    pub def: CardDef,
    pub count: usize,
}

impl DeckEntry {
    pub fn new(def: CardDef, count: usize) -> Self {
        DeckEntry { def, count }
    }
}

/// A hero and their starting deck
#[derive(Debug, Clone)]
pub struct HeroSetup {
    pub name: String,
    pub deck: Vec<DeckEntry>,
}

/// Everything needed to start a game
#[derive(Debug, Clone)]
pub struct GameSetup {
    pub config: GameConfig,
    pub heroes: Vec<HeroSetup>,
    /// Revealed front to back
    pub foes: Vec<FoeDef>,
    pub hazards: Vec<(HazardDef, usize)>,
    pub market: Vec<DeckEntry>,
    pub stages: Vec<Stage>,
}

/// Game builder for initializing games from a setup
pub struct GameInitializer {
    setup: GameSetup,
}

impl GameInitializer {
    pub fn new(setup: GameSetup) -> Self {
        GameInitializer { setup }
    }

    /// Build a ready-to-play game
    ///
    /// Starting decks and the event deck are shuffled, starting hands
    /// drawn, the first foes revealed and the market filled.
    pub fn init_game(self, decider: Rc<RefCell<dyn DecisionMaker>>) -> Result<GameState> {
        let GameSetup {
            config,
            heroes,
            foes,
            hazards,
            market,
            stages,
        } = self.setup;

        if foes.is_empty() {
            return Err(GameError::InvalidSetup("at least one foe is required".to_string()));
        }
        if let Some(foe) = foes.iter().find(|f| f.health == 0 && f.influence == 0) {
            return Err(GameError::InvalidSetup(format!(
                "{} needs a damage or influence threshold",
                foe.name
            )));
        }

        let names: Vec<&str> = heroes.iter().map(|h| h.name.as_str()).collect();
        let hand_size = config.hand_size;
        let mut game = GameState::new(config, &names, stages, decider)?;

        for (idx, hero) in heroes.iter().enumerate() {
            let id = HeroId::new(idx as u32);
            for entry in &hero.deck {
                for _ in 0..entry.count {
                    let card = game.cards.alloc(|card| entry.def.instantiate(card, Some(id)));
                    game.heroes[idx].zones.deck.add(card);
                }
            }
            game.heroes[idx].zones.deck.shuffle(&mut game.rng);
        }

        for def in &foes {
            let foe = game.foes.alloc(|id| def.instantiate(id));
            game.roster.undrawn.push_back(foe);
        }

        for (def, count) in &hazards {
            for _ in 0..*count {
                game.hazards.add(def);
            }
        }
        game.hazards.shuffle(&mut game.rng);

        for entry in &market {
            for _ in 0..entry.count {
                let card = game.cards.alloc(|card| entry.def.instantiate(card, None));
                game.market.supply.add(card);
            }
        }
        game.market.supply.shuffle(&mut game.rng);

        game.logger.normal(&format!(
            "{} heroes face {} foes at {}",
            names.len(),
            foes.len(),
            game.location.current().name
        ));

        if let Some(hook) = game.location.current().on_reveal.clone() {
            (hook.get())(&mut game)?;
        }
        for hero in game.hero_ids() {
            let _drawn = game.draw(hero, hand_size, true)?;
        }
        game.reveal_foes()?;
        game.refill_market();
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardHook, CardKind, FoeHook, FoeKind, GameHook, HeroHook};
    use crate::game::ZeroController;

    fn small_setup() -> GameSetup {
        let spell = CardDef::new("Alohomora", CardKind::Spell, 0).with_effect(CardHook::new(|_, _, _| Ok(())));
        let villain = FoeDef::new("Draco Malfoy", FoeKind::Villain, 6, 0)
            .with_effect(FoeHook::new(|_, _| Ok(())))
            .with_reward(HeroHook::new(|_, _| Ok(())));
        GameSetup {
            config: GameConfig::default().captured().with_seed(3),
            heroes: vec![HeroSetup {
                name: "Harry".to_string(),
                deck: vec![DeckEntry::new(spell.clone(), 10)],
            }],
            foes: vec![villain.clone(), villain],
            hazards: vec![(HazardDef::new("Flipendo", GameHook::new(|_| Ok(()))), 3)],
            market: vec![DeckEntry::new(spell, 8)],
            stages: vec![Stage::new("Diagon Alley", 4, 1)],
        }
    }

    #[test]
    fn test_init_game() {
        let game = GameInitializer::new(small_setup())
            .init_game(Rc::new(RefCell::new(ZeroController::new())))
            .unwrap();

        let harry = &game.heroes()[0];
        assert_eq!(harry.zones.hand.len(), 5);
        assert_eq!(harry.zones.deck.len(), 5);
        assert_eq!(game.active_foes().len(), 1);
        assert_eq!(game.undrawn_foes(), 1);
        assert_eq!(game.hazards().remaining(), 3);
        assert_eq!(game.market().row.len(), 6);
        assert_eq!(game.market().supply.len(), 2);
    }

    #[test]
    fn test_foe_without_thresholds_is_rejected() {
        let mut setup = small_setup();
        setup.foes.push(FoeDef::new("Nobody", FoeKind::Villain, 0, 0));
        let result = GameInitializer::new(setup).init_game(Rc::new(RefCell::new(ZeroController::new())));
        assert!(matches!(result, Err(GameError::InvalidSetup(_))));
    }
}
