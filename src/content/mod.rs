//! Starter content: sample heroes, cards, foes, events and locations
//!
//! Enough to play complete games from the command line and in tests. Every
//! effect goes through the public engine API, the same way any other
//! content set would.

pub mod cards;
pub mod foes;
pub mod hazards;
pub mod locations;

use crate::game::{GameConfig, GameSetup, HeroSetup};
use crate::{GameError, Result};

/// Most heroes the starter set supports
pub const MAX_HEROES: usize = 4;

fn hero(name: &str, signature: &[crate::core::CardDef]) -> HeroSetup {
    HeroSetup {
        name: name.to_string(),
        deck: cards::starting_deck(signature),
    }
}

/// The four starter heroes in turn order
pub fn heroes() -> Vec<HeroSetup> {
    vec![
        hero(
            "Harry",
            &[cards::firebolt(), cards::hedwig(), cards::invisibility_cloak()],
        ),
        hero("Ron", &[cards::wand(), cards::wand(), cards::remembrall()]),
        hero(
            "Hermione",
            &[cards::wand(), cards::time_turner(), cards::time_turner()],
        ),
        hero(
            "Neville",
            &[cards::wand(), cards::essence_of_dittany(), cards::remembrall()],
        ),
    ]
}

/// A complete game for the first `hero_count` starter heroes
pub fn starter_setup(hero_count: usize, config: GameConfig) -> Result<GameSetup> {
    if hero_count == 0 || hero_count > MAX_HEROES {
        return Err(GameError::InvalidSetup(format!(
            "the starter set supports 1 to {MAX_HEROES} heroes, got {hero_count}"
        )));
    }
    let mut heroes = heroes();
    heroes.truncate(hero_count);

    Ok(GameSetup {
        config,
        heroes,
        foes: foes::roster(),
        hazards: hazards::hazard_deck(),
        market: cards::market(),
        stages: locations::stages(),
    })
}
