//! Dark arts events

use crate::core::{GameHook, HazardDef, Source};
use crate::game::GameState;
use crate::Result;

fn hurt(game: &mut GameState, hero: crate::core::HeroId, amount: i32) -> Result<()> {
    let _ = game.add_hearts(hero, -amount, Source::Hazard)?;
    Ok(())
}

pub fn flipendo() -> HazardDef {
    HazardDef::new(
        "Flipendo",
        GameHook::new(|game| {
            let hero = game.active_hero();
            hurt(game, hero, 1)?;
            let hand = game.hero(hero)?.zones.hand.cards.clone();
            if let Some(card) = game.choose_cards(hero, "Flipendo: discard a card", &hand, 1)?.first().copied() {
                let _ = game.discard_card(hero, card, true)?;
            }
            Ok(())
        }),
    )
    .with_text("The active hero loses 1 heart and discards a card.")
}

pub fn expulso() -> HazardDef {
    HazardDef::new(
        "Expulso",
        GameHook::new(|game| {
            let hero = game.active_hero();
            hurt(game, hero, 2)
        }),
    )
    .with_text("The active hero loses 2 hearts.")
}

pub fn petrification() -> HazardDef {
    HazardDef::new(
        "Petrification",
        GameHook::new(|game| {
            game.for_each_hero(|game, hero| game.disallow_drawing_this_turn(hero))?;
            for hero in game.hero_ids() {
                hurt(game, hero, 1)?;
            }
            Ok(())
        }),
    )
    .with_text("All heroes lose 1 heart. No one may draw cards this turn.")
}

pub fn morsmordre() -> HazardDef {
    HazardDef::new(
        "Morsmordre",
        GameHook::new(|game| {
            for hero in game.hero_ids() {
                hurt(game, hero, 1)?;
            }
            let _ = game.add_control(1, Source::Hazard)?;
            Ok(())
        }),
    )
    .with_text("All heroes lose 1 heart. Add 1 control to the location.")
}

/// Chains into another event once control is high
pub fn he_who_must_not_be_named() -> HazardDef {
    HazardDef::new(
        "He Who Must Not Be Named",
        GameHook::new(|game| {
            let _ = game.add_control(1, Source::Hazard)?;
            let location = game.location();
            if location.control() * 2 >= location.max_control() {
                let _ = game.reveal_hazard()?;
            }
            Ok(())
        }),
    )
    .with_text("Add 1 control. If the location is at least half controlled, reveal another event.")
}

pub fn obliviate() -> HazardDef {
    HazardDef::new(
        "Obliviate",
        GameHook::new(|game| {
            for hero in game.hero_ids() {
                let hand = game.hero(hero)?.zones.hand.cards.clone();
                if hand.is_empty() {
                    hurt(game, hero, 2)?;
                    continue;
                }
                let options = ["Discard a spell".to_string(), "Lose 2 hearts".to_string()];
                let spells: Vec<_> = hand
                    .iter()
                    .copied()
                    .filter(|&c| game.card(c).map(|card| card.is_spell()).unwrap_or(false))
                    .collect();
                if spells.is_empty() || game.choose(hero, "Obliviate", &options)? == 1 {
                    hurt(game, hero, 2)?;
                } else if let Some(card) = game.choose_cards(hero, "Discard a spell", &spells, 1)?.first().copied() {
                    let _ = game.discard_card(hero, card, true)?;
                }
            }
            Ok(())
        }),
    )
    .with_text("Each hero discards a spell or loses 2 hearts.")
}

pub fn hazard_deck() -> Vec<(HazardDef, usize)> {
    vec![
        (flipendo(), 2),
        (expulso(), 3),
        (petrification(), 2),
        (morsmordre(), 2),
        (he_who_must_not_be_named(), 3),
        (obliviate(), 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HeroId;
    use crate::game::state::test_support::*;

    #[test]
    fn test_petrification_blocks_draws_for_the_turn() {
        let mut game = bare_game();
        game.hazards.add(&petrification());
        stack_deck(&mut game, HeroId::new(0), "Alohomora");

        game.reveal_hazard().unwrap();
        assert_eq!(game.heroes[0].hearts, 9);
        assert_eq!(game.heroes[1].hearts, 9);
        assert!(game.draw(HeroId::new(0), 1, false).unwrap().is_rejected());

        for hero in game.heroes.iter_mut() {
            hero.end_turn();
        }
        assert!(game.draw(HeroId::new(0), 1, false).unwrap().is_done());
    }

    #[test]
    fn test_morsmordre_adds_control() {
        let mut game = bare_game();
        game.hazards.add(&morsmordre());
        game.reveal_hazard().unwrap();
        assert_eq!(game.location().control(), 1);
    }

    #[test]
    fn test_he_who_must_not_be_named_chains() {
        let mut game = bare_game();
        game.hazards.add(&he_who_must_not_be_named());
        game.hazards.add(&he_who_must_not_be_named());
        game.add_control(1, Source::Rule).unwrap().done().unwrap();

        // First reveal pushes control to 2 of 3 and chains into the second
        game.reveal_hazard().unwrap();
        assert_eq!(game.location().control(), 3);
        assert_eq!(game.hazards().discarded(), 2);
    }
}
