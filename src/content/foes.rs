//! Villains and creatures

use crate::core::{FoeDef, FoeHook, FoeId, FoeKind, HeroHook, Source, VulnerabilityHook};
use crate::game::{GameEvent, ListenerFn, ListenerId, TriggerKind};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Listener handles keyed by foe instance, shared by one definition's hooks
type OwnedListeners = Rc<RefCell<FxHashMap<FoeId, ListenerId>>>;

/// Cleanup hook that drops the listener this foe registered on reveal
fn release_listener(owned: &OwnedListeners) -> FoeHook {
    let owned = owned.clone();
    FoeHook::new(move |game, foe| {
        let id = owned.borrow_mut().remove(&foe);
        if let Some(id) = id {
            game.unregister_listener(id);
        }
        Ok(())
    })
}

fn hurt_active(amount: i32, foe: FoeId, game: &mut crate::game::GameState) -> crate::Result<()> {
    let hero = game.active_hero();
    let _ = game.add_hearts(hero, -amount, Source::Foe(foe))?;
    Ok(())
}

pub fn quirinus_quirrell() -> FoeDef {
    FoeDef::new("Quirinus Quirrell", FoeKind::Villain, 6, 0)
        .with_text("The active hero loses 1 heart.")
        .with_effect(FoeHook::new(|game, foe| hurt_active(1, foe, game)))
        .with_reward(HeroHook::new(|game, _| {
            for hero in game.hero_ids() {
                let _ = game.add_hearts(hero, 1, Source::Rule)?;
            }
            Ok(())
        }))
}

/// Listens for discards while in play; the cleanup hook removes the listener
pub fn crabbe_and_goyle() -> FoeDef {
    let owned = OwnedListeners::default();
    let on_reveal = owned.clone();
    FoeDef::new("Crabbe & Goyle", FoeKind::Villain, 5, 0)
        .with_text("Each time a hero discards a card, that hero loses 1 heart.")
        .with_effect(FoeHook::new(|game, foe| {
            let hero = game.active_hero();
            let hand = game.hero(hero)?.zones.hand.cards.clone();
            if !hand.is_empty() {
                let picked = game.choose_cards(hero, "Crabbe & Goyle: discard a card", &hand, 1)?;
                for card in picked {
                    let _ = game.discard_card(hero, card, true)?;
                }
            }
            game.logger.verbose(&format!("{} forced a discard", game.foe_name(foe)));
            Ok(())
        }))
        .with_on_reveal(FoeHook::new(move |game, foe| {
            let id = game.register_listener(
                TriggerKind::Discard,
                ListenerFn::new(move |game, event| {
                    if let GameEvent::Discard { hero, .. } = *event {
                        let _ = game.add_hearts(hero, -1, Source::Foe(foe))?;
                    }
                    Ok(())
                }),
            );
            on_reveal.borrow_mut().insert(foe, id);
            Ok(())
        }))
        .with_cleanup(release_listener(&owned))
        .with_reward(HeroHook::new(|game, hero| {
            let _ = game.add_influence(hero, 1, Source::Rule)?;
            let _ = game.draw(hero, 1, false)?;
            Ok(())
        }))
}

pub fn draco_malfoy() -> FoeDef {
    let owned = OwnedListeners::default();
    let on_reveal = owned.clone();
    FoeDef::new("Draco Malfoy", FoeKind::Villain, 6, 0)
        .with_text("Each time control is added to the location, the active hero loses 2 hearts.")
        .with_effect(FoeHook::new(|_, _| Ok(())))
        .with_on_reveal(FoeHook::new(move |game, foe| {
            let id = game.register_listener(
                TriggerKind::ControlChanged,
                ListenerFn::new(move |game, event| {
                    if let GameEvent::ControlChanged { delta, .. } = *event {
                        if delta > 0 {
                            hurt_active(2, foe, game)?;
                        }
                    }
                    Ok(())
                }),
            );
            on_reveal.borrow_mut().insert(foe, id);
            Ok(())
        }))
        .with_cleanup(release_listener(&owned))
        .with_reward(HeroHook::new(|game, _| {
            let _ = game.remove_control(1, Source::Rule)?;
            Ok(())
        }))
}

/// Blocks healing for every hero while in play
pub fn dementor() -> FoeDef {
    FoeDef::new("Dementor", FoeKind::Creature, 8, 0)
        .with_text("Heroes cannot gain hearts. The active hero loses 2 hearts.")
        .with_effect(FoeHook::new(|game, foe| hurt_active(2, foe, game)))
        .with_on_reveal(FoeHook::new(|game, _| {
            game.for_each_hero(|game, hero| game.disallow_healing(hero))
        }))
        .with_cleanup(FoeHook::new(|game, _| {
            game.for_each_hero(|game, hero| game.allow_healing(hero))
        }))
        .with_reward(HeroHook::new(|game, hero| {
            let _ = game.add_hearts(hero, 2, Source::Rule)?;
            let _ = game.remove_control(1, Source::Rule)?;
            Ok(())
        }))
}

pub fn cornish_pixies() -> FoeDef {
    FoeDef::new("Cornish Pixies", FoeKind::Creature, 0, 4)
        .with_text("The active hero loses 1 heart for each card with a cost in hand.")
        .with_effect(FoeHook::new(|game, foe| {
            let hero = game.active_hero();
            let priced = game
                .hero(hero)?
                .zones
                .hand
                .iter()
                .filter(|&c| game.card(c).map(|card| card.cost > 0).unwrap_or(false))
                .count() as i32;
            if priced > 0 {
                hurt_active(priced, foe, game)?;
            }
            Ok(())
        }))
        .with_reward(HeroHook::new(|game, hero| {
            let _ = game.add_hearts(hero, 2, Source::Rule)?;
            Ok(())
        }))
}

pub fn troll() -> FoeDef {
    FoeDef::new("Troll", FoeKind::VillainCreature, 7, 0)
        .with_damage_cap(1)
        .with_text("Can only take 1 damage each turn. The active hero loses 2 hearts.")
        .with_effect(FoeHook::new(|game, foe| hurt_active(2, foe, game)))
        .with_reward(HeroHook::new(|game, _| {
            let _ = game.remove_control(1, Source::Rule)?;
            Ok(())
        }))
}

/// Can only be hurt once every other foe is gone
pub fn lord_voldemort() -> FoeDef {
    FoeDef::new("Lord Voldemort", FoeKind::Villain, 10, 0)
        .with_text("Cannot be assigned damage until every other foe is defeated. The active hero loses 1 heart and discards a card.")
        .with_vulnerability(VulnerabilityHook::new(|game, me| {
            game.undrawn_foes() == 0 && game.active_foes().iter().all(|&id| id == me)
        }))
        .with_effect(FoeHook::new(|game, foe| {
            hurt_active(1, foe, game)?;
            let hero = game.active_hero();
            let hand = game.hero(hero)?.zones.hand.cards.clone();
            if let Some(card) = game.choose_cards(hero, "Discard a card", &hand, 1)?.first().copied() {
                let _ = game.discard_card(hero, card, true)?;
            }
            Ok(())
        }))
        .with_reward(HeroHook::new(|_, _| Ok(())))
}

/// Foes in reveal order, boss last
pub fn roster() -> Vec<FoeDef> {
    vec![
        draco_malfoy(),
        quirinus_quirrell(),
        cornish_pixies(),
        crabbe_and_goyle(),
        troll(),
        dementor(),
        lord_voldemort(),
    ]
}
