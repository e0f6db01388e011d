//! Hero cards: starting decks and the market

use crate::core::{Capability, CardDef, CardHook, CardKind, HeroHook, HeroId, Source};
use crate::game::{DeckEntry, GameState, ListenerFn, TriggerKind};
use crate::Result;

fn influence(name: &'static str, kind: CardKind, cost: u32, amount: i32) -> CardDef {
    CardDef::new(name, kind, cost)
        .with_text(format!("Gain {amount} influence."))
        .with_effect(CardHook::new(move |game, hero, source| {
            let _ = game.add_influence(hero, amount, source)?;
            Ok(())
        }))
}

fn damage(name: &'static str, kind: CardKind, cost: u32, amount: i32) -> CardDef {
    CardDef::new(name, kind, cost)
        .with_text(format!("Gain {amount} damage."))
        .with_effect(CardHook::new(move |game, hero, source| {
            let _ = game.add_damage(hero, amount, source)?;
            Ok(())
        }))
}

/// Let the hero pick another hero; skips the question with one hero
fn choose_hero(game: &mut GameState, hero: HeroId, prompt: &str) -> Result<HeroId> {
    let ids = game.hero_ids();
    let labels: Vec<String> = ids.iter().map(|&id| game.hero_name(id)).collect();
    let idx = game.choose(hero, prompt, &labels)?;
    Ok(ids[idx])
}

pub fn alohomora() -> CardDef {
    influence("Alohomora", CardKind::Spell, 0, 1)
}

pub fn wand() -> CardDef {
    damage("Wand", CardKind::Item, 0, 1)
}

pub fn firebolt() -> CardDef {
    CardDef::new("Firebolt", CardKind::Item, 0)
        .with_text("Gain 1 damage. If you defeat a villain this turn, gain 1 influence.")
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_damage(hero, 1, source)?;
            game.add_extra_foe_reward(
                hero,
                HeroHook::new(|game, hero| {
                    let _ = game.add_influence(hero, 1, Source::Rule)?;
                    Ok(())
                }),
            )?;
            Ok(())
        }))
}

pub fn invisibility_cloak() -> CardDef {
    CardDef::new("Invisibility Cloak", CardKind::Item, 0)
        .with_text("Gain 1 influence. While this is in your hand, you lose at most 1 heart from each effect.")
        .with_capability(Capability::DamageMitigation)
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_influence(hero, 1, source)?;
            Ok(())
        }))
}

pub fn time_turner() -> CardDef {
    CardDef::new("Time Turner", CardKind::Item, 0)
        .with_text("Gain 1 influence and draw a card.")
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_influence(hero, 1, source)?;
            let _ = game.draw(hero, 1, false)?;
            Ok(())
        }))
}

pub fn hedwig() -> CardDef {
    CardDef::new("Hedwig", CardKind::Ally, 0)
        .with_text("Choose one: gain 1 damage, or gain 2 hearts.")
        .with_effect(CardHook::new(|game, hero, source| {
            let options = ["Gain 1 damage".to_string(), "Gain 2 hearts".to_string()];
            match game.choose(hero, "Hedwig", &options)? {
                0 => {
                    let _ = game.add_damage(hero, 1, source)?;
                }
                _ => {
                    let _ = game.add_hearts(hero, 2, source)?;
                }
            }
            Ok(())
        }))
}

pub fn incendio() -> CardDef {
    CardDef::new("Incendio", CardKind::Spell, 4)
        .with_text("Gain 1 damage and draw a card.")
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_damage(hero, 1, source)?;
            let _ = game.draw(hero, 1, false)?;
            Ok(())
        }))
}

pub fn essence_of_dittany() -> CardDef {
    CardDef::new("Essence of Dittany", CardKind::Item, 2)
        .with_text("Any one hero gains 2 hearts.")
        .with_effect(CardHook::new(|game, hero, source| {
            let target = choose_hero(game, hero, "Who gains 2 hearts?")?;
            let _ = game.add_hearts(target, 2, source)?;
            Ok(())
        }))
}

pub fn ron_weasley() -> CardDef {
    CardDef::new("Ron Weasley", CardKind::Ally, 3)
        .with_text("Gain 2 damage. Each time you play a spell this turn, gain 1 influence.")
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_damage(hero, 2, source)?;
            let _ = game.register_hero_listener(
                TriggerKind::CardPlayed,
                hero,
                ListenerFn::new(move |game, event| {
                    if let crate::game::GameEvent::CardPlayed { hero, card } = *event {
                        if game.card(card)?.is_spell() {
                            let _ = game.add_influence(hero, 1, source)?;
                        }
                    }
                    Ok(())
                }),
            );
            Ok(())
        }))
}

pub fn expelliarmus() -> CardDef {
    CardDef::new("Expelliarmus", CardKind::Spell, 6)
        .with_text("Gain 2 damage and draw a card.")
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_damage(hero, 2, source)?;
            let _ = game.draw(hero, 1, false)?;
            Ok(())
        }))
}

pub fn sorting_hat() -> CardDef {
    influence("Sorting Hat", CardKind::Item, 4, 2)
}

pub fn petrificus_totalus() -> CardDef {
    CardDef::new("Petrificus Totalus", CardKind::Spell, 6)
        .with_text("Gain 1 damage. Stun a villain.")
        .with_effect(CardHook::new(|game, hero, source| {
            let _ = game.add_damage(hero, 1, source)?;
            let foes: Vec<_> = game.active_foes().to_vec();
            if !foes.is_empty() {
                let labels: Vec<String> = foes.iter().map(|&f| game.foe_name(f)).collect();
                let idx = game.choose(hero, "Stun which foe?", &labels)?;
                let _ = game.stun_foe(foes[idx], hero)?;
            }
            Ok(())
        }))
}

pub fn remembrall() -> CardDef {
    influence("Remembrall", CardKind::Item, 4, 1)
        .with_text("Gain 1 influence. If you discard this, gain 2 influence.")
        .with_discard_effect(HeroHook::new(|game, hero| {
            let _ = game.add_influence(hero, 2, Source::Rule)?;
            Ok(())
        }))
}

/// Seven Alohomoras plus three signature cards
pub fn starting_deck(signature: &[CardDef]) -> Vec<DeckEntry> {
    let mut deck = vec![DeckEntry::new(alohomora(), 7)];
    deck.extend(signature.iter().cloned().map(|def| DeckEntry::new(def, 1)));
    deck
}

pub fn market() -> Vec<DeckEntry> {
    vec![
        DeckEntry::new(incendio(), 4),
        DeckEntry::new(essence_of_dittany(), 4),
        DeckEntry::new(ron_weasley(), 1),
        DeckEntry::new(expelliarmus(), 2),
        DeckEntry::new(sorting_hat(), 1),
        DeckEntry::new(petrificus_totalus(), 2),
        DeckEntry::new(remembrall(), 1),
    ]
}
