//! Rule invariants exercised through the public engine API

use hogwarts_engine::content::cards;
use hogwarts_engine::core::{
    AssignHook, CardDef, CardHook, CardKind, FoeDef, FoeHook, FoeKind, HeroHook, HeroId, Source, Stage,
};
use hogwarts_engine::game::{
    DeckEntry, FoeHit, GameConfig, GameEvent, GameInitializer, GameLoop, GameSetup, GameState, HeroSetup,
    ListenerFn, ListenerId, Outcome, Rejection, TriggerKind, ZeroController,
};
use hogwarts_engine::GameError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const HARRY: HeroId = HeroId::new(0);
const RON: HeroId = HeroId::new(1);

fn blank(name: &str) -> CardDef {
    CardDef::new(name, CardKind::Spell, 0).with_effect(CardHook::new(|_, _, _| Ok(())))
}

fn passive_foe(name: &str, health: u32, rewards: Rc<Cell<u32>>) -> FoeDef {
    FoeDef::new(name, FoeKind::Villain, health, 0)
        .with_effect(FoeHook::new(|_, _| Ok(())))
        .with_reward(HeroHook::new(move |_, _| {
            rewards.set(rewards.get() + 1);
            Ok(())
        }))
}

/// Heroes with ten-card decks of `card`, facing `foes`, one quiet stage
fn build(heroes: &[&str], card: CardDef, foes: Vec<FoeDef>) -> GameState {
    let setup = GameSetup {
        config: GameConfig::default().captured().with_seed(1),
        heroes: heroes
            .iter()
            .map(|name| HeroSetup {
                name: name.to_string(),
                deck: vec![DeckEntry::new(card.clone(), 10)],
            })
            .collect(),
        foes,
        hazards: Vec::new(),
        market: Vec::new(),
        stages: vec![Stage::new("Diagon Alley", 4, 1)],
    };
    GameInitializer::new(setup)
        .init_game(Rc::new(RefCell::new(ZeroController::new())))
        .unwrap()
}

fn one_foe() -> Vec<FoeDef> {
    vec![passive_foe("Draco Malfoy", 6, Rc::new(Cell::new(0)))]
}

fn hand(game: &GameState, hero: HeroId) -> Vec<hogwarts_engine::core::CardId> {
    game.hero(hero).unwrap().zones.hand.cards.clone()
}

fn count_events(game: &mut GameState, kind: TriggerKind) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    game.register_listener(
        kind,
        ListenerFn::new(move |_, _| {
            c.set(c.get() + 1);
            Ok(())
        }),
    );
    count
}

#[test]
fn hearts_stay_within_bounds() {
    let mut game = build(&["Harry", "Ron"], blank("Alohomora"), one_foe());
    let mut rng = ChaCha12Rng::seed_from_u64(2024);

    for _ in 0..500 {
        let hero = if rng.gen_bool(0.5) { HARRY } else { RON };
        let delta = rng.gen_range(-12..=12);
        let _ = game.add_hearts(hero, delta, Source::Hazard).unwrap();
        for h in game.heroes() {
            assert!(h.hearts <= h.max_hearts);
            assert_eq!(h.is_stunned(), h.hearts == 0);
        }
        if rng.gen_bool(0.1) {
            game.recover_stunned_heroes();
        }
    }
}

#[test]
fn tokens_clamp_at_zero() {
    let mut game = build(&["Harry"], blank("Alohomora"), one_foe());
    let mut rng = ChaCha12Rng::seed_from_u64(7);
    for _ in 0..200 {
        let delta = rng.gen_range(-5..=5);
        let before = game.hero(HARRY).unwrap().damage_tokens as i32;
        let change = game.add_damage(HARRY, delta, Source::Rule).unwrap().done().unwrap();
        assert_eq!(change.total as i32, (before + delta).max(0));
        assert_eq!(change.delta, change.total as i32 - before);
    }
}

#[test]
fn stun_is_applied_all_at_once() {
    let mut game = build(&["Harry"], cards::wand(), one_foe());
    for card in hand(&game, HARRY).into_iter().take(2) {
        game.play_card(HARRY, card).unwrap().done().unwrap();
    }
    assert_eq!(game.hero(HARRY).unwrap().damage_tokens, 2);
    assert_eq!(hand(&game, HARRY).len(), 3);

    let discards = count_events(&mut game, TriggerKind::Discard);
    let control_changes = count_events(&mut game, TriggerKind::ControlChanged);

    let change = game.add_hearts(HARRY, -25, Source::Hazard).unwrap().done().unwrap();
    assert_eq!(change.delta, -10);
    assert_eq!(change.total, 0);

    let h = game.hero(HARRY).unwrap();
    assert!(h.is_stunned());
    assert_eq!((h.damage_tokens, h.influence_tokens), (0, 0));
    assert_eq!(h.zones.hand.len(), 2);
    assert_eq!(game.location().control(), 1);
    assert_eq!(discards.get(), 1);
    assert_eq!(control_changes.get(), 1);

    // Stunned heroes ignore further changes
    assert_eq!(
        game.add_hearts(HARRY, -1, Source::Hazard).unwrap(),
        Outcome::Rejected(Rejection::HeroStunned)
    );
    assert_eq!(game.location().control(), 1);
}

#[test]
fn overkill_reports_the_applied_delta() {
    let mut game = build(&["Harry"], blank("Alohomora"), one_foe());
    game.add_hearts(HARRY, -7, Source::Hazard).unwrap().done().unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    game.register_listener(
        TriggerKind::HeartsChanged,
        ListenerFn::new(move |_, event| {
            if let GameEvent::HeartsChanged(change) = *event {
                s.borrow_mut().push((change.delta, change.total));
            }
            Ok(())
        }),
    );

    game.add_hearts(HARRY, -10, Source::Hazard).unwrap().done().unwrap();
    assert_eq!(*seen.borrow(), vec![(-3, 0)]);
    assert!(game.hero(HARRY).unwrap().is_stunned());
}

#[test]
fn blocked_heal_changes_nothing() {
    let mut game = build(&["Harry"], blank("Alohomora"), one_foe());
    game.add_hearts(HARRY, -4, Source::Hazard).unwrap().done().unwrap();
    let heals = count_events(&mut game, TriggerKind::HeartsChanged);

    game.disallow_healing(HARRY).unwrap();
    assert_eq!(
        game.add_hearts(HARRY, 2, Source::Rule).unwrap(),
        Outcome::Rejected(Rejection::HealingBlocked)
    );
    assert_eq!(game.hero(HARRY).unwrap().hearts, 6);
    assert_eq!(heals.get(), 0);

    game.allow_healing(HARRY).unwrap();
    game.add_hearts(HARRY, 2, Source::Rule).unwrap().done().unwrap();
    assert_eq!(game.hero(HARRY).unwrap().hearts, 8);
    assert_eq!(heals.get(), 1);
}

#[test]
fn defeat_after_three_damage_pays_once() {
    let rewards = Rc::new(Cell::new(0));
    let mut game = build(
        &["Harry"],
        cards::wand(),
        vec![passive_foe("Quirinus Quirrell", 3, rewards.clone())],
    );
    let foe = game.active_foes()[0];
    for card in hand(&game, HARRY) {
        game.play_card(HARRY, card).unwrap().done().unwrap();
    }
    assert_eq!(game.hero(HARRY).unwrap().damage_tokens, 5);

    let hits: Vec<_> = (0..3)
        .map(|_| game.assign_damage(HARRY, foe).unwrap().done().unwrap())
        .collect();
    assert_eq!(hits, vec![FoeHit::Damaged, FoeHit::Damaged, FoeHit::Defeated]);
    assert_eq!(rewards.get(), 1);
    assert_eq!(game.defeated_foes(), &[foe]);
    assert!(game.all_foes_defeated());

    assert_eq!(
        game.assign_damage(HARRY, foe).unwrap(),
        Outcome::Rejected(Rejection::FoeNotActive)
    );
    assert_eq!(game.hero(HARRY).unwrap().damage_tokens, 2);
    assert_eq!(rewards.get(), 1);
}

#[test]
fn direct_damage_is_clamped_and_defeats_once() {
    let rewards = Rc::new(Cell::new(0));
    let mut game = build(&["Harry"], blank("Alohomora"), vec![passive_foe("Troll", 3, rewards.clone())]);
    let foe = game.active_foes()[0];

    let dealt = Rc::new(Cell::new(0));
    let d = dealt.clone();
    game.register_listener(
        TriggerKind::DamageDealt,
        ListenerFn::new(move |_, event| {
            if let GameEvent::DamageDealt { amount, .. } = *event {
                d.set(d.get() + amount);
            }
            Ok(())
        }),
    );

    assert_eq!(game.damage_foe(HARRY, foe, 10).unwrap(), Outcome::Done(FoeHit::Defeated));
    assert_eq!(dealt.get(), 3);
    assert_eq!(game.foe(foe).unwrap().damage.accumulated, 3);
    assert!(game.damage_foe(HARRY, foe, 1).unwrap().is_rejected());
    assert_eq!(rewards.get(), 1);

    assert!(matches!(
        game.damage_foe(HARRY, foe, 0),
        Err(GameError::ZeroAmount { .. })
    ));
}

#[test]
fn drawing_past_the_deck_shuffles_the_discard() {
    let mut game = build(&["Harry"], blank("Alohomora"), one_foe());
    let shuffles = count_events(&mut game, TriggerKind::Shuffle);
    for card in hand(&game, HARRY).into_iter().take(3) {
        game.discard_card(HARRY, card, false).unwrap().done().unwrap();
    }
    {
        let zones = &game.hero(HARRY).unwrap().zones;
        assert_eq!((zones.deck.len(), zones.discard.len(), zones.hand.len()), (5, 3, 2));
    }

    // Deck 5 + discard 3: asking for 7 draws 7 with a single shuffle
    assert_eq!(game.draw(HARRY, 7, false).unwrap(), Outcome::Done(7));
    assert_eq!(shuffles.get(), 1);
    let zones = &game.hero(HARRY).unwrap().zones;
    assert_eq!((zones.deck.len(), zones.discard.len(), zones.hand.len()), (1, 0, 9));
    assert_eq!(zones.total_cards(), 10);

    // Only one card left anywhere: the draw comes up short without error
    assert_eq!(game.draw(HARRY, 3, false).unwrap(), Outcome::Done(1));
    assert_eq!(game.hero(HARRY).unwrap().zones.hand.len(), 10);
}

#[test]
fn listeners_run_in_order_and_removal_mid_dispatch_is_honored() {
    let mut game = build(&["Harry"], blank("Alohomora"), one_foe());
    let order = Rc::new(RefCell::new(Vec::new()));
    let second: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

    let (o, s) = (order.clone(), second.clone());
    game.register_listener(
        TriggerKind::ControlChanged,
        ListenerFn::new(move |game, _| {
            o.borrow_mut().push(1);
            if let Some(id) = s.get() {
                game.unregister_listener(id);
            }
            Ok(())
        }),
    );
    let o = order.clone();
    let id = game.register_listener(
        TriggerKind::ControlChanged,
        ListenerFn::new(move |_, _| {
            o.borrow_mut().push(2);
            Ok(())
        }),
    );
    second.set(Some(id));
    let o = order.clone();
    game.register_listener(
        TriggerKind::ControlChanged,
        ListenerFn::new(move |_, _| {
            o.borrow_mut().push(3);
            Ok(())
        }),
    );

    game.add_control(1, Source::Hazard).unwrap().done().unwrap();
    game.add_control(1, Source::Hazard).unwrap().done().unwrap();
    assert_eq!(*order.borrow(), vec![1, 3, 1, 3]);
}

#[test]
fn runaway_listeners_hit_the_depth_guard() {
    let mut game = build(&["Harry"], blank("Alohomora"), one_foe());
    game.register_listener(
        TriggerKind::HeartsChanged,
        ListenerFn::new(|game, event| {
            if let GameEvent::HeartsChanged(change) = *event {
                let delta = if change.delta > 0 { -1 } else { 1 };
                let _ = game.add_hearts(change.hero, delta, Source::Rule)?;
            }
            Ok(())
        }),
    );
    let result = game.add_hearts(HARRY, -1, Source::Hazard);
    assert!(matches!(result, Err(GameError::CallbackDepthExceeded(_))));
}

#[test]
fn turn_scoped_listeners_expire_in_cleanup() {
    let mut game = build(&["Harry", "Ron"], blank("Alohomora"), one_foe());
    let played = count_events(&mut game, TriggerKind::CardPlayed);
    let discards = count_events(&mut game, TriggerKind::Discard);

    let card = hand(&game, HARRY)[0];
    game.play_card(HARRY, card).unwrap().done().unwrap();
    assert_eq!(played.get(), 1);

    GameLoop::new(&mut game).cleanup_phase(HARRY).unwrap();

    let card = hand(&game, HARRY)[0];
    game.play_card(HARRY, card).unwrap().done().unwrap();
    assert_eq!(played.get(), 1);

    // Persistent listeners survive the same cleanup
    let card = hand(&game, HARRY)[0];
    game.discard_card(HARRY, card, true).unwrap().done().unwrap();
    assert_eq!(discards.get(), 1);
}

#[test]
fn extra_influence_effects_see_the_applied_amount() {
    let mut game = build(
        &["Harry"],
        blank("Alohomora"),
        vec![FoeDef::new("Cornish Pixies", FoeKind::Creature, 0, 4)
            .with_effect(FoeHook::new(|_, _| Ok(())))
            .with_reward(HeroHook::new(|_, _| Ok(())))],
    );
    let foe = game.active_foes()[0];
    let amounts = Rc::new(RefCell::new(Vec::new()));
    let a = amounts.clone();
    game.add_extra_influence_effect(
        HARRY,
        AssignHook::new(move |_, _, _, amount| {
            a.borrow_mut().push(amount);
            Ok(())
        }),
    ).unwrap();

    game.influence_foe(HARRY, foe, 1).unwrap().done().unwrap();
    game.influence_foe(HARRY, foe, 9).unwrap().done().unwrap();
    assert_eq!(*amounts.borrow(), vec![1, 3]);
}

#[test]
fn out_of_turn_gain_needs_a_grant() {
    let mut game = build(&["Harry", "Ron"], blank("Alohomora"), one_foe());
    assert_eq!(
        game.add_influence(RON, 1, Source::Rule).unwrap(),
        Outcome::Rejected(Rejection::OutOfTurnGain)
    );
    game.allow_gain_out_of_turn(RON).unwrap();
    assert!(game.add_influence(RON, 1, Source::Rule).unwrap().is_done());
    assert_eq!(game.hero(RON).unwrap().influence_tokens, 1);
}
