//! End-to-end games with the starter content

use hogwarts_engine::content;
use hogwarts_engine::game::{
    DecisionMaker, GameConfig, GameInitializer, GameLoop, GameOutcome, GameSnapshot, GameState, RandomController,
    ScriptedController, TurnPhase, ZeroController,
};
use hogwarts_engine::GameError;
use similar_asserts::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

fn starter_game(heroes: usize, seed: u64, decider: Rc<RefCell<dyn DecisionMaker>>) -> GameState {
    let setup = content::starter_setup(heroes, GameConfig::default().captured().with_seed(seed)).unwrap();
    GameInitializer::new(setup).init_game(decider).unwrap()
}

fn play_to_end(seed: u64) -> (GameOutcome, u32, GameSnapshot) {
    let mut game = starter_game(3, seed, Rc::new(RefCell::new(RandomController::with_seed(seed))));
    let result = GameLoop::new(&mut game).run_game().unwrap();
    (result.outcome, result.turns_played, game.snapshot())
}

#[test]
fn same_seed_same_game() {
    let first = play_to_end(1234);
    let second = play_to_end(1234);
    assert_eq!(first, second);
}

#[test]
fn games_end_consistently() {
    for seed in 0..10 {
        let (outcome, turns, snapshot) = play_to_end(seed);
        assert!(turns > 0);
        for hero in &snapshot.heroes {
            assert!(hero.hearts <= hero.max_hearts);
            assert_eq!(hero.stunned, hero.hearts == 0);
        }
        assert!(snapshot.control.control <= snapshot.control.max_control);
        match outcome {
            GameOutcome::Won => {
                assert!(snapshot.active_foes.is_empty());
                assert_eq!(snapshot.undrawn_foes, 0);
                assert_eq!(snapshot.defeated_foes, content::foes::roster().len());
            }
            GameOutcome::Lost => {
                assert_eq!(snapshot.control.stage_number, snapshot.control.stage_count);
            }
            GameOutcome::TurnLimit => assert_eq!(turns, GameConfig::default().max_turns),
        }
    }
}

#[test]
fn zero_decider_game_runs_to_an_outcome() {
    let mut game = starter_game(2, 8, Rc::new(RefCell::new(ZeroController::new())));
    let result = GameLoop::new(&mut game).with_max_turns(60).run_game().unwrap();
    assert!(result.turns_played <= 60);
}

#[test]
fn empty_script_exhausts_choices() {
    let mut game = starter_game(1, 3, Rc::new(RefCell::new(ScriptedController::new(Vec::new()))));
    let err = GameLoop::new(&mut game).run_game().unwrap_err();
    assert!(matches!(err, GameError::ChoiceExhausted { .. }));
}

#[test]
fn opening_snapshot_round_trips_through_json() {
    let game = starter_game(4, 21, Rc::new(RefCell::new(ZeroController::new())));
    let snapshot = game.snapshot();
    assert_eq!(snapshot.turn.number, 1);
    assert_eq!(snapshot.turn.phase, TurnPhase::Hazard);
    assert_eq!(snapshot.heroes.len(), 4);
    assert!(snapshot.heroes.iter().all(|h| h.hand.len() == 5 && h.deck_size == 5));
    assert_eq!(snapshot.market.len(), GameConfig::default().market_size);
    assert_eq!(snapshot.control.stage, "Diagon Alley");

    let json = snapshot.to_json().unwrap();
    assert_eq!(GameSnapshot::from_json(&json).unwrap(), snapshot);
}
