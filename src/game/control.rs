//! The control track on the current location stage

use crate::core::{Advance, Source};
use crate::game::events::GameEvent;
use crate::game::{Change, GameState, Outcome, Rejection};
use crate::Result;

impl GameState {
    /// Change control on the current stage by `amount`, clamped to the
    /// stage bounds
    ///
    /// Removal is rejected while any effect blocks it. `ControlChanged`
    /// fires with the applied delta only when something actually changed.
    pub fn add_control(&mut self, amount: i32, source: Source) -> Result<Outcome<Change>> {
        if amount < 0 && self.location.is_removal_blocked() {
            return Ok(self.reject(&format!("remove {} control", -amount), Rejection::ControlRemovalBlocked));
        }

        let delta = self.location.apply_delta(amount);
        let total = self.location.control();
        if delta == 0 {
            return Ok(Outcome::Done(Change::none(total)));
        }

        self.logger.normal(&format!(
            "Control {:+} on {} ({}/{})",
            delta,
            self.location.current().name,
            total,
            self.location.max_control()
        ));
        self.fire(GameEvent::ControlChanged { delta, total, source })?;
        Ok(Outcome::Done(Change { delta, total }))
    }

    pub fn remove_control(&mut self, amount: u32, source: Source) -> Result<Outcome<Change>> {
        self.add_control(-(amount as i32), source)
    }

    /// Move past a cleared stage, revealing the next one
    ///
    /// Clearing the final stage marks the game as lost.
    pub fn resolve_location(&mut self) -> Result<Advance> {
        let cleared = self.location.current().name.clone();
        let advance = self.location.advance();
        match advance {
            Advance::Stay => {}
            Advance::Moved => {
                let stage = self.location.current();
                self.logger
                    .normal(&format!("{} is lost; the heroes move on to {}", cleared, stage.name));
                if let Some(hook) = stage.on_reveal.clone() {
                    self.nested(|game| (hook.get())(game))?;
                }
            }
            Advance::Exhausted => {
                self.logger.normal(&format!("{cleared} is lost and there is nowhere left to go"));
                self.location_lost = true;
            }
        }
        Ok(advance)
    }

    /// Has the final stage been lost?
    pub fn is_location_lost(&self) -> bool {
        self.location_lost
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{Advance, GameHook, Source};
    use crate::game::events::{GameEvent, ListenerFn, TriggerKind};
    use crate::game::state::test_support::*;
    use crate::game::Rejection;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_control_clamps_and_reports_applied_delta() {
        let mut game = bare_game();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        game.register_listener(
            TriggerKind::ControlChanged,
            ListenerFn::new(move |_, event| {
                if let GameEvent::ControlChanged { delta, .. } = event {
                    s.borrow_mut().push(*delta);
                }
                Ok(())
            }),
        );

        game.add_control(2, Source::Hazard).unwrap().done().unwrap();
        let change = game.add_control(5, Source::Hazard).unwrap().done().unwrap();
        assert_eq!(change.delta, 1);
        assert_eq!(change.total, 3);
        game.remove_control(10, Source::Rule).unwrap().done().unwrap();
        // Nothing applied, nothing fired
        game.remove_control(1, Source::Rule).unwrap().done().unwrap();

        assert_eq!(*seen.borrow(), vec![2, 1, -3]);
    }

    #[test]
    fn test_removal_block() {
        let mut game = bare_game();
        game.add_control(2, Source::Hazard).unwrap().done().unwrap();
        game.block_control_removal();

        let outcome = game.remove_control(1, Source::Rule).unwrap();
        assert_eq!(outcome.rejection(), Some(Rejection::ControlRemovalBlocked));
        assert_eq!(game.location.control(), 2);
        // Adding is still fine
        assert!(game.add_control(1, Source::Hazard).unwrap().is_done());

        game.release_control_removal_block();
        assert!(game.remove_control(1, Source::Rule).unwrap().is_done());
    }

    #[test]
    fn test_stage_advance_runs_reveal_hook() {
        let mut game = bare_game();
        let revealed = Rc::new(RefCell::new(false));
        let r = revealed.clone();
        game.location.stages_mut()[1].on_reveal = Some(GameHook::new(move |_| {
            *r.borrow_mut() = true;
            Ok(())
        }));

        assert_eq!(game.resolve_location().unwrap(), Advance::Stay);
        game.add_control(3, Source::Hazard).unwrap().done().unwrap();
        assert_eq!(game.resolve_location().unwrap(), Advance::Moved);
        assert!(*revealed.borrow());
        assert_eq!(game.location.control(), 0);
        assert!(!game.is_location_lost());
    }

    #[test]
    fn test_final_stage_loss() {
        let mut game = bare_game();
        for _ in 0..2 {
            let max = game.location.max_control() as i32;
            game.add_control(max, Source::Hazard).unwrap().done().unwrap();
            assert_eq!(game.resolve_location().unwrap(), Advance::Moved);
        }
        game.add_control(4, Source::Hazard).unwrap().done().unwrap();
        assert_eq!(game.resolve_location().unwrap(), Advance::Exhausted);
        assert!(game.is_location_lost());
    }
}
