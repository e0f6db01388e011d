//! Restrictions and grants placed by effects
//!
//! Each call adjusts a ref-count, so two effects restricting the same thing
//! each have to release it before it is allowed again. `*_this_turn`
//! variants expire in cleanup.

use crate::core::{AssignHook, HeroHook, HeroId, HeroPermissions};
use crate::game::GameState;
use crate::Result;

impl GameState {
    fn permissions_of(&mut self, hero: HeroId) -> Result<&mut HeroPermissions> {
        Ok(&mut self.hero_mut(hero)?.permissions)
    }

    pub fn disallow_healing(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.healing.flip();
        Ok(())
    }

    pub fn allow_healing(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.healing.release();
        Ok(())
    }

    pub fn disallow_healing_this_turn(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.healing.flip_this_turn();
        Ok(())
    }

    pub fn disallow_drawing(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.drawing.flip();
        Ok(())
    }

    pub fn allow_drawing(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.drawing.release();
        Ok(())
    }

    pub fn disallow_drawing_this_turn(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.drawing.flip_this_turn();
        Ok(())
    }

    /// Let a hero gain tokens while it is not their turn
    pub fn allow_gain_out_of_turn(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.gain_out_of_turn.flip();
        Ok(())
    }

    pub fn revoke_gain_out_of_turn(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.gain_out_of_turn.release();
        Ok(())
    }

    pub fn disallow_gain_from_allies(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.gain_from_allies.flip();
        Ok(())
    }

    pub fn allow_gain_from_allies(&mut self, hero: HeroId) -> Result<()> {
        self.permissions_of(hero)?.gain_from_allies.release();
        Ok(())
    }

    /// Apply a restriction to every hero, stopping at the first error
    pub fn for_each_hero(&mut self, mut f: impl FnMut(&mut GameState, HeroId) -> Result<()>) -> Result<()> {
        for hero in self.hero_ids() {
            f(self, hero)?;
        }
        Ok(())
    }

    pub fn block_control_removal(&mut self) {
        self.location.block_removal();
    }

    pub fn release_control_removal_block(&mut self) {
        self.location.release_removal_block();
    }

    /// One-shot bonus the next time `hero` defeats a foe this turn
    pub fn add_extra_foe_reward(&mut self, hero: HeroId, reward: HeroHook) -> Result<()> {
        self.hero_mut(hero)?.extra_foe_rewards.push(reward);
        Ok(())
    }

    /// Runs after each damage `hero` puts on a foe this turn, with the amount applied
    pub fn add_extra_damage_effect(&mut self, hero: HeroId, effect: AssignHook) -> Result<()> {
        self.hero_mut(hero)?.extra_damage_effects.push(effect);
        Ok(())
    }

    /// Runs after each influence `hero` puts on a foe this turn, with the amount applied
    pub fn add_extra_influence_effect(&mut self, hero: HeroId, effect: AssignHook) -> Result<()> {
        self.hero_mut(hero)?.extra_influence_effects.push(effect);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{HeroHook, HeroId};
    use crate::game::state::test_support::*;
    use crate::GameError;

    #[test]
    fn test_two_restrictions_need_two_releases() {
        let mut game = bare_game();
        let hero = HeroId::new(0);
        game.disallow_drawing(hero).unwrap();
        game.disallow_drawing(hero).unwrap();
        game.allow_drawing(hero).unwrap();
        assert!(!game.heroes[0].permissions.drawing.is_allowed());
        game.allow_drawing(hero).unwrap();
        assert!(game.heroes[0].permissions.drawing.is_allowed());
    }

    #[test]
    fn test_for_each_hero() {
        let mut game = bare_game();
        game.for_each_hero(|game, hero| game.disallow_healing(hero)).unwrap();
        assert!(game.heroes.iter().all(|h| !h.permissions.healing.is_allowed()));
    }

    #[test]
    fn test_unknown_hero_is_an_error() {
        let mut game = bare_game();
        let ghost = HeroId::new(9);
        assert!(matches!(game.disallow_healing(ghost), Err(GameError::EntityNotFound(9))));
        assert!(matches!(
            game.add_extra_foe_reward(ghost, HeroHook::new(|_, _| Ok(()))),
            Err(GameError::EntityNotFound(9))
        ));
        assert!(game.heroes.iter().all(|h| h.permissions.healing.is_allowed()));
        assert!(game.heroes.iter().all(|h| h.extra_foe_rewards.is_empty()));
    }
}
