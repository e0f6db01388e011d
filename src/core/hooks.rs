//! Behavior hooks attached to cards, foes, hazards and locations
//!
//! Card and foe definitions are plain records; their behavior is a set of
//! shared closures invoked by the engine at fixed points. Hooks are cheap to
//! clone (`Rc`) so the engine can take a copy out of the entity store before
//! handing `&mut GameState` to the closure.

use crate::core::{FoeId, HeroId, Source};
use crate::game::GameState;
use crate::Result;
use std::fmt;
use std::rc::Rc;

/// A shared callable
pub struct Hook<F: ?Sized>(pub(crate) Rc<F>);

impl<F: ?Sized> Hook<F> {
    /// Cheap handle to the underlying callable
    pub fn get(&self) -> Rc<F> {
        Rc::clone(&self.0)
    }

    /// Do two hooks share the same callable?
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> Clone for Hook<F> {
    fn clone(&self) -> Self {
        Hook(Rc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<hook>")
    }
}

/// Acts on behalf of a hero: card effects, discard effects, rewards
pub type HeroHook = Hook<dyn Fn(&mut GameState, HeroId) -> Result<()>>;

/// Runs when a card is played, with that card's source tag
pub type CardHook = Hook<dyn Fn(&mut GameState, HeroId, Source) -> Result<()>>;

/// Acts on behalf of a foe: foe effects, reveal and cleanup hooks
pub type FoeHook = Hook<dyn Fn(&mut GameState, FoeId) -> Result<()>>;

/// Acts on the game as a whole: hazard effects, location reveals
pub type GameHook = Hook<dyn Fn(&mut GameState) -> Result<()>>;

/// Runs after a hero puts damage or influence on a foe, with the amount applied
pub type AssignHook = Hook<dyn Fn(&mut GameState, HeroId, FoeId, u32) -> Result<()>>;

/// Decides whether a gated foe may currently be damaged or influenced
pub type VulnerabilityHook = Hook<dyn Fn(&GameState, FoeId) -> bool>;

impl Hook<dyn Fn(&mut GameState, HeroId) -> Result<()>> {
    pub fn new(f: impl Fn(&mut GameState, HeroId) -> Result<()> + 'static) -> Self {
        Hook(Rc::new(f))
    }
}

impl Hook<dyn Fn(&mut GameState, HeroId, Source) -> Result<()>> {
    pub fn new(f: impl Fn(&mut GameState, HeroId, Source) -> Result<()> + 'static) -> Self {
        Hook(Rc::new(f))
    }
}

impl Hook<dyn Fn(&mut GameState, FoeId) -> Result<()>> {
    pub fn new(f: impl Fn(&mut GameState, FoeId) -> Result<()> + 'static) -> Self {
        Hook(Rc::new(f))
    }
}

impl Hook<dyn Fn(&mut GameState) -> Result<()>> {
    pub fn new(f: impl Fn(&mut GameState) -> Result<()> + 'static) -> Self {
        Hook(Rc::new(f))
    }
}

impl Hook<dyn Fn(&mut GameState, HeroId, FoeId, u32) -> Result<()>> {
    pub fn new(f: impl Fn(&mut GameState, HeroId, FoeId, u32) -> Result<()> + 'static) -> Self {
        Hook(Rc::new(f))
    }
}

impl Hook<dyn Fn(&GameState, FoeId) -> bool> {
    pub fn new(f: impl Fn(&GameState, FoeId) -> bool + 'static) -> Self {
        Hook(Rc::new(f))
    }
}
