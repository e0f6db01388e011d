//! Main game state structure
//!
//! `GameState` owns every ledger, pile, registry and deck of the session.
//! The rule operations are split across sibling modules (`ledger`, `deck`,
//! `control`, `foes`, `market`, `hazard`) as further `impl GameState`
//! blocks.

use crate::core::{Card, CardId, EntityStore, Foe, FoeId, Hero, HeroId, Location, Stage};
use crate::game::controller::{DecisionMaker, GameStateView};
use crate::game::events::{CallbackBus, GameEvent, ListenerFn, ListenerId, PendingCall, TriggerKind};
use crate::game::{FoeRoster, GameConfig, GameLogger, HazardDeck, Market, Outcome, Rejection, TurnStructure};
use crate::{GameError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

/// Deepest allowed nesting of listener dispatch and chained effects
pub const MAX_DISPATCH_DEPTH: u32 = 32;

/// How many times an invalid answer is asked again before giving up
pub const MAX_CHOICE_ATTEMPTS: u32 = 16;

/// Complete game state
pub struct GameState {
    pub(crate) cards: EntityStore<Card>,

    /// Heroes in turn order; a hero's id is its index
    pub(crate) heroes: Vec<Hero>,

    pub(crate) foes: EntityStore<Foe>,
    pub(crate) roster: FoeRoster,

    pub(crate) hazards: HazardDeck,
    pub(crate) market: Market,
    pub(crate) location: Location,
    pub(crate) turn: TurnStructure,
    pub(crate) bus: CallbackBus,
    pub(crate) config: GameConfig,

    /// Centralized logger for game events
    pub logger: GameLogger,

    pub(crate) rng: ChaCha12Rng,

    /// Shared so a decision can be requested while the state is borrowed
    decider: Rc<RefCell<dyn DecisionMaker>>,

    /// Current nesting of listener dispatch / chained effects
    depth: u32,

    /// Set when a cleared final stage could not advance
    pub(crate) location_lost: bool,
}

impl GameState {
    /// Create an empty game: heroes with empty piles, no foes or cards yet
    ///
    /// Use [`crate::game::GameInitializer`] to build a playable game.
    pub fn new(
        config: GameConfig,
        hero_names: &[&str],
        stages: Vec<Stage>,
        decider: Rc<RefCell<dyn DecisionMaker>>,
    ) -> Result<Self> {
        if hero_names.is_empty() {
            return Err(GameError::InvalidSetup("at least one hero is required".to_string()));
        }
        if stages.is_empty() {
            return Err(GameError::InvalidSetup("a location needs at least one stage".to_string()));
        }

        let heroes: Vec<Hero> = hero_names
            .iter()
            .enumerate()
            .map(|(idx, name)| Hero::new(HeroId::new(idx as u32), *name, config.starting_hearts))
            .collect();

        let rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };

        let mut logger = GameLogger::with_verbosity(config.verbosity);
        logger.set_output_mode(config.output_mode);
        logger.set_capacity(config.log_capacity);

        Ok(GameState {
            cards: EntityStore::new(),
            turn: TurnStructure::new(heroes[0].id),
            heroes,
            foes: EntityStore::new(),
            roster: FoeRoster::new(config.max_active_foes),
            hazards: HazardDeck::new(),
            market: Market::new(config.market_size),
            location: Location::new(stages),
            bus: CallbackBus::new(),
            config,
            logger,
            rng,
            decider,
            depth: 0,
            location_lost: false,
        })
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn hero_ids(&self) -> SmallVec<[HeroId; 4]> {
        self.heroes.iter().map(|h| h.id).collect()
    }

    pub fn hero(&self, id: HeroId) -> Result<&Hero> {
        self.heroes
            .get(id.as_u32() as usize)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    pub(crate) fn hero_mut(&mut self, id: HeroId) -> Result<&mut Hero> {
        self.heroes
            .get_mut(id.as_u32() as usize)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    /// Index into `heroes`, checked
    pub(crate) fn hero_idx(&self, id: HeroId) -> Result<usize> {
        let idx = id.as_u32() as usize;
        if idx < self.heroes.len() {
            Ok(idx)
        } else {
            Err(GameError::EntityNotFound(id.as_u32()))
        }
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id)
    }

    pub fn card_name(&self, id: CardId) -> String {
        self.cards
            .get(id)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|_| format!("card {id}"))
    }

    pub fn foe(&self, id: FoeId) -> Result<&Foe> {
        self.foes.get(id)
    }

    pub fn foe_name(&self, id: FoeId) -> String {
        self.foes
            .get(id)
            .map(|f| f.name.to_string())
            .unwrap_or_else(|_| format!("foe {id}"))
    }

    pub fn hero_name(&self, id: HeroId) -> String {
        self.hero(id)
            .map(|h| h.name.to_string())
            .unwrap_or_else(|_| format!("hero {id}"))
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn turn(&self) -> &TurnStructure {
        &self.turn
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn hazards(&self) -> &HazardDeck {
        &self.hazards
    }

    pub fn bus(&self) -> &CallbackBus {
        &self.bus
    }

    pub fn active_hero(&self) -> HeroId {
        self.turn.active_hero
    }

    pub fn is_active(&self, hero: HeroId) -> bool {
        self.turn.active_hero == hero
    }

    pub fn view(&self) -> GameStateView<'_> {
        GameStateView::new(self)
    }

    /// Log a rejected operation and return it as an outcome
    pub(crate) fn reject<T>(&self, what: &str, reason: Rejection) -> Outcome<T> {
        self.logger.verbose(&format!("{what}: rejected ({reason})"));
        Outcome::Rejected(reason)
    }

    // ------------------------------------------------------------------
    // Callback bus
    // ------------------------------------------------------------------

    /// Register a listener for every event of `kind`
    pub fn register_listener(&mut self, kind: TriggerKind, listener: ListenerFn) -> ListenerId {
        self.bus.register(kind, listener)
    }

    /// Register a listener that only hears events about `hero`
    pub fn register_hero_listener(&mut self, kind: TriggerKind, hero: HeroId, listener: ListenerFn) -> ListenerId {
        self.bus.register_for(kind, hero, listener)
    }

    /// Remove one registration; false if it was already gone
    pub fn unregister_listener(&mut self, id: ListenerId) -> bool {
        self.bus.unregister(id)
    }

    /// Run `f` one level deeper, failing if the nesting limit is reached
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DISPATCH_DEPTH {
            return Err(GameError::CallbackDepthExceeded(MAX_DISPATCH_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Invoke every listener registered for this event's trigger, in
    /// registration order
    ///
    /// The listener list is captured when dispatch starts: listeners added
    /// during dispatch wait for the next event, and listeners removed by an
    /// earlier listener are skipped.
    pub fn fire(&mut self, event: GameEvent) -> Result<()> {
        let pending = self.bus.snapshot(event.kind());
        if pending.is_empty() {
            return Ok(());
        }
        self.nested(|game| game.run_listeners(&pending, &event))
    }

    fn run_listeners(&mut self, pending: &[PendingCall], event: &GameEvent) -> Result<()> {
        for call in pending {
            if !self.bus.is_registered(call.id) {
                continue;
            }
            if call.hero.is_some() && call.hero != event.hero() {
                continue;
            }
            let callback = call.callback.get();
            callback(self, event)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Decisions
    // ------------------------------------------------------------------

    /// Ask the decider to pick one of `options` for `hero`
    ///
    /// A single option is taken without asking. Out-of-range answers are
    /// asked again up to [`MAX_CHOICE_ATTEMPTS`] times.
    pub fn choose(&mut self, hero: HeroId, prompt: &str, options: &[String]) -> Result<usize> {
        match options.len() {
            0 => Err(GameError::InvalidSetup(format!("no options offered for '{prompt}'"))),
            1 => {
                self.logger
                    .verbose(&format!("{}: {} (only option)", self.hero_name(hero), options[0]));
                Ok(0)
            }
            count => {
                let labels: SmallVec<[&str; 8]> = options.iter().map(String::as_str).collect();
                let decider = Rc::clone(&self.decider);
                for _ in 0..MAX_CHOICE_ATTEMPTS {
                    let idx = decider
                        .borrow_mut()
                        .make_choice(&GameStateView::new(self), hero, prompt, &labels);
                    if idx < count {
                        self.logger
                            .normal(&format!("{} chose {}", self.hero_name(hero), options[idx]));
                        return Ok(idx);
                    }
                    self.logger
                        .verbose(&format!("choice {idx} is out of range for '{prompt}', asking again"));
                }
                Err(GameError::ChoiceExhausted {
                    prompt: prompt.to_string(),
                    attempts: MAX_CHOICE_ATTEMPTS,
                })
            }
        }
    }

    /// Pick `count` distinct cards from `candidates`, one decision per card
    pub fn choose_cards(
        &mut self,
        hero: HeroId,
        prompt: &str,
        candidates: &[CardId],
        count: usize,
    ) -> Result<SmallVec<[CardId; 8]>> {
        let mut remaining: SmallVec<[CardId; 8]> = candidates.iter().copied().collect();
        let mut picked = SmallVec::new();
        while picked.len() < count && !remaining.is_empty() {
            let labels: Vec<String> = remaining.iter().map(|&c| self.card_name(c)).collect();
            let idx = self.choose(hero, prompt, &labels)?;
            picked.push(remaining.remove(idx));
        }
        Ok(picked)
    }

    /// Ask a yes/no question
    pub fn confirm(&mut self, hero: HeroId, prompt: &str) -> Result<bool> {
        let options = ["Yes".to_string(), "No".to_string()];
        Ok(self.choose(hero, prompt, &options)? == 0)
    }

    pub(crate) fn notify_game_end(&self, outcome: crate::game::GameOutcome) {
        self.decider
            .borrow_mut()
            .on_game_end(&GameStateView::new(self), outcome);
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("turn", &self.turn)
            .field("heroes", &self.heroes.len())
            .field("active_foes", &self.roster.active)
            .field("control", &self.location.control())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::{CardDef, CardKind, FoeDef, FoeKind, FoeHook, CardHook, HeroHook};
    use crate::game::{OutputMode, ScriptedController, VerbosityLevel, ZeroController};

    pub fn quiet_config() -> GameConfig {
        GameConfig {
            verbosity: VerbosityLevel::Verbose,
            output_mode: OutputMode::Memory,
            seed: Some(7),
            ..GameConfig::default()
        }
    }

    /// Two heroes, one three-stage location, nothing else
    pub fn bare_game() -> GameState {
        bare_game_with(Rc::new(RefCell::new(ZeroController::new())))
    }

    pub fn bare_game_with(decider: Rc<RefCell<dyn DecisionMaker>>) -> GameState {
        GameState::new(
            quiet_config(),
            &["Harry", "Hermione"],
            vec![Stage::new("A", 3, 1), Stage::new("B", 3, 1), Stage::new("C", 4, 2)],
            decider,
        )
        .unwrap()
    }

    pub fn scripted_game(script: Vec<usize>) -> GameState {
        bare_game_with(Rc::new(RefCell::new(ScriptedController::new(script))))
    }

    /// Put a plain card with no-op hooks into a hero's hand
    pub fn give_card(game: &mut GameState, hero: HeroId, name: &str) -> CardId {
        let def = CardDef::new(name, CardKind::Spell, 0).with_effect(CardHook::new(|_, _, _| Ok(())));
        let id = game.cards.alloc(|id| def.instantiate(id, Some(hero)));
        game.heroes[hero.as_u32() as usize].zones.hand.add(id);
        id
    }

    /// Put a plain card on top of a hero's deck
    pub fn stack_deck(game: &mut GameState, hero: HeroId, name: &str) -> CardId {
        let def = CardDef::new(name, CardKind::Spell, 0).with_effect(CardHook::new(|_, _, _| Ok(())));
        let id = game.cards.alloc(|id| def.instantiate(id, Some(hero)));
        game.heroes[hero.as_u32() as usize].zones.deck.add(id);
        id
    }

    /// Put a plain card into a hero's discard pile
    pub fn seed_discard(game: &mut GameState, hero: HeroId, name: &str) -> CardId {
        let def = CardDef::new(name, CardKind::Spell, 0).with_effect(CardHook::new(|_, _, _| Ok(())));
        let id = game.cards.alloc(|id| def.instantiate(id, Some(hero)));
        game.heroes[hero.as_u32() as usize].zones.discard.add(id);
        id
    }

    /// Add an active foe with no-op effect and reward hooks
    pub fn add_foe(game: &mut GameState, name: &str, health: u32, influence: u32) -> FoeId {
        let def = FoeDef::new(name, FoeKind::Villain, health, influence)
            .with_effect(FoeHook::new(|_, _| Ok(())))
            .with_reward(HeroHook::new(|_, _| Ok(())));
        add_foe_def(game, &def)
    }

    pub fn add_foe_def(game: &mut GameState, def: &FoeDef) -> FoeId {
        let id = game.foes.alloc(|id| def.instantiate(id));
        game.roster.undrawn.push_back(id);
        game.roster.max_active = game.roster.max_active.max(game.roster.active.len() + 1);
        game.reveal_foes().unwrap();
        id
    }
}
