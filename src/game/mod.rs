//! Game state, rule operations and turn structure

pub mod actions;
pub mod config;
pub mod control;
pub mod controller;
pub mod deck;
pub mod events;
pub mod foes;
pub mod game_loop;
pub mod hazard;
pub mod ledger;
pub mod logger;
pub mod market;
pub mod outcome;
pub mod permissions;
pub mod phase;
pub mod random_controller;
pub mod scripted_controller;
pub mod setup;
pub mod snapshot;
pub mod state;
pub mod zero_controller;

pub use actions::HeroAction;
pub use config::GameConfig;
pub use controller::{DecisionMaker, GameStateView};
pub use events::{
    CallbackBus, GameEvent, LedgerChange, ListenerFn, ListenerId, ListenerRecord, ListenerScope, TriggerKind,
};
pub use foes::FoeRoster;
pub use game_loop::{GameLoop, GameOutcome, GameResult};
pub use hazard::HazardDeck;
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use market::Market;
pub use outcome::{Change, FoeHit, Outcome, Rejection};
pub use phase::{TurnPhase, TurnStructure};
pub use random_controller::RandomController;
pub use scripted_controller::ScriptedController;
pub use setup::{DeckEntry, GameInitializer, GameSetup, HeroSetup};
pub use snapshot::{ControlSnapshot, FoeSnapshot, GameSnapshot, HeroSnapshot, TurnSnapshot};
pub use state::{GameState, MAX_CHOICE_ATTEMPTS, MAX_DISPATCH_DEPTH};
pub use zero_controller::ZeroController;
