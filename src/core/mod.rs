//! Core engine types: sides, state, actions, errors, RNG, configuration.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, CardIds, Move};
pub use config::RulesConfig;
pub use error::{EngineError, IllegalReason};
pub use player::{Side, SideMap};
pub use rng::GameRng;
pub use state::{GameState, GameStateBuilder, Phase, UnifyStats};
