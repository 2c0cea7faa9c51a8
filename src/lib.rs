//! # emuni
//!
//! Rules engine for a two-player chain-building card game: a human and a
//! computer opponent take turns attaching cards to either end of a shared
//! chain. The first side to empty its hand wins; two passes in a row end
//! the game in a deadlock.
//!
//! ## Design Principles
//!
//! 1. **Functional Core**: Every engine operation takes a `GameState` and
//!    returns a new one. Rejected actions return `Err` and change nothing.
//!
//! 2. **Closed Types**: Card types, sides, ends and phases are enums, so
//!    every rule is checked exhaustively by the compiler.
//!
//! 3. **No Hidden Randomness**: The engine is deterministic. Shuffling and
//!    the randomized AI take an explicit seeded `GameRng`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) state cloning via `im-rs`.
//!
//! - **Pluggable Collaborators**: AI players implement `MoveSelector`,
//!   Chaos effects implement `ChaosResolver`.
//!
//! ## Modules
//!
//! - `core`: Sides, state, actions, errors, RNG, configuration
//! - `cards`: Card definitions and the deck builder
//! - `zones`: The chain and hands
//! - `rules`: Legality, the turn controller, the Chaos hook
//! - `ai`: Move selectors and the self-play driver

pub mod ai;
pub mod cards;
pub mod core;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, EngineError, GameRng, GameState, GameStateBuilder, IllegalReason, Move,
    Phase, RulesConfig, Side, SideMap, UnifyStats,
};

pub use crate::cards::{build_deck, shuffled_deck, Card, CardId, CardKind, CardType, ChaosType, ForceColor, Variant};

pub use crate::zones::{Chain, Hand, Position};

pub use crate::rules::{AiTurn, ChaosResolution, ChaosResolver, Engine, GameResult, PlayOutcome};

pub use crate::ai::{AlwaysPass, FirstLegal, MediumAi, MoveSelector, SelfPlay, SelfPlayConfig, SelfPlayReport};
