//! Game rules.
//!
//! - `legality`: Pure connection rules and legal move enumeration
//! - `engine`: The turn controller (`Engine`) and game results
//! - `chaos`: Hook for Chaos card effects
//!
//! Presentation code calls into `Engine` and never reimplements rules.

pub mod chaos;
pub mod engine;
pub mod legality;

pub use chaos::{ChaosResolution, ChaosResolver, UnresolvedChaos};
pub use engine::{AiTurn, Engine, GameResult, PlayOutcome};
pub use legality::{can_connect, can_play, consecutive_forces, is_adjacent_to_wiggle, legal_moves, MAX_CONSECUTIVE_FORCES};
