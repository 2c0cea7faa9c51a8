//! Computer players.
//!
//! ## Key Types
//!
//! - `MoveSelector`: Picks moves and UNIFY decisions from a side's view
//! - `FirstLegal`, `MediumAi`, `AlwaysPass`: Stock selectors
//! - `SelfPlay`: Drives a whole game between two selectors

pub mod policy;
pub mod self_play;

pub use policy::{AlwaysPass, FirstLegal, MediumAi, MoveSelector, AI_UNIFY_HAND_THRESHOLD};
pub use self_play::{SelfPlay, SelfPlayConfig, SelfPlayReport};
