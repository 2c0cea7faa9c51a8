//! Card system: definitions and the deck builder.
//!
//! ## Key Types
//!
//! - `CardId`: Identity of one physical card in a game
//! - `CardType`: Gravity, Force, Wiggle or Chaos
//! - `CardKind`: Type plus its attribute (variant, color, chaos type)
//! - `Card`: Immutable card value
//!
//! `build_deck` produces the fixed 54-card composition.

pub mod deck;
pub mod definition;

pub use deck::{build_deck, shuffled_deck, DECK_SIZE};
pub use definition::{Card, CardId, CardKind, CardType, ChaosType, ForceColor, Variant};
