//! Moves and the action history.
//!
//! A `Move` is what a side chooses on its turn: a card and an end.
//! Everything that actually happens to the state (draws, plays, passes,
//! UNIFY decisions, discards, chaos resolution) is appended to the history
//! as an `ActionRecord`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Side;
use crate::cards::CardId;
use crate::zones::Position;

/// Card ids touched by a single action. Usually one or two.
pub type CardIds = SmallVec<[CardId; 2]>;

/// A candidate play: attach `card` at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub card: CardId,
    pub position: Position,
}

impl Move {
    #[must_use]
    pub const fn new(card: CardId, position: Position) -> Self {
        Self { card, position }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.card, self.position)
    }
}

/// Something that happened to the game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Cards moved from the deck into a hand.
    Draw(CardIds),
    /// A card attached to the chain.
    Play(Move),
    /// The side passed.
    Pass,
    /// A UNIFY offer was accepted or declined.
    Unify { accepted: bool },
    /// Cards discarded to satisfy the hand limit.
    Discard(CardIds),
    /// A chaos resolver rewrote the chain; `removed` went to the discard pile.
    ChaosResolved { card: CardId, removed: CardIds },
}

/// An action with who took it and when.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The side the action belongs to.
    pub side: Side,

    /// What happened.
    pub action: Action,

    /// Turn number when it happened.
    pub turn: u32,

    /// Position in the whole game's history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(side: Side, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            side,
            action,
            turn,
            sequence,
        }
    }
}
