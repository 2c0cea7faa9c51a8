//! Engine errors.
//!
//! Every engine operation is all-or-nothing: on `Err` the caller's state is
//! exactly as it was. An empty deck is never an error (the draw is skipped)
//! and a deadlock is a game result, not an error.

use thiserror::Error;

use super::player::Side;
use super::state::Phase;
use crate::cards::CardId;
use crate::rules::GameResult;
use crate::zones::Position;

/// Why a play was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalReason {
    /// The card is not in the acting side's hand.
    NotInHand,
    /// The card cannot connect to the card at that end.
    Incompatible,
    /// That end is locked.
    EndLocked,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalReason::NotInHand => f.write_str("card is not in hand"),
            IllegalReason::Incompatible => f.write_str("card does not connect"),
            IllegalReason::EndLocked => f.write_str("end is locked"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal move: {card} at the {position} end ({reason})")]
    IllegalMove {
        card: CardId,
        position: Position,
        reason: IllegalReason,
    },

    #[error("{side} acted out of turn")]
    OutOfTurn { side: Side },

    #[error("cannot {action} while {phase}")]
    UnexpectedPhase { action: &'static str, phase: Phase },

    #[error("game is over ({0})")]
    GameOver(GameResult),

    #[error("{0} appears more than once")]
    DuplicateCard(CardId),

    #[error("deck of {available} cards cannot deal {required}")]
    DeckTooSmall { available: usize, required: usize },

    #[error("must discard exactly {expected} cards, got {actual}")]
    WrongDiscardCount { expected: usize, actual: usize },

    #[error("{0} cannot be discarded: not in hand or listed twice")]
    InvalidDiscard(CardId),

    #[error("chaos resolution for {card} is invalid: {detail}")]
    InvalidChaosResolution { card: CardId, detail: String },
}

impl EngineError {
    /// Whether this is a rejected player action the caller can re-prompt for.
    ///
    /// Setup errors and faulty resolvers are not recoverable by the player.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::IllegalMove { .. }
                | EngineError::OutOfTurn { .. }
                | EngineError::UnexpectedPhase { .. }
                | EngineError::WrongDiscardCount { .. }
                | EngineError::InvalidDiscard(_)
        )
    }
}
