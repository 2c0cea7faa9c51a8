//! Connection rules.
//!
//! Pure functions with no access to game state beyond what is passed in, so
//! they can be called on candidate positions (AI enumeration, UI hints)
//! without touching a real game.
//!
//! | chain end | accepts                                      |
//! |-----------|----------------------------------------------|
//! | (empty)   | anything                                     |
//! | Wiggle    | anything                                     |
//! | Gravity   | Gravity, Wiggle, Chaos                       |
//! | Force     | Wiggle, Chaos; Force only below the cap of 2 |
//! | Chaos     | anything                                     |

use crate::cards::{Card, CardType};
use crate::core::Move;
use crate::zones::{Chain, Hand, Position};

/// At most this many Force cards may sit consecutively at one end.
pub const MAX_CONSECUTIVE_FORCES: usize = 2;

/// Whether `candidate` may attach next to `chain_end`.
///
/// `consecutive_forces` is the number of Force cards at that end of the
/// chain (see [`consecutive_forces`]).
#[must_use]
pub fn can_connect(candidate: &Card, chain_end: Option<&Card>, consecutive_forces: usize) -> bool {
    let Some(end) = chain_end else {
        return true;
    };

    match end.card_type() {
        CardType::Wiggle => true,
        CardType::Gravity => !candidate.is(CardType::Force),
        CardType::Force => match candidate.card_type() {
            CardType::Gravity => false,
            CardType::Force => consecutive_forces < MAX_CONSECUTIVE_FORCES,
            CardType::Wiggle | CardType::Chaos => true,
        },
        // Chaos normally leaves the chain on resolution; tolerate it if not.
        CardType::Chaos => true,
    }
}

/// Count Force cards from `end` inward, stopping at the first non-Force.
#[must_use]
pub fn consecutive_forces(chain: &Chain, end: Position) -> usize {
    chain
        .iter_from(end)
        .take_while(|c| c.is(CardType::Force))
        .count()
}

/// Whether a card just played at `end` landed directly beside a Wiggle.
///
/// `chain` is the chain after the play. Wiggle and Chaos plays never count.
#[must_use]
pub fn is_adjacent_to_wiggle(chain: &Chain, end: Position, played: &Card) -> bool {
    if played.is(CardType::Wiggle) || played.is(CardType::Chaos) {
        return false;
    }
    chain
        .inward_of(end)
        .is_some_and(|neighbor| neighbor.is(CardType::Wiggle))
}

/// Whether `candidate` may be played at `position` on `chain`.
#[must_use]
pub fn can_play(candidate: &Card, chain: &Chain, position: Position) -> bool {
    can_connect(candidate, chain.end(position), consecutive_forces(chain, position))
}

/// All legal moves for a hand, in hand order, left end before right.
///
/// A locked end is never offered. On an empty chain every card is offered
/// at both ends.
#[must_use]
pub fn legal_moves(hand: &Hand, chain: &Chain, locked_end: Option<Position>) -> Vec<Move> {
    let open: Vec<Position> = Position::BOTH
        .into_iter()
        .filter(|&p| Some(p) != locked_end)
        .collect();

    hand.iter()
        .flat_map(|card| {
            open.iter()
                .filter(move |&&p| can_play(card, chain, p))
                .map(move |&p| Move::new(card.id, p))
        })
        .collect()
}
