//! Deck construction.
//!
//! The deck always holds 54 cards:
//! - 18 Gravity (6 each of variants 1-3)
//! - 12 Force (3 each of red, blue, yellow, green)
//! - 18 Wiggle (6 each of variants 1-3)
//! - 6 Chaos (2 each of Squish!, Gauge-Break!, Big Bang!)
//!
//! `build_deck` returns the cards in a fixed, unshuffled order. Ordering is
//! the caller's business; `shuffled_deck` is a convenience for callers that
//! want a seeded shuffle.

use super::definition::{Card, CardId, CardKind, ChaosType, ForceColor, Variant};
use crate::core::GameRng;

/// Copies of each Gravity variant.
pub const GRAVITY_PER_VARIANT: usize = 6;
/// Copies of each Force color.
pub const FORCE_PER_COLOR: usize = 3;
/// Copies of each Wiggle variant.
pub const WIGGLE_PER_VARIANT: usize = 6;
/// Copies of each Chaos type.
pub const CHAOS_PER_TYPE: usize = 2;

/// Total number of cards in a full deck.
pub const DECK_SIZE: usize = GRAVITY_PER_VARIANT * 3
    + FORCE_PER_COLOR * 4
    + WIGGLE_PER_VARIANT * 3
    + CHAOS_PER_TYPE * 3;

/// Build the full 54-card deck with ids `0..54`.
#[must_use]
pub fn build_deck() -> Vec<Card> {
    let mut kinds = Vec::with_capacity(DECK_SIZE);

    for variant in Variant::ALL {
        kinds.extend(std::iter::repeat(CardKind::Gravity(variant)).take(GRAVITY_PER_VARIANT));
    }
    for color in ForceColor::ALL {
        kinds.extend(std::iter::repeat(CardKind::Force(color)).take(FORCE_PER_COLOR));
    }
    for variant in Variant::ALL {
        kinds.extend(std::iter::repeat(CardKind::Wiggle(variant)).take(WIGGLE_PER_VARIANT));
    }
    for chaos in ChaosType::ALL {
        kinds.extend(std::iter::repeat(CardKind::Chaos(chaos)).take(CHAOS_PER_TYPE));
    }

    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| Card::new(CardId::new(i as u32), kind))
        .collect()
}

/// Build the full deck and shuffle it with the given RNG.
#[must_use]
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut deck = build_deck();
    rng.shuffle(&mut deck);
    deck
}
