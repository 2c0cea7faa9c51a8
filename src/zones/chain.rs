//! The chain: the shared row of played cards.
//!
//! Cards attach to either end. Adjacent pairs were legal when formed; the
//! chain never re-validates itself, so a chaos resolver may leave pairs that
//! would not be legal if played fresh.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// One of the chain's two ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Left,
    Right,
}

impl Position {
    /// Both ends, left first.
    pub const BOTH: [Position; 2] = [Position::Left, Position::Right];

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Left => f.write_str("left"),
            Position::Right => f.write_str("right"),
        }
    }
}

/// Ordered sequence of played cards, index 0 at the left end.
///
/// ## Example
///
/// ```
/// use emuni::cards::{Card, CardId, CardType};
/// use emuni::zones::{Chain, Position};
///
/// let chain = Chain::from_cards([
///     Card::gravity(CardId::new(0), 1),
///     Card::wiggle(CardId::new(30), 1),
/// ]);
///
/// assert_eq!(chain.end(Position::Left).map(|c| c.card_type()), Some(CardType::Gravity));
/// assert_eq!(chain.end(Position::Right).map(|c| c.card_type()), Some(CardType::Wiggle));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    cards: Vector<Card>,
}

impl Chain {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from cards listed left to right.
    ///
    /// No legality checks are made.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card currently occupying an end, if any.
    #[must_use]
    pub fn end(&self, position: Position) -> Option<&Card> {
        match position {
            Position::Left => self.cards.front(),
            Position::Right => self.cards.back(),
        }
    }

    /// The card one step inward from an end (second from that end).
    #[must_use]
    pub fn inward_of(&self, position: Position) -> Option<&Card> {
        if self.cards.len() < 2 {
            return None;
        }
        match position {
            Position::Left => self.cards.get(1),
            Position::Right => self.cards.get(self.cards.len() - 2),
        }
    }

    /// Iterate left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Iterate starting at the given end and walking inward.
    pub fn iter_from(&self, position: Position) -> impl Iterator<Item = &Card> + '_ {
        let (forward, backward) = match position {
            Position::Left => (Some(self.cards.iter()), None),
            Position::Right => (None, Some(self.cards.iter().rev())),
        };
        forward
            .into_iter()
            .flatten()
            .chain(backward.into_iter().flatten())
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Card ids left to right.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// Attach a card to an end.
    pub(crate) fn attach(&mut self, card: Card, position: Position) {
        match position {
            Position::Left => self.cards.push_front(card),
            Position::Right => self.cards.push_back(card),
        }
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
