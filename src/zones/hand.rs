//! A side's hand.
//!
//! Order does not matter to the rules, but cards are kept in the order they
//! arrived so the oldest card is always at the front. The AI's hand-limit
//! discard relies on that.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Cards held by one side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding the given cards, oldest first.
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

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Find a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    /// Card ids, oldest first.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove a card by id, returning it if it was held.
    pub(crate) fn remove(&mut self, id: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(index))
    }

    /// Remove and return the `count` oldest cards.
    pub(crate) fn take_oldest(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        let rest = self.cards.split_off(count);
        let taken = std::mem::replace(&mut self.cards, rest);
        taken.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Hand {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
