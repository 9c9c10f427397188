//! Hands of cards.
//!
//! A `Hand` keeps insertion order so that the player's selections (indices)
//! stay meaningful between actions. The size limit is enforced by whoever
//! fills the hand (`DeckManager::draw_into`), not by the hand itself, so the
//! limit can come from the game config.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// An ordered hand of cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand holding the given cards, in order.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The cards, in hand order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The card at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Append a card to the end of the hand.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the cards at `indices`.
    ///
    /// Indices are removed from highest to lowest so earlier removals never
    /// shift later ones. Duplicates and out-of-range indices are ignored.
    /// The removed cards are returned in removal order (highest index first).
    pub fn remove_indices(&mut self, indices: &[usize]) -> Vec<Card> {
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        let mut removed = Vec::with_capacity(sorted.len());
        for index in sorted {
            if index < self.cards.len() {
                removed.push(self.cards.remove(index));
            }
        }
        removed
    }

    /// Reorder the hand by descending base value.
    ///
    /// The sort is stable: equal values keep their relative order.
    pub fn sort_strongest_first(&mut self) {
        self.cards.sort_by(|a, b| b.base_value.cmp(&a.base_value));
    }

    /// Remove and return up to `count` cards from the front of the hand.
    pub fn take_front(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }
}
