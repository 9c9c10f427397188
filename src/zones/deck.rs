//! Deck and graveyard management.
//!
//! The `DeckManager` owns the two shared piles: the draw deck (top = end of
//! the vec) and the graveyard of spent cards. It supports:
//! - Building the full card set (52 standard cards plus wild cards)
//! - Fisher–Yates shuffling through `GameRng`
//! - Drawing into a hand with a size limit
//! - Automatic reshuffle of the graveyard when the deck runs dry
//!
//! ## Usage
//!
//! ```
//! use card_duel::core::GameRng;
//! use card_duel::zones::{DeckManager, Hand};
//!
//! let mut rng = GameRng::new(42);
//! let mut deck = DeckManager::new(2);
//! deck.shuffle(&mut rng);
//!
//! let mut hand = Hand::new();
//! let report = deck.draw_into(&mut hand, 5, 6, &mut rng);
//!
//! assert_eq!(report.drawn, 5);
//! assert_eq!(deck.deck_len(), 54 - 5);
//! ```

use serde::{Deserialize, Serialize};

use super::hand::Hand;
use crate::cards::{Card, Rank, Suit};
use crate::core::GameRng;

/// What happened during a draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawReport {
    /// Cards actually moved into the hand.
    pub drawn: usize,
    /// Number of graveyard cards shuffled back into the deck, if a
    /// reshuffle happened.
    pub reshuffled: Option<usize>,
}

/// The draw deck and the graveyard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManager {
    /// Draw pile. Index 0 is bottom, last is top.
    deck: Vec<Card>,
    /// Spent cards.
    graveyard: Vec<Card>,
}

impl DeckManager {
    /// Build every card of a game in deterministic order.
    ///
    /// Suit-major (♥ ♦ ♣ ♠), ranks Ace to King within each suit, then
    /// `wild_count` wild cards.
    #[must_use]
    pub fn full_set(wild_count: usize) -> Vec<Card> {
        let mut cards = Vec::with_capacity(Suit::STANDARD.len() * Rank::STANDARD.len() + wild_count);
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                cards.push(Card::new(suit, rank));
            }
        }
        cards.extend(std::iter::repeat(Card::wild()).take(wild_count));
        cards
    }

    /// Create an unshuffled deck holding the full card set and an empty
    /// graveyard.
    #[must_use]
    pub fn new(wild_count: usize) -> Self {
        Self {
            deck: Self::full_set(wild_count),
            graveyard: Vec::new(),
        }
    }

    /// Create a manager from explicit piles (top of deck = last element).
    #[must_use]
    pub fn from_piles(deck: Vec<Card>, graveyard: Vec<Card>) -> Self {
        Self { deck, graveyard }
    }

    /// Shuffle the draw deck in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.deck);
    }

    /// Move the whole graveyard into the deck and shuffle it.
    ///
    /// Returns the number of cards moved. Does nothing when the graveyard
    /// is empty.
    pub fn reshuffle_graveyard(&mut self, rng: &mut GameRng) -> usize {
        let moved = self.graveyard.len();
        if moved == 0 {
            return 0;
        }
        self.deck.append(&mut self.graveyard);
        self.shuffle(rng);
        log::debug!("reshuffled {moved} graveyard cards into the deck");
        moved
    }

    /// Draw up to `count` cards from the top of the deck into `hand`.
    ///
    /// Stops early when the hand reaches `max_hand_size`. An empty deck is
    /// refilled from the graveyard first; when both are empty the draw ends
    /// with fewer cards than requested.
    pub fn draw_into(
        &mut self,
        hand: &mut Hand,
        count: usize,
        max_hand_size: usize,
        rng: &mut GameRng,
    ) -> DrawReport {
        let mut report = DrawReport::default();

        for _ in 0..count {
            if hand.len() >= max_hand_size {
                break;
            }
            if self.deck.is_empty() {
                let moved = self.reshuffle_graveyard(rng);
                if moved > 0 {
                    *report.reshuffled.get_or_insert(0) += moved;
                }
            }
            match self.deck.pop() {
                Some(card) => {
                    hand.push(card);
                    report.drawn += 1;
                }
                None => break,
            }
        }

        report
    }

    /// Put spent cards into the graveyard.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.graveyard.extend(cards);
    }

    /// The draw pile, bottom to top.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// The graveyard, oldest first.
    #[must_use]
    pub fn graveyard(&self) -> &[Card] {
        &self.graveyard
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn graveyard_len(&self) -> usize {
        self.graveyard.len()
    }

    /// Cards held by both piles together.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.graveyard.len()
    }
}
