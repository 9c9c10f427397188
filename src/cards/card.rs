//! Playing cards.
//!
//! A `Card` is an immutable value: suit, rank and base value. Two cards with
//! the same suit and rank are interchangeable, so no instance id is needed;
//! a card's identity within a game is its position in a pile.
//!
//! Wild cards use `Suit::Wild` and `Rank::WildMarker`, have base value 0 and
//! earn a random bonus when played (see `rules::battle`).

use serde::{Deserialize, Serialize};

/// Card suit. `Wild` marks wild cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    Wild,
}

impl Suit {
    /// The four standard suits in deck-building order.
    pub const STANDARD: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
            Suit::Wild => "★",
        }
    }
}

/// Card rank. `WildMarker` is only used by wild cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    WildMarker,
}

impl Rank {
    /// The thirteen standard ranks, Ace to King.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Battle value: Ace = 1 up to King = 13. Wild is 0.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::WildMarker => 0,
        }
    }

    /// Short label as printed on the card face.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::WildMarker => "WILD",
        }
    }
}

/// A playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    /// Value before any wild bonus (0..=13).
    pub base_value: u8,
}

impl Card {
    /// Create a standard card. The base value follows the rank.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            base_value: rank.value(),
        }
    }

    /// Create a wild card.
    #[must_use]
    pub const fn wild() -> Self {
        Self::new(Suit::Wild, Rank::WildMarker)
    }

    /// Is this a wild card?
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        matches!(self.suit, Suit::Wild)
    }

    /// Human-readable name, e.g. `"10♠"` or `"WILD★"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
