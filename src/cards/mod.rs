//! Card values: suits, ranks and the `Card` type.
//!
//! Cards are plain `Copy` values. Where a card sits (deck, hand, graveyard)
//! is tracked by the piles in `zones`, not by the card itself.

pub mod card;

pub use card::{Card, Rank, Suit};
