//! Card piles: the shared deck and graveyard, and each side's hand.
//!
//! ## Key Types
//!
//! - `DeckManager`: Draw deck + graveyard, shuffling, drawing, reshuffling
//! - `Hand`: Ordered hand with index-safe removal
//! - `DrawReport`: What a draw actually did

pub mod deck;
pub mod hand;

pub use deck::{DeckManager, DrawReport};
pub use hand::Hand;
