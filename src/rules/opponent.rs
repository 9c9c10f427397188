//! The computer opponent's card choice.

use crate::cards::Card;
use crate::core::GameRng;
use crate::zones::Hand;

/// Pick the enemy's cards for a battle.
///
/// The hand is sorted strongest first and a random count in
/// `1..=max_play` (capped by the hand size) is taken from the front, so the
/// enemy always commits its best cards. The removed cards are returned in
/// play order. The count is rolled even for an empty hand, keeping the RNG
/// stream independent of hand contents.
pub fn select_enemy_cards(hand: &mut Hand, rng: &mut GameRng, max_play: u32) -> Vec<Card> {
    let roll = rng.gen_inclusive(1, max_play.max(1)) as usize;
    hand.sort_strongest_first();
    hand.take_front(roll.min(hand.len()))
}
