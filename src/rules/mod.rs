//! Battle rules.
//!
//! Pure helpers used by the battle resolver:
//! - Card valuation with the wild-card bonus
//! - Comparing totals into damage
//! - Win/loss detection
//! - The opponent's card choice
//!
//! Nothing here touches a session; `game::battle` applies the results.

pub mod battle;
pub mod opponent;

pub use battle::{tally, BattleOutcome, GameResult, Tally, WILD_BONUS_MAX, WILD_BONUS_MIN};
pub use opponent::select_enemy_cards;
