//! Battle arithmetic.
//!
//! Pure functions over cards and totals. The only side effect is consuming
//! the RNG for wild-card bonuses, so the same seed always produces the same
//! battle.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{GameRng, Side};

/// Smallest bonus a wild card can roll.
pub const WILD_BONUS_MIN: u32 = 1;

/// Largest bonus a wild card can roll.
pub const WILD_BONUS_MAX: u32 = 10;

/// The valued result of a set of played cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Base values plus every wild bonus.
    pub total: u32,
    /// One rolled bonus per wild card, in card order.
    pub bonuses: SmallVec<[u32; 2]>,
}

/// Value a set of cards.
///
/// Each card contributes its base value; each wild card additionally rolls
/// a bonus uniform in `WILD_BONUS_MIN..=WILD_BONUS_MAX`.
pub fn tally(cards: &[Card], rng: &mut GameRng) -> Tally {
    let mut tally = Tally::default();
    for card in cards {
        tally.total += u32::from(card.base_value);
        if card.is_wild() {
            let bonus = rng.gen_inclusive(WILD_BONUS_MIN, WILD_BONUS_MAX);
            tally.total += bonus;
            tally.bonuses.push(bonus);
        }
    }
    tally
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The enemy loses `damage` hit points.
    PlayerWins { damage: u32 },
    /// The player loses `damage` hit points.
    EnemyWins { damage: u32 },
    /// Equal totals: nobody is hurt.
    Draw,
}

impl BattleOutcome {
    /// Compare two totals. The loser takes the difference as damage.
    #[must_use]
    pub fn from_totals(player_total: u32, enemy_total: u32) -> Self {
        use std::cmp::Ordering;
        match player_total.cmp(&enemy_total) {
            Ordering::Greater => BattleOutcome::PlayerWins {
                damage: player_total - enemy_total,
            },
            Ordering::Less => BattleOutcome::EnemyWins {
                damage: enemy_total - player_total,
            },
            Ordering::Equal => BattleOutcome::Draw,
        }
    }

    /// The side that takes damage, if any.
    #[must_use]
    pub fn loser(self) -> Option<Side> {
        match self {
            BattleOutcome::PlayerWins { .. } => Some(Side::Enemy),
            BattleOutcome::EnemyWins { .. } => Some(Side::Player),
            BattleOutcome::Draw => None,
        }
    }

    /// Damage dealt, 0 for a draw.
    #[must_use]
    pub fn damage(self) -> u32 {
        match self {
            BattleOutcome::PlayerWins { damage } | BattleOutcome::EnemyWins { damage } => damage,
            BattleOutcome::Draw => 0,
        }
    }
}

/// Result of a finished game, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    PlayerWon,
    PlayerLost,
}

impl GameResult {
    /// Decide whether the game is over given both hit point totals.
    ///
    /// Returns `None` while both sides are above zero. The player wins only
    /// with hit points left, so a double knockout is a loss.
    #[must_use]
    pub fn from_hp(player_hp: i32, enemy_hp: i32) -> Option<Self> {
        if player_hp > 0 && enemy_hp > 0 {
            None
        } else if player_hp > 0 {
            Some(GameResult::PlayerWon)
        } else {
            Some(GameResult::PlayerLost)
        }
    }

    #[must_use]
    pub fn player_won(self) -> bool {
        self == GameResult::PlayerWon
    }
}
