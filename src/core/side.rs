//! The two sides of a duel and per-side data storage.
//!
//! ## Side
//!
//! `Side::Player` is the human, `Side::Enemy` the computer opponent.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for hit points and hands.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two combatants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The human player.
    Player,
    /// The computer-controlled opponent.
    Enemy,
}

impl Side {
    /// Both sides, player first.
    pub const ALL: [Side; 2] = [Side::Player, Side::Enemy];

    const fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Player => write!(f, "Player"),
            Side::Enemy => write!(f, "Enemy"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use card_duel::core::{Side, SideMap};
///
/// let mut hp: SideMap<i32> = SideMap::with_value(100);
/// hp[Side::Enemy] -= 3;
///
/// assert_eq!(hp[Side::Player], 100);
/// assert_eq!(hp[Side::Enemy], 97);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a new SideMap with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Player), factory(Side::Enemy)],
        }
    }

    /// Create a new SideMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new SideMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
