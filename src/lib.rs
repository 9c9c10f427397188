//! # card-duel
//!
//! A turn-based card duel between a player and a computer opponent.
//!
//! Each turn the player picks up to three cards from their hand and commits
//! them to a battle. The enemy answers with its strongest cards, totals are
//! compared, and the loser takes the difference as damage. Wild cards are
//! worth a random bonus. The first side to drop to zero hit points loses.
//!
//! ## Design Principles
//!
//! 1. **State machine only**: The crate owns deck, hands, phases and battle
//!    arithmetic. Rendering is left to a `Presenter`.
//!
//! 2. **Deterministic**: Every random decision goes through a seeded
//!    `GameRng`, and time is a virtual clock driven by `Game::advance`.
//!    The same seed and the same calls replay the same game.
//!
//! 3. **Rejections, not faults**: Actions return `Result<_, ActionError>`.
//!    An `Err` leaves the game exactly as it was.
//!
//! ## Modules
//!
//! - `core`: Sides, RNG, configuration, errors
//! - `cards`: Suits, ranks and cards
//! - `zones`: Hands, the deck and the graveyard
//! - `rules`: Battle arithmetic and the opponent heuristic
//! - `schedule`: Virtual-clock task scheduler
//! - `session`: Per-game state, snapshots and the battle log
//! - `events`: The `Presenter` notification trait
//! - `game`: The `Game` driver tying it all together

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod schedule;
pub mod session;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ActionError, ConfigError,
    GameConfig, GameRng,
    Side, SideMap,
};

pub use crate::cards::{Card, Rank, Suit};

pub use crate::zones::{DeckManager, DrawReport, Hand};

pub use crate::rules::{BattleOutcome, GameResult, Tally};

pub use crate::schedule::{Scheduler, TaskHandle};

pub use crate::session::{
    BattleLog, LogEntry, LogTag,
    GameSession, SessionSnapshot, TurnPhase,
};

pub use crate::events::{NullPresenter, Presenter, PresenterEvent, Recorder};

pub use crate::game::{Game, GameTask};
