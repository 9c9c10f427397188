//! Per-game state and the battle log.
//!
//! - `GameSession`: the aggregate root of one duel
//! - `SessionSnapshot`: immutable view for the presentation layer
//! - `BattleLog`: bounded, tagged message log

pub mod log;
pub mod state;

pub use self::log::{BattleLog, LogEntry, LogTag};
pub use self::state::{GameSession, Selection, SessionSnapshot, TurnPhase};
