//! Error types.
//!
//! `ActionError` is a *rejection*, not a fault: the action had no effect and
//! the game state is unchanged. UIs are free to ignore it.
//!
//! `ConfigError` reports a config that cannot describe a playable game.

use serde::Serialize;

use crate::session::TurnPhase;

/// Why a player action was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ActionError {
    /// No game has been started yet.
    NoGame,
    /// The game has ended; the session is frozen.
    GameOver,
    /// The action is not valid in the current phase.
    WrongPhase { expected: TurnPhase, actual: TurnPhase },
    /// The once-per-turn draw was already used.
    AlreadyDrawn,
    /// Selecting another card would exceed the cap.
    SelectionFull { max: usize },
    /// The index does not point into the player's hand.
    CardIndexOutOfRange { index: usize, hand_size: usize },
    /// A battle needs at least one selected card.
    NothingSelected,
    /// Games cannot start without a player name.
    EmptyPlayerName,
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionError::NoGame => write!(f, "no game in progress"),
            ActionError::GameOver => write!(f, "the game is over"),
            ActionError::WrongPhase { expected, actual } => {
                write!(f, "action requires phase {expected:?}, current phase is {actual:?}")
            }
            ActionError::AlreadyDrawn => write!(f, "already drew this turn"),
            ActionError::SelectionFull { max } => write!(f, "cannot select more than {max} cards"),
            ActionError::CardIndexOutOfRange { index, hand_size } => {
                write!(f, "card index {index} out of range for hand of {hand_size}")
            }
            ActionError::NothingSelected => write!(f, "no cards selected"),
            ActionError::EmptyPlayerName => write!(f, "player name must not be empty"),
        }
    }
}

impl std::error::Error for ActionError {}

/// Invalid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ConfigError {
    /// A field that must be positive is zero.
    ZeroField { field: &'static str },
    /// Starting hit points must be positive.
    NonPositiveHp { value: i32 },
    /// The selection cap cannot exceed the hand size.
    SelectionExceedsHand { max_selectable: usize, max_hand_size: usize },
    /// Opening hands cannot exceed the hand size.
    OpeningHandTooLarge { opening_hand_size: usize, max_hand_size: usize },
    /// Not enough cards to deal both opening hands.
    DeckTooSmall { total_cards: usize, needed: usize },
    /// The JSON could not be parsed.
    Parse { message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroField { field } => write!(f, "{field} must be greater than zero"),
            ConfigError::NonPositiveHp { value } => {
                write!(f, "starting_hp must be positive, got {value}")
            }
            ConfigError::SelectionExceedsHand { max_selectable, max_hand_size } => write!(
                f,
                "max_selectable ({max_selectable}) exceeds max_hand_size ({max_hand_size})"
            ),
            ConfigError::OpeningHandTooLarge { opening_hand_size, max_hand_size } => write!(
                f,
                "opening_hand_size ({opening_hand_size}) exceeds max_hand_size ({max_hand_size})"
            ),
            ConfigError::DeckTooSmall { total_cards, needed } => write!(
                f,
                "deck of {total_cards} cards cannot deal opening hands needing {needed}"
            ),
            ConfigError::Parse { message } => write!(f, "invalid config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
