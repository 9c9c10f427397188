//! Core types: sides, RNG, configuration and errors.
//!
//! These are the building blocks every other module depends on.

pub mod side;
pub mod rng;
pub mod config;
pub mod error;

pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{GameConfig, STANDARD_CARD_COUNT};
pub use error::{ActionError, ConfigError};
