//! Notifications from the game to its presentation layer.

pub mod presenter;

pub use presenter::{NullPresenter, Presenter, PresenterEvent, Recorder};
