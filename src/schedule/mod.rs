//! Deferred work: turn countdown ticks and battle resolution delays.
//!
//! Everything time-based in a duel goes through a `Scheduler` so that it can
//! be cancelled by handle when the phase changes.

pub mod scheduler;

pub use scheduler::{Scheduler, TaskHandle};
