//! The notification interface between a duel and whatever displays it.
//!
//! The game never renders anything. After each state change it calls into a
//! `Presenter`, which may redraw a UI, print to a terminal, or record the
//! calls for later inspection.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::session::SessionSnapshot;

/// Receives notifications from a running game.
///
/// Every method defaults to a no-op, so implementors only override what they
/// display.
pub trait Presenter {
    /// The session changed. Called after every accepted action and task.
    fn on_state_changed(&mut self, _snapshot: &SessionSnapshot) {}

    /// Cards committed to a battle, shown until `on_battle_cleared`.
    fn on_battle_display(&mut self, _player_cards: &[Card], _enemy_cards: &[Card]) {}

    /// The battle area should be emptied before the next turn.
    fn on_battle_cleared(&mut self) {}

    /// The game ended.
    fn on_game_over(&mut self, _player_won: bool, _player_name: &str) {}

    /// The countdown moved. `remaining` seconds out of `total`.
    fn on_timer_tick(&mut self, _remaining: u32, _total: u32) {}
}

/// Presenter that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// One recorded notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresenterEvent {
    StateChanged(Box<SessionSnapshot>),
    BattleDisplay { player: Vec<Card>, enemy: Vec<Card> },
    BattleCleared,
    GameOver { player_won: bool, player_name: String },
    TimerTick { remaining: u32, total: u32 },
}

/// Presenter that keeps every notification in order.
///
/// Used by tests and headless drivers to inspect what a UI would have shown.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    events: Vec<PresenterEvent>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Forget every recorded notification.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// The most recent snapshot received.
    #[must_use]
    pub fn last_snapshot(&self) -> Option<&SessionSnapshot> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::StateChanged(snapshot) => Some(snapshot.as_ref()),
            _ => None,
        })
    }

    /// Every `(remaining, total)` timer report, oldest first.
    #[must_use]
    pub fn timer_ticks(&self) -> Vec<(u32, u32)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                PresenterEvent::TimerTick { remaining, total } => Some((remaining, total)),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&PresenterEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl Presenter for Recorder {
    fn on_state_changed(&mut self, snapshot: &SessionSnapshot) {
        self.events
            .push(PresenterEvent::StateChanged(Box::new(snapshot.clone())));
    }

    fn on_battle_display(&mut self, player_cards: &[Card], enemy_cards: &[Card]) {
        self.events.push(PresenterEvent::BattleDisplay {
            player: player_cards.to_vec(),
            enemy: enemy_cards.to_vec(),
        });
    }

    fn on_battle_cleared(&mut self) {
        self.events.push(PresenterEvent::BattleCleared);
    }

    fn on_game_over(&mut self, player_won: bool, player_name: &str) {
        self.events.push(PresenterEvent::GameOver {
            player_won,
            player_name: player_name.to_string(),
        });
    }

    fn on_timer_tick(&mut self, remaining: u32, total: u32) {
        self.events.push(PresenterEvent::TimerTick { remaining, total });
    }
}
