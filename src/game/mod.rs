//! The duel driver.
//!
//! `Game` owns the current `GameSession`, the task scheduler, the RNG and the
//! presenter. Player actions come in through methods on `Game` (see `turn`
//! and `battle`), deferred work comes in through `advance`, and every change
//! is reported to the presenter as a fresh `SessionSnapshot`.
//!
//! ## Flow
//!
//! ```text
//! start_game ─► start_turn ─► PlayerSelect ─┬─ end_turn / timer expiry ─► start_turn
//!                                           └─ commit_battle ─► Battle
//!                                                  │ resolve_delay_ms
//!                                                  ▼
//!                                           resolve ─┬─ HP ≤ 0 ─► GameOver
//!                                                    └─ next_turn_delay_ms ─► start_turn
//! ```
//!
//! ## Example
//!
//! ```
//! use card_duel::{Game, GameConfig, TurnPhase};
//!
//! let mut game = Game::new(GameConfig::default(), 42).unwrap();
//! game.start_game("Alice").unwrap();
//!
//! game.select_card(0).unwrap();
//! game.commit_battle().unwrap();
//! assert_eq!(game.snapshot().unwrap().phase, TurnPhase::Battle);
//!
//! // Let both battle delays elapse
//! game.advance(3_000);
//! assert!(game.is_game_over() || game.snapshot().unwrap().phase == TurnPhase::PlayerSelect);
//! ```

pub mod battle;
pub mod turn;

use crate::core::{ActionError, ConfigError, GameConfig, GameRng, Side, SideMap};
use crate::events::{NullPresenter, Presenter};
use crate::schedule::{Scheduler, TaskHandle};
use crate::session::{GameSession, LogTag, SessionSnapshot, TurnPhase};

/// Deferred work queued on the game's scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameTask {
    /// One countdown step of the turn timer.
    TurnTick,
    /// Compare the committed totals and apply damage.
    ResolveBattle { player_total: u32, enemy_total: u32 },
    /// Clear the battle area and start the next turn.
    BeginNextTurn,
}

/// A duel between a player and the computer.
pub struct Game<P: Presenter = NullPresenter> {
    config: GameConfig,
    session: Option<GameSession>,
    scheduler: Scheduler<GameTask>,
    rng: GameRng,
    presenter: P,
}

impl Game<NullPresenter> {
    /// Create a game without a presenter.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_presenter(config, seed, NullPresenter)
    }
}

impl<P: Presenter> Game<P> {
    /// Create a game reporting to `presenter`. The config is validated first.
    pub fn with_presenter(config: GameConfig, seed: u64, presenter: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            session: None,
            scheduler: Scheduler::new(),
            rng: GameRng::new(seed),
            presenter,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The current session, if a game was started.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Mutable session access for hosts that set up specific situations.
    ///
    /// Changes made here are not announced to the presenter.
    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    /// Has the current game ended? False when no game was started.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session.as_ref().is_some_and(GameSession::is_game_over)
    }

    /// Virtual clock in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of tasks waiting on the scheduler.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    // === Lifecycle ===

    /// Start a new game, discarding any game in progress.
    ///
    /// All scheduled work of the previous game is cancelled. The deck is
    /// rebuilt and shuffled, both sides are dealt an opening hand and the
    /// first turn begins immediately.
    pub fn start_game(&mut self, player_name: &str) -> Result<(), ActionError> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            log::debug!("rejected start_game: empty player name");
            return Err(ActionError::EmptyPlayerName);
        }

        self.scheduler.clear();

        let mut session = GameSession::new(player_name, &self.config);
        session.deck.shuffle(&mut self.rng);
        for side in Side::ALL {
            session.draw_for(
                side,
                self.config.opening_hand_size,
                self.config.max_hand_size,
                &mut self.rng,
            );
        }
        session.log(
            LogTag::System,
            format!("Game started! {player_name} vs Enemy."),
        );
        log::info!("game started for {player_name} (seed {})", self.rng.seed());

        self.session = Some(session);
        self.start_turn();
        Ok(())
    }

    /// Move the virtual clock forward by `elapsed_ms`, firing every task that
    /// comes due, in due-time order. Returns the number of tasks fired.
    ///
    /// Tasks scheduled while handling a firing are themselves fired if they
    /// come due within the same window. The work done is proportional to the
    /// number of tasks fired: an idle turn fires one tick per
    /// `tick_interval_ms` and expires every `turn_duration_secs`, so hosts
    /// should feed real elapsed frame or wall-clock time rather than jumping
    /// far ahead. The clock saturates at `u64::MAX`.
    pub fn advance(&mut self, elapsed_ms: u64) -> usize {
        let deadline = self.scheduler.now_ms().saturating_add(elapsed_ms);
        let mut fired = 0;
        while let Some((handle, task)) = self.scheduler.pop_due(deadline) {
            fired += 1;
            self.dispatch(handle, task);
        }
        self.scheduler.set_now(deadline);
        fired
    }

    fn dispatch(&mut self, handle: TaskHandle, task: GameTask) {
        log::trace!("firing {handle}: {task:?}");
        match task {
            GameTask::TurnTick => self.on_turn_tick(handle),
            GameTask::ResolveBattle {
                player_total,
                enemy_total,
            } => {
                if self.take_pending(handle) {
                    self.resolve_battle(player_total, enemy_total);
                }
            }
            GameTask::BeginNextTurn => {
                if self.take_pending(handle) {
                    if let Some(session) = self.session.as_mut() {
                        session.battle_cards = SideMap::with_default();
                    }
                    self.presenter.on_battle_cleared();
                    self.start_turn();
                }
            }
        }
    }

    /// Claim the pending battle step if `handle` is still the live one.
    fn take_pending(&mut self, handle: TaskHandle) -> bool {
        match self.session.as_mut() {
            Some(session) if session.pending == Some(handle) && session.phase == TurnPhase::Battle => {
                session.pending = None;
                true
            }
            _ => {
                log::debug!("ignoring stale battle task {handle}");
                false
            }
        }
    }

    // === Internals shared by the turn controller and the battle resolver ===

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.session.as_mut().and_then(|s| s.timer.take()) {
            self.scheduler.cancel(handle);
        }
    }

    fn notify(&mut self) {
        if let Some(session) = self.session.as_ref() {
            self.presenter.on_state_changed(&session.snapshot());
        }
    }
}

/// The session, if it accepts an action that needs `expected`.
fn require_phase(
    session: &mut Option<GameSession>,
    expected: TurnPhase,
) -> Result<&mut GameSession, ActionError> {
    let session = session.as_mut().ok_or(ActionError::NoGame)?;
    if session.phase == TurnPhase::GameOver {
        return Err(ActionError::GameOver);
    }
    if session.phase != expected {
        return Err(ActionError::WrongPhase {
            expected,
            actual: session.phase,
        });
    }
    Ok(session)
}

impl<P: Presenter + std::fmt::Debug> std::fmt::Debug for Game<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("session", &self.session)
            .field("now_ms", &self.scheduler.now_ms())
            .field("presenter", &self.presenter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{PresenterEvent, Recorder};

    fn recorded_game(seed: u64) -> Game<Recorder> {
        let mut game = Game::with_presenter(GameConfig::default(), seed, Recorder::new()).unwrap();
        game.start_game("Alice").unwrap();
        game
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig::default().with_max_hand_size(0);
        assert!(Game::new(config, 1).is_err());
    }

    #[test]
    fn test_no_game_before_start() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        assert!(game.session().is_none());
        assert!(game.snapshot().is_none());
        assert!(!game.is_game_over());
        assert_eq!(game.draw_card(), Err(ActionError::NoGame));
        assert_eq!(game.advance(10_000), 0);
    }

    #[test]
    fn test_start_game_deals_opening_hands() {
        let game = recorded_game(7);
        let session = game.session().unwrap();

        assert_eq!(session.player_hand().len(), 5);
        assert_eq!(session.enemy_hand().len(), 5);
        assert_eq!(session.deck.deck_len(), 54 - 10);
        assert_eq!(session.phase, TurnPhase::PlayerSelect);
        assert_eq!(session.turn_number, 1);
        assert_eq!(session.timer_remaining, 30);
        assert!(session.log.contains("Game started! Alice vs Enemy."));
        assert!(game.presenter().timer_ticks().contains(&(30, 30)));
    }

    #[test]
    fn test_start_game_rejects_blank_name() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        assert_eq!(game.start_game("   "), Err(ActionError::EmptyPlayerName));
        assert!(game.session().is_none());
    }

    #[test]
    fn test_start_game_trims_name() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        game.start_game("  Bob ").unwrap();
        assert_eq!(game.session().unwrap().player_name, "Bob");
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = recorded_game(99);
        let b = recorded_game(99);
        assert_eq!(
            a.session().unwrap().player_hand(),
            b.session().unwrap().player_hand()
        );
        assert_eq!(
            a.session().unwrap().hands[Side::Enemy],
            b.session().unwrap().hands[Side::Enemy]
        );
    }

    #[test]
    fn test_advance_moves_clock() {
        let mut game = recorded_game(1);
        game.advance(2500);
        assert_eq!(game.now_ms(), 2500);
        assert_eq!(game.session().unwrap().timer_remaining, 28);
    }

    #[test]
    fn test_clock_ceiling_does_not_overflow() {
        let mut game = Game::new(GameConfig::default(), 1).unwrap();
        game.advance(u64::MAX);
        assert_eq!(game.now_ms(), u64::MAX);

        game.start_game("Alice").unwrap();
        assert_eq!(game.advance(1_000), 1);
        assert_eq!(game.advance(u64::MAX), 0);

        let session = game.session().unwrap();
        assert_eq!(session.timer_remaining, 29);
        assert_eq!(session.phase, TurnPhase::PlayerSelect);
    }

    #[test]
    fn test_state_changes_are_announced() {
        let mut game = recorded_game(3);
        game.presenter_mut().clear();

        game.select_card(0).unwrap();

        let snapshot = game.presenter().last_snapshot().unwrap();
        assert_eq!(snapshot.selected, vec![0]);
        assert_eq!(
            game.presenter()
                .count(|e| matches!(e, PresenterEvent::StateChanged(_))),
            1
        );
    }
}
