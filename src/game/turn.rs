//! Turn and phase control.
//!
//! Player-side actions available during `PlayerSelect`, the start of each
//! turn, and the countdown timer. A turn ends either by committing a battle
//! (see `battle`) or by skipping, which the player can do explicitly or the
//! timer does on expiry.

use super::{require_phase, Game, GameTask};
use crate::core::{ActionError, Side};
use crate::events::Presenter;
use crate::schedule::TaskHandle;
use crate::session::{LogTag, TurnPhase};
use crate::zones::DrawReport;

impl<P: Presenter> Game<P> {
    /// Toggle the player's hand card at `index` in or out of the selection.
    ///
    /// Deselecting is always allowed; selecting fails once `max_selectable`
    /// cards are chosen.
    pub fn select_card(&mut self, index: usize) -> Result<(), ActionError> {
        let max = self.config.max_selectable;
        let session = require_phase(&mut self.session, TurnPhase::PlayerSelect)
            .inspect_err(|e| log::debug!("rejected select_card({index}): {e}"))?;

        let hand_size = session.player_hand().len();
        if index >= hand_size {
            return Err(ActionError::CardIndexOutOfRange { index, hand_size });
        }

        if let Some(pos) = session.selected.iter().position(|&i| i == index) {
            session.selected.remove(pos);
        } else if session.selected.len() >= max {
            return Err(ActionError::SelectionFull { max });
        } else {
            session.selected.push(index);
        }

        self.notify();
        Ok(())
    }

    /// Draw `draw_count` cards into the player's hand. Once per turn.
    ///
    /// The hand never grows past `max_hand_size`; the report says how many
    /// cards actually arrived.
    pub fn draw_card(&mut self) -> Result<DrawReport, ActionError> {
        let session = require_phase(&mut self.session, TurnPhase::PlayerSelect)
            .inspect_err(|e| log::debug!("rejected draw_card: {e}"))?;
        if session.has_drawn_this_turn {
            log::debug!("rejected draw_card: already drawn this turn");
            return Err(ActionError::AlreadyDrawn);
        }

        let report = session.draw_for(
            Side::Player,
            self.config.draw_count,
            self.config.max_hand_size,
            &mut self.rng,
        );
        session.has_drawn_this_turn = true;
        let noun = if report.drawn == 1 { "card" } else { "cards" };
        let message = format!("{} draws {} {noun}.", session.player_name, report.drawn);
        session.log(LogTag::Player, message);

        self.notify();
        Ok(report)
    }

    /// Skip the battle this turn: draw one card and move to the next turn.
    pub fn end_turn(&mut self) -> Result<(), ActionError> {
        require_phase(&mut self.session, TurnPhase::PlayerSelect)
            .inspect_err(|e| log::debug!("rejected end_turn: {e}"))?;
        self.skip_turn();
        Ok(())
    }

    fn skip_turn(&mut self) {
        self.cancel_timer();
        if let Some(session) = self.session.as_mut() {
            let message = format!("{} skips the turn and draws 1 card.", session.player_name);
            session.log(LogTag::Player, message);
            session.draw_for(Side::Player, 1, self.config.max_hand_size, &mut self.rng);
        }
        self.start_turn();
    }

    /// Begin a turn: reset per-turn state, refill the enemy, restart the
    /// countdown.
    pub(crate) fn start_turn(&mut self) {
        self.cancel_timer();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.phase = TurnPhase::PlayerSelect;
        session.has_drawn_this_turn = false;
        session.selected.clear();

        if session.enemy_hand().len() < self.config.enemy_refill_threshold {
            session.draw_for(
                Side::Enemy,
                self.config.draw_count,
                self.config.max_hand_size,
                &mut self.rng,
            );
        }

        session.turn_number += 1;
        let total = self.config.turn_duration_secs;
        session.timer_remaining = total;
        session.timer = Some(
            self.scheduler
                .schedule_repeating(self.config.tick_interval_ms, GameTask::TurnTick),
        );
        log::debug!("turn {} begins", session.turn_number);

        self.presenter.on_timer_tick(total, total);
        self.notify();
    }

    /// One countdown step. Only the live timer during `PlayerSelect` counts
    /// down; any other tick is cancelled and ignored.
    pub(crate) fn on_turn_tick(&mut self, handle: TaskHandle) {
        let session = match self.session.as_mut() {
            Some(session) if session.timer == Some(handle) && session.phase == TurnPhase::PlayerSelect => {
                session
            }
            _ => {
                self.scheduler.cancel(handle);
                log::debug!("dropping stale timer tick {handle}");
                return;
            }
        };

        session.timer_remaining = session.timer_remaining.saturating_sub(1);
        let remaining = session.timer_remaining;
        self.presenter
            .on_timer_tick(remaining, self.config.turn_duration_secs);

        if remaining == 0 {
            log::info!("turn {} timed out", session.turn_number);
            let message = format!("Time's up! {} skips this turn.", session.player_name);
            session.log(LogTag::Player, message);
            self.skip_turn();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{ActionError, GameConfig, Side};
    use crate::events::Recorder;
    use crate::session::TurnPhase;
    use crate::Game;

    fn started(seed: u64) -> Game<Recorder> {
        let mut game = Game::with_presenter(GameConfig::default(), seed, Recorder::new()).unwrap();
        game.start_game("Alice").unwrap();
        game
    }

    #[test]
    fn test_select_toggles() {
        let mut game = started(1);

        game.select_card(2).unwrap();
        game.select_card(0).unwrap();
        assert_eq!(game.session().unwrap().selected.as_slice(), &[2, 0]);

        game.select_card(2).unwrap();
        assert_eq!(game.session().unwrap().selected.as_slice(), &[0]);
    }

    #[test]
    fn test_select_bounded() {
        let mut game = started(1);
        for i in 0..3 {
            game.select_card(i).unwrap();
        }

        assert_eq!(game.select_card(3), Err(ActionError::SelectionFull { max: 3 }));
        assert_eq!(game.session().unwrap().selected.len(), 3);

        // Deselecting still works at the cap
        game.select_card(1).unwrap();
        assert_eq!(game.session().unwrap().selected.as_slice(), &[0, 2]);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut game = started(1);
        assert_eq!(
            game.select_card(5),
            Err(ActionError::CardIndexOutOfRange { index: 5, hand_size: 5 })
        );
        assert!(game.session().unwrap().selected.is_empty());
    }

    #[test]
    fn test_draw_once_per_turn() {
        let mut game = started(2);

        let report = game.draw_card().unwrap();
        // Opening hand of 5, limit 6
        assert_eq!(report.drawn, 1);
        assert_eq!(game.session().unwrap().player_hand().len(), 6);
        assert!(game.session().unwrap().log.contains("Alice draws 1 card."));

        assert_eq!(game.draw_card(), Err(ActionError::AlreadyDrawn));
        assert_eq!(game.session().unwrap().player_hand().len(), 6);
    }

    #[test]
    fn test_draw_log_pluralizes() {
        let mut game = started(2);
        {
            let session = game.session_mut().unwrap();
            let spent = session.hands[Side::Player].take_front(3);
            session.deck.discard(spent);
        }

        let report = game.draw_card().unwrap();

        assert_eq!(report.drawn, 3);
        assert!(game.session().unwrap().log.contains("Alice draws 3 cards."));
    }

    #[test]
    fn test_end_turn() {
        let mut game = started(3);
        game.draw_card().unwrap();
        game.select_card(0).unwrap();

        game.end_turn().unwrap();

        let session = game.session().unwrap();
        assert_eq!(session.phase, TurnPhase::PlayerSelect);
        assert_eq!(session.turn_number, 2);
        assert!(!session.has_drawn_this_turn);
        assert!(session.selected.is_empty());
        assert!(session.log.contains("Alice skips the turn and draws 1 card."));
        // Hand was already full
        assert_eq!(session.player_hand().len(), 6);
    }

    #[test]
    fn test_end_turn_restarts_timer() {
        let mut game = started(3);
        game.advance(5_000);
        assert_eq!(game.session().unwrap().timer_remaining, 25);

        let old = game.session().unwrap().timer_handle();
        game.end_turn().unwrap();

        let session = game.session().unwrap();
        assert_eq!(session.timer_remaining, 30);
        assert_ne!(session.timer_handle(), old);
        assert_eq!(game.pending_tasks(), 1);
    }

    #[test]
    fn test_enemy_refills_below_threshold() {
        let mut game = started(4);
        {
            let session = game.session_mut().unwrap();
            let enemy = &mut session.hands[Side::Enemy];
            let spent = enemy.take_front(3);
            session.deck.discard(spent);
        }
        assert_eq!(game.session().unwrap().enemy_hand().len(), 2);

        game.end_turn().unwrap();

        assert_eq!(game.session().unwrap().enemy_hand().len(), 5);
    }

    #[test]
    fn test_enemy_keeps_hand_at_threshold() {
        let mut game = started(4);
        {
            let session = game.session_mut().unwrap();
            let spent = session.hands[Side::Enemy].take_front(2);
            session.deck.discard(spent);
        }

        game.end_turn().unwrap();

        assert_eq!(game.session().unwrap().enemy_hand().len(), 3);
    }

    #[test]
    fn test_timer_expiry_skips_turn() {
        let mut game = started(5);
        game.advance(29_000);
        assert_eq!(game.session().unwrap().timer_remaining, 1);
        assert_eq!(game.session().unwrap().turn_number, 1);

        game.advance(1_000);

        let session = game.session().unwrap();
        assert_eq!(session.turn_number, 2);
        assert_eq!(session.timer_remaining, 30);
        assert!(session.log.contains("Time's up! Alice skips this turn."));
        assert!(game.presenter().timer_ticks().contains(&(0, 30)));
    }

    #[test]
    fn test_actions_rejected_outside_select() {
        let mut game = started(6);
        game.select_card(0).unwrap();
        game.commit_battle().unwrap();

        let wrong = Err(ActionError::WrongPhase {
            expected: TurnPhase::PlayerSelect,
            actual: TurnPhase::Battle,
        });
        assert_eq!(game.select_card(0), wrong);
        assert_eq!(game.end_turn(), wrong);
        assert_eq!(game.draw_card().map(|_| ()), wrong);
    }
}
