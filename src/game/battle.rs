//! Battle resolution.
//!
//! Committing a battle happens at once: both sides' cards leave their hands,
//! are valued, and go to the graveyard. Comparing the totals happens later,
//! after `resolve_delay_ms`, so the presenter can show the cards first. If
//! nobody is knocked out the next turn starts after `next_turn_delay_ms`.

use super::{require_phase, Game, GameTask};
use crate::cards::Card;
use crate::core::{ActionError, Side, SideMap};
use crate::events::Presenter;
use crate::rules::{select_enemy_cards, tally, BattleOutcome, GameResult};
use crate::session::{LogTag, TurnPhase};

impl<P: Presenter> Game<P> {
    /// Fight with the selected cards.
    ///
    /// The enemy answers with its strongest cards. Totals are compared once
    /// the resolve delay has elapsed on the game clock.
    pub fn commit_battle(&mut self) -> Result<(), ActionError> {
        let session = require_phase(&mut self.session, TurnPhase::PlayerSelect)
            .inspect_err(|e| log::debug!("rejected commit_battle: {e}"))?;
        if session.selected.is_empty() {
            log::debug!("rejected commit_battle: nothing selected");
            return Err(ActionError::NothingSelected);
        }
        session.phase = TurnPhase::Battle;
        self.cancel_timer();

        let Some(session) = self.session.as_mut() else {
            return Err(ActionError::NoGame);
        };
        let name = session.player_name.clone();

        let indices = std::mem::take(&mut session.selected);
        let player_cards = session.hands[Side::Player].remove_indices(&indices);
        let player = tally(&player_cards, &mut self.rng);
        for bonus in &player.bonuses {
            session.log(
                LogTag::Player,
                format!("{name} plays a WILD and gains +{bonus} points!"),
            );
        }
        session.log(
            LogTag::Player,
            format!("{name} attacks with a total value of {}.", player.total),
        );

        let enemy_cards = select_enemy_cards(
            &mut session.hands[Side::Enemy],
            &mut self.rng,
            self.config.enemy_max_play,
        );
        let enemy = tally(&enemy_cards, &mut self.rng);
        for bonus in &enemy.bonuses {
            session.log(
                LogTag::Enemy,
                format!("Enemy plays a WILD and gains +{bonus} points!"),
            );
        }
        session.log(
            LogTag::Enemy,
            format!("Enemy responds with a total value of {}.", enemy.total),
        );

        session
            .deck
            .discard(player_cards.iter().chain(enemy_cards.iter()).copied());
        session.battle_cards = SideMap::new(|side| match side {
            Side::Player => player_cards.clone(),
            Side::Enemy => enemy_cards.clone(),
        });
        session.pending = Some(self.scheduler.schedule_once(
            self.config.resolve_delay_ms,
            GameTask::ResolveBattle {
                player_total: player.total,
                enemy_total: enemy.total,
            },
        ));
        log::debug!(
            "battle committed: [{}] = {} vs [{}] = {}",
            card_names(&player_cards),
            player.total,
            card_names(&enemy_cards),
            enemy.total
        );

        self.presenter.on_battle_display(&player_cards, &enemy_cards);
        self.notify();
        Ok(())
    }

    /// Apply damage for a committed battle, then end the game or queue the
    /// next turn.
    pub(crate) fn resolve_battle(&mut self, player_total: u32, enemy_total: u32) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let name = session.player_name.clone();
        let outcome = BattleOutcome::from_totals(player_total, enemy_total);
        log::debug!("battle resolved: {player_total} vs {enemy_total}, {outcome:?}");

        if let Some(loser) = outcome.loser() {
            let damage = i32::try_from(outcome.damage()).unwrap_or(i32::MAX);
            session.hp[loser] = session.hp[loser].saturating_sub(damage);
        }
        let message = match outcome {
            BattleOutcome::PlayerWins { damage } => {
                format!("{name} wins the clash! Enemy loses {damage} HP.")
            }
            BattleOutcome::EnemyWins { damage } => {
                format!("Enemy wins the clash! {name} loses {damage} HP.")
            }
            BattleOutcome::Draw => "The clash is a draw! Nobody is hurt.".to_string(),
        };
        session.log(LogTag::System, message);

        if let Some(result) = GameResult::from_hp(session.player_hp(), session.enemy_hp()) {
            self.finish_game(result);
            return;
        }

        session.pending = Some(
            self.scheduler
                .schedule_once(self.config.next_turn_delay_ms, GameTask::BeginNextTurn),
        );
        self.notify();
    }

    fn finish_game(&mut self, result: GameResult) {
        self.cancel_timer();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(handle) = session.pending.take() {
            self.scheduler.cancel(handle);
        }
        session.phase = TurnPhase::GameOver;
        session.outcome = Some(result);

        let name = session.player_name.clone();
        let message = if result.player_won() {
            format!("{name} is victorious!")
        } else {
            format!("{name} has been defeated.")
        };
        session.log(LogTag::System, message);
        log::info!("game over for {name}: {result:?} on turn {}", session.turn_number);

        self.notify();
        self.presenter.on_game_over(result.player_won(), &name);
    }
}

fn card_names(cards: &[Card]) -> String {
    cards
        .iter()
        .map(Card::display_name)
        .collect::<Vec<_>>()
        .join(" ")
}
