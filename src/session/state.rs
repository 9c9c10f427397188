//! Session state: everything one duel needs to remember.
//!
//! ## GameSession
//!
//! The aggregate root of a duel. Created fresh by `Game::start_game`, mutated
//! only by the turn controller and the battle resolver, frozen once the phase
//! reaches `GameOver`, and replaced wholesale on restart.
//!
//! ## SessionSnapshot
//!
//! An immutable, serializable view handed to the presentation layer after
//! every change. Hit points are clamped at zero for display and the enemy
//! hand is reduced to its size.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::log::{BattleLog, LogEntry, LogTag};
use crate::cards::Card;
use crate::core::{GameConfig, GameRng, Side, SideMap};
use crate::rules::GameResult;
use crate::schedule::TaskHandle;
use crate::zones::{DeckManager, DrawReport, Hand};

/// Turn phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Awaiting player input: select, draw once, battle or end the turn.
    #[default]
    PlayerSelect,
    /// A committed battle is being resolved.
    Battle,
    /// Terminal: one side ran out of hit points.
    GameOver,
}

/// Indices of selected hand cards. Inline for the usual cap of 3.
pub type Selection = SmallVec<[usize; 3]>;

/// Full state of one duel.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Name shown in log messages.
    pub player_name: String,

    /// Hit points per side. May dip below zero until the game-over check.
    pub hp: SideMap<i32>,

    /// Hands per side.
    pub hands: SideMap<Hand>,

    /// Shared draw deck and graveyard.
    pub deck: DeckManager,

    /// Selected player-hand indices, in selection order.
    pub selected: Selection,

    pub phase: TurnPhase,

    /// Whether the once-per-turn draw was used.
    pub has_drawn_this_turn: bool,

    /// Turns started so far (the first turn is 1).
    pub turn_number: u32,

    /// Seconds left on the countdown.
    pub timer_remaining: u32,

    /// Battle log shown to the player.
    pub log: BattleLog,

    /// Cards on the table from the latest battle, until cleared.
    pub battle_cards: SideMap<Vec<Card>>,

    /// Set when the game ends.
    pub outcome: Option<GameResult>,

    max_hp: i32,
    turn_duration_secs: u32,

    /// The live countdown task.
    pub(crate) timer: Option<TaskHandle>,
    /// The pending battle resolution or next-turn task.
    pub(crate) pending: Option<TaskHandle>,
}

impl GameSession {
    /// Create a session with an unshuffled full deck and empty hands.
    #[must_use]
    pub fn new(player_name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            player_name: player_name.into(),
            hp: SideMap::with_value(config.starting_hp),
            hands: SideMap::with_default(),
            deck: DeckManager::new(config.wild_card_count),
            selected: Selection::new(),
            phase: TurnPhase::PlayerSelect,
            has_drawn_this_turn: false,
            turn_number: 0,
            timer_remaining: config.turn_duration_secs,
            log: BattleLog::new(config.log_capacity),
            battle_cards: SideMap::with_default(),
            outcome: None,
            max_hp: config.starting_hp,
            turn_duration_secs: config.turn_duration_secs,
            timer: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn player_hp(&self) -> i32 {
        self.hp[Side::Player]
    }

    #[must_use]
    pub fn enemy_hp(&self) -> i32 {
        self.hp[Side::Enemy]
    }

    #[must_use]
    pub fn player_hand(&self) -> &Hand {
        &self.hands[Side::Player]
    }

    #[must_use]
    pub fn enemy_hand(&self) -> &Hand {
        &self.hands[Side::Enemy]
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// The live countdown handle, if a turn timer is running.
    #[must_use]
    pub fn timer_handle(&self) -> Option<TaskHandle> {
        self.timer
    }

    /// Cards across deck, graveyard and both hands.
    ///
    /// Battle cards are already in the graveyard and are not counted twice.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.total_cards() + self.hands.iter().map(|(_, h)| h.len()).sum::<usize>()
    }

    /// Draw up to `count` cards into one side's hand.
    ///
    /// A reshuffle of the graveyard is recorded in the battle log.
    pub fn draw_for(
        &mut self,
        side: Side,
        count: usize,
        max_hand_size: usize,
        rng: &mut GameRng,
    ) -> DrawReport {
        let report = self
            .deck
            .draw_into(&mut self.hands[side], count, max_hand_size, rng);
        if let Some(moved) = report.reshuffled {
            self.log(
                LogTag::System,
                format!("Deck exhausted! Reshuffled {moved} cards from the graveyard."),
            );
        }
        report
    }

    /// Append a tagged message to the battle log.
    pub fn log(&mut self, tag: LogTag, message: impl Into<String>) {
        self.log.push(tag, message);
    }

    /// Name used in log lines for a side.
    #[must_use]
    pub fn name_of(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player_name,
            Side::Enemy => "Enemy",
        }
    }

    /// Immutable view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            player_name: self.player_name.clone(),
            player_hp: self.player_hp().max(0),
            enemy_hp: self.enemy_hp().max(0),
            max_hp: self.max_hp,
            player_hand: self.player_hand().cards().to_vec(),
            enemy_hand_size: self.enemy_hand().len(),
            selected: self.selected.to_vec(),
            deck_count: self.deck.deck_len(),
            graveyard_count: self.deck.graveyard_len(),
            phase: self.phase,
            has_drawn_this_turn: self.has_drawn_this_turn,
            turn_number: self.turn_number,
            timer_remaining: self.timer_remaining,
            timer_total: self.turn_duration_secs,
            game_over: self.is_game_over(),
            outcome: self.outcome,
            log: self.log.entries(),
        }
    }
}

/// What the presentation layer sees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub player_name: String,
    /// Clamped at 0.
    pub player_hp: i32,
    /// Clamped at 0.
    pub enemy_hp: i32,
    pub max_hp: i32,
    pub player_hand: Vec<Card>,
    /// The enemy hand is face down.
    pub enemy_hand_size: usize,
    pub selected: Vec<usize>,
    pub deck_count: usize,
    pub graveyard_count: usize,
    pub phase: TurnPhase,
    pub has_drawn_this_turn: bool,
    pub turn_number: u32,
    pub timer_remaining: u32,
    pub timer_total: u32,
    pub game_over: bool,
    pub outcome: Option<GameResult>,
    pub log: Vector<LogEntry>,
}
