//! Game configuration.
//!
//! All tunable constants of a duel live in `GameConfig`. Defaults match the
//! classic rules: 100 HP, 6-card hands, 3-card draws, 30 second turns and
//! two wild cards in a 54-card deck.
//!
//! Configs can be built in code with the `with_*` builder methods or loaded
//! from JSON; missing JSON fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Number of standard (non-wild) cards: 4 suits × 13 ranks.
pub const STANDARD_CARD_COUNT: usize = 52;

/// Duel configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum cards a hand may hold. Draws stop at this limit.
    pub max_hand_size: usize,

    /// Seconds the player has to act each turn.
    pub turn_duration_secs: u32,

    /// Wild cards added to the 52 standard cards.
    pub wild_card_count: usize,

    /// Maximum cards the player may select for one battle.
    pub max_selectable: usize,

    /// Cards drawn by the once-per-turn draw action and by enemy refills.
    pub draw_count: usize,

    /// Hit points both sides start with.
    pub starting_hp: i32,

    /// Cards dealt to each side at game start.
    pub opening_hand_size: usize,

    /// The enemy refills (draws `draw_count`) when its hand drops below this.
    pub enemy_refill_threshold: usize,

    /// Upper bound of the random number of cards the enemy commits.
    pub enemy_max_play: u32,

    /// Battle log entries retained (oldest dropped first).
    pub log_capacity: usize,

    /// Milliseconds between countdown ticks.
    pub tick_interval_ms: u64,

    /// Delay between committing a battle and comparing totals.
    pub resolve_delay_ms: u64,

    /// Delay between a resolved battle and the next turn.
    pub next_turn_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hand_size: 6,
            turn_duration_secs: 30,
            wild_card_count: 2,
            max_selectable: 3,
            draw_count: 3,
            starting_hp: 100,
            opening_hand_size: 5,
            enemy_refill_threshold: 3,
            enemy_max_play: 3,
            log_capacity: 10,
            tick_interval_ms: 1000,
            resolve_delay_ms: 1500,
            next_turn_delay_ms: 1500,
        }
    }
}

impl GameConfig {
    /// Load a config from JSON. Missing fields use the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of cards in play: 52 standard plus the wild cards.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        STANDARD_CARD_COUNT + self.wild_card_count
    }

    /// Check that the parameters describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hand_size == 0 {
            return Err(ConfigError::ZeroField { field: "max_hand_size" });
        }
        if self.max_selectable == 0 {
            return Err(ConfigError::ZeroField { field: "max_selectable" });
        }
        if self.turn_duration_secs == 0 {
            return Err(ConfigError::ZeroField { field: "turn_duration_secs" });
        }
        if self.enemy_max_play == 0 {
            return Err(ConfigError::ZeroField { field: "enemy_max_play" });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroField { field: "tick_interval_ms" });
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::ZeroField { field: "log_capacity" });
        }
        if self.starting_hp <= 0 {
            return Err(ConfigError::NonPositiveHp { value: self.starting_hp });
        }
        if self.max_selectable > self.max_hand_size {
            return Err(ConfigError::SelectionExceedsHand {
                max_selectable: self.max_selectable,
                max_hand_size: self.max_hand_size,
            });
        }
        if self.opening_hand_size > self.max_hand_size {
            return Err(ConfigError::OpeningHandTooLarge {
                opening_hand_size: self.opening_hand_size,
                max_hand_size: self.max_hand_size,
            });
        }
        if self.opening_hand_size * 2 > self.total_cards() {
            return Err(ConfigError::DeckTooSmall {
                total_cards: self.total_cards(),
                needed: self.opening_hand_size * 2,
            });
        }
        Ok(())
    }

    /// Set the hand size limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set the turn duration in seconds.
    #[must_use]
    pub fn with_turn_duration(mut self, secs: u32) -> Self {
        self.turn_duration_secs = secs;
        self
    }

    /// Set the number of wild cards.
    #[must_use]
    pub fn with_wild_cards(mut self, count: usize) -> Self {
        self.wild_card_count = count;
        self
    }

    /// Set the selection cap.
    #[must_use]
    pub fn with_max_selectable(mut self, count: usize) -> Self {
        self.max_selectable = count;
        self
    }

    /// Set the draw count.
    #[must_use]
    pub fn with_draw_count(mut self, count: usize) -> Self {
        self.draw_count = count;
        self
    }

    /// Set the starting hit points.
    #[must_use]
    pub fn with_starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    /// Set both resolution delays at once.
    #[must_use]
    pub fn with_battle_delays(mut self, resolve_ms: u64, next_turn_ms: u64) -> Self {
        self.resolve_delay_ms = resolve_ms;
        self.next_turn_delay_ms = next_turn_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.max_hand_size, 6);
        assert_eq!(config.turn_duration_secs, 30);
        assert_eq!(config.wild_card_count, 2);
        assert_eq!(config.max_selectable, 3);
        assert_eq!(config.draw_count, 3);
        assert_eq!(config.starting_hp, 100);
        assert_eq!(config.total_cards(), 54);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_wild_cards(4)
            .with_starting_hp(20)
            .with_turn_duration(10)
            .with_battle_delays(0, 0);

        assert_eq!(config.wild_card_count, 4);
        assert_eq!(config.total_cards(), 56);
        assert_eq!(config.starting_hp, 20);
        assert_eq!(config.turn_duration_secs, 10);
        assert_eq!(config.resolve_delay_ms, 0);
        assert_eq!(config.next_turn_delay_ms, 0);
    }

    #[test]
    fn test_validate_rejects_zero_hand() {
        let config = GameConfig::default().with_max_hand_size(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroField { field: "max_hand_size" })
        );
    }

    #[test]
    fn test_validate_rejects_selection_above_hand() {
        let config = GameConfig::default().with_max_selectable(7);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SelectionExceedsHand { max_selectable: 7, max_hand_size: 6 })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_hp() {
        let config = GameConfig::default().with_starting_hp(0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveHp { value: 0 }));
    }

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{"starting_hp": 50, "wild_card_count": 0}"#).unwrap();
        assert_eq!(config.starting_hp, 50);
        assert_eq!(config.wild_card_count, 0);
        // Unspecified fields keep their defaults
        assert_eq!(config.max_hand_size, 6);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"max_selectable": 0}"#),
            Err(ConfigError::ZeroField { field: "max_selectable" })
        ));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_wild_cards(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
