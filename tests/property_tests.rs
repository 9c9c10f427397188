//! Property-based tests over random action sequences.
//!
//! Whatever the player does and however time passes, cards are never
//! created or lost, the selection stays bounded, and the draw is once per
//! turn.

use card_duel::{
    ActionError, BattleOutcome, Card, Game, GameConfig, GameRng, Hand, Rank, Side, Suit,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Select(usize),
    Draw,
    Commit,
    EndTurn,
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..8).prop_map(Op::Select),
        2 => Just(Op::Draw),
        2 => Just(Op::Commit),
        1 => Just(Op::EndTurn),
        3 => (0u64..4_000).prop_map(Op::Advance),
    ]
}

fn apply(game: &mut Game, op: &Op) {
    let _ = match *op {
        Op::Select(index) => game.select_card(index),
        Op::Draw => game.draw_card().map(|_| ()),
        Op::Commit => game.commit_battle(),
        Op::EndTurn => game.end_turn(),
        Op::Advance(ms) => {
            game.advance(ms);
            Ok(())
        }
    };
}

proptest! {
    #[test]
    fn proptest_cards_are_conserved(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..80)
    ) {
        let config = GameConfig::default();
        let total = config.total_cards();
        let mut game = Game::new(config, seed).unwrap();
        game.start_game("Prop").unwrap();

        for op in &ops {
            apply(&mut game, op);
            let session = game.session().unwrap();
            prop_assert_eq!(session.card_count(), total);
            for (_, hand) in session.hands.iter() {
                prop_assert!(hand.len() <= game.config().max_hand_size);
            }
        }
    }

    #[test]
    fn proptest_selection_bounded(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..80)
    ) {
        let mut game = Game::new(GameConfig::default(), seed).unwrap();
        game.start_game("Prop").unwrap();

        for op in &ops {
            apply(&mut game, op);
            let session = game.session().unwrap();
            prop_assert!(session.selected.len() <= 3);
            for &index in &session.selected {
                prop_assert!(index < session.player_hand().len());
            }
        }
    }

    #[test]
    fn proptest_draw_gated_per_turn(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..80)
    ) {
        let mut game = Game::new(GameConfig::default(), seed).unwrap();
        game.start_game("Prop").unwrap();

        for op in &ops {
            apply(&mut game, op);

            let session = game.session().unwrap();
            if session.phase != card_duel::TurnPhase::PlayerSelect {
                continue;
            }
            let before = session.player_hand().len();
            let already = session.has_drawn_this_turn;

            let result = game.draw_card();
            let after = game.session().unwrap().player_hand().len();
            if already {
                prop_assert_eq!(result, Err(ActionError::AlreadyDrawn));
                prop_assert_eq!(after, before);
            }

            // A second draw in the same turn never adds cards
            prop_assert_eq!(game.draw_card(), Err(ActionError::AlreadyDrawn));
            prop_assert_eq!(game.session().unwrap().player_hand().len(), after);
        }
    }

    #[test]
    fn proptest_damage_symmetry(player_total in 0u32..200, enemy_total in 0u32..200) {
        prop_assume!(player_total != enemy_total);
        let outcome = BattleOutcome::from_totals(player_total, enemy_total);

        prop_assert_eq!(outcome.damage(), player_total.abs_diff(enemy_total));
        let expected_loser = if player_total > enemy_total { Side::Enemy } else { Side::Player };
        prop_assert_eq!(outcome.loser(), Some(expected_loser));
    }

    #[test]
    fn proptest_damage_applied_to_loser_only(
        seed in any::<u64>(),
        player_rank in 0usize..13,
        enemy_rank in 0usize..13,
    ) {
        prop_assume!(player_rank != enemy_rank);
        let player_card = Card::new(Suit::Hearts, Rank::STANDARD[player_rank]);
        let enemy_card = Card::new(Suit::Clubs, Rank::STANDARD[enemy_rank]);

        let mut game = Game::new(GameConfig::default(), seed).unwrap();
        game.start_game("Prop").unwrap();
        {
            let session = game.session_mut().unwrap();
            for side in Side::ALL {
                let old = std::mem::take(&mut session.hands[side]);
                session.deck.discard(old.cards().iter().copied());
            }
            session.hands[Side::Player] = Hand::from_cards(vec![player_card]);
            session.hands[Side::Enemy] = Hand::from_cards(vec![enemy_card]);
        }

        game.select_card(0).unwrap();
        game.commit_battle().unwrap();
        game.advance(1_500);

        let session = game.session().unwrap();
        let diff = i32::from(player_card.base_value) - i32::from(enemy_card.base_value);
        if diff > 0 {
            prop_assert_eq!(session.enemy_hp(), 100 - diff);
            prop_assert_eq!(session.player_hp(), 100);
        } else {
            prop_assert_eq!(session.player_hp(), 100 + diff);
            prop_assert_eq!(session.enemy_hp(), 100);
        }
    }
}

// =============================================================================
// Shuffle Fairness
// =============================================================================

/// Every ordering of a three-card deck comes up about equally often.
#[test]
fn test_shuffle_fairness() {
    const TRIALS: usize = 60_000;
    const TOLERANCE: usize = 600;

    let mut rng = GameRng::new(2024);
    let mut counts = std::collections::HashMap::new();

    for _ in 0..TRIALS {
        let mut deck = [0u8, 1, 2];
        rng.shuffle(&mut deck);
        *counts.entry(deck).or_insert(0usize) += 1;
    }

    assert_eq!(counts.len(), 6, "all six permutations should appear");
    let expected = TRIALS / 6;
    for (perm, &count) in &counts {
        assert!(
            count.abs_diff(expected) <= TOLERANCE,
            "permutation {perm:?} appeared {count} times, expected about {expected}"
        );
    }
}
