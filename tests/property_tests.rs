//! Property-based tests for the sequence game.
//!
//! These verify the invariants that must hold for every sequence and every
//! player behaviour, using randomized testing with proptest.

use proptest::prelude::*;

use simon_says::io::{RecordingClock, RecordingReporter, SimulatedPlayer};
use simon_says::{GameConfig, GamePhase, GameRunner, GuessOutcome, SequenceGame, Symbol};

/// A sequence, the round the player fails in, the position of the wrong
/// guess within that round, and how far off the wrong symbol is.
fn failing_game() -> impl Strategy<Value = (Vec<u8>, usize, usize, u8)> {
    prop::collection::vec(0u8..4, 1..12).prop_flat_map(|sequence| {
        let len = sequence.len();
        (Just(sequence), 1..=len).prop_flat_map(|(sequence, fail_round)| {
            (Just(sequence), Just(fail_round), 0..fail_round, 1u8..4)
        })
    })
}

/// Play `sequence` with a player who errs once, at `fail_position` of
/// `fail_round`, and keeps giving correct symbols afterwards.
///
/// Returns the game and the length of the sequence at every playback.
fn play(sequence: &[u8], fail_round: usize, fail_position: usize, offset: u8) -> (SequenceGame, Vec<usize>) {
    let mut game = SequenceGame::new(4);
    let mut lengths = Vec::new();
    game.start(Symbol(sequence[0])).unwrap();

    for round in 1..=fail_round {
        lengths.push(game.round());
        game.finish_playback().unwrap();

        for position in 0..round {
            let correct = sequence[position];
            let guess = if round == fail_round && position == fail_position {
                (correct + offset) % 4
            } else {
                correct
            };

            if game.phase() == GamePhase::Finished {
                // Further guesses are refused
                assert!(game.submit(Symbol(guess)).is_err());
                continue;
            }

            match game.submit(Symbol(guess)).unwrap() {
                GuessOutcome::RoundComplete => game.begin_round(Symbol(sequence[round % sequence.len()])).unwrap(),
                GuessOutcome::Correct | GuessOutcome::Mismatch(_) => {}
            }
        }
    }

    (game, lengths)
}

mod engine_properties {
    use super::*;

    proptest! {
        #[test]
        fn mismatch_finishes_at_first_wrong_guess(
            (sequence, fail_round, fail_position, offset) in failing_game()
        ) {
            let (game, _) = play(&sequence, fail_round, fail_position, offset);

            prop_assert_eq!(game.phase(), GamePhase::Finished);
            let mismatch = game.mismatch().unwrap();
            prop_assert_eq!(mismatch.position, fail_position);
            prop_assert_eq!(game.guesses().len(), fail_position + 1);
            prop_assert_ne!(mismatch.expected, mismatch.actual);
        }

        #[test]
        fn score_counts_completed_rounds(
            (sequence, fail_round, fail_position, offset) in failing_game()
        ) {
            let (game, _) = play(&sequence, fail_round, fail_position, offset);

            prop_assert_eq!(game.score(), Some((fail_round - 1) as u32));
            prop_assert_eq!(game.score(), Some((game.round() - 1) as u32));
        }

        #[test]
        fn sequence_grows_by_one_per_round(
            (sequence, fail_round, fail_position, offset) in failing_game()
        ) {
            let (_, lengths) = play(&sequence, fail_round, fail_position, offset);

            let expected: Vec<usize> = (1..=fail_round).collect();
            prop_assert_eq!(lengths, expected);
        }

        #[test]
        fn earlier_sequences_are_prefixes(
            symbols in prop::collection::vec(0u8..4, 1..16)
        ) {
            let mut game = SequenceGame::new(4);
            let mut snapshots = Vec::new();
            game.start(Symbol(symbols[0])).unwrap();

            for round in 1..symbols.len() {
                snapshots.push(game.sequence_snapshot());
                game.finish_playback().unwrap();
                let current: Vec<Symbol> = game.sequence().iter().copied().collect();
                for symbol in current {
                    game.submit(symbol).unwrap();
                }
                game.begin_round(Symbol(symbols[round])).unwrap();
            }
            snapshots.push(game.sequence_snapshot());

            let last = snapshots.last().unwrap().clone();
            for snapshot in &snapshots {
                prop_assert_eq!(&last.take(snapshot.len()), snapshot);
            }
        }

        #[test]
        fn empty_samples_change_nothing(first in 0u8..4, gap in 0usize..50) {
            let mut game = SequenceGame::new(4);
            game.start(Symbol(first)).unwrap();
            game.finish_playback().unwrap();

            for _ in 0..gap {
                prop_assert_eq!(game.sample(None).unwrap(), None);
                prop_assert!(game.guesses().is_empty());
                prop_assert_eq!(game.phase(), GamePhase::Collecting);
            }
            prop_assert_eq!(
                game.sample(Some(Symbol(first))).unwrap(),
                Some(GuessOutcome::RoundComplete)
            );
            prop_assert_eq!(game.completed_rounds(), 1);
        }
    }
}

mod runner_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn simulated_player_scores_its_fail_round(
            seed in any::<u64>(),
            symbol_count in 2u8..8,
            fail_round in 1usize..10,
            hesitation in 0usize..4,
        ) {
            let player = SimulatedPlayer::new(symbol_count, fail_round).with_hesitation(hesitation);
            let reporter = RecordingReporter::new();

            let mut runner = GameRunner::builder(GameConfig::new(symbol_count).with_seed(seed), player.hands())
                .sink(player.eyes())
                .reporter(reporter.clone())
                .clock(RecordingClock::new())
                .build()
                .unwrap();

            let outcome = runner.run().unwrap();

            prop_assert_eq!(outcome.score as usize, fail_round - 1);
            prop_assert_eq!(outcome.sequence.len(), fail_round);
            prop_assert!(outcome.sequence.iter().all(|s| s.is_valid(symbol_count)));
            prop_assert_eq!(reporter.scores(), vec![outcome.score]);
        }
    }
}
