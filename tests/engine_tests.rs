//! Match engine tests.
//!
//! These tests drive the flip state machine directly, without timers or a view:
//! - Ignored flips leave the round untouched
//! - Matches score the fixed bonus, mismatches never cost points
//! - Completing the board is terminal

use memory_match::{
    default_symbols, DealRng, Deck, FlipResult, IgnoreReason, MatchEngine, Phase, RoundState,
    Symbol,
};
use proptest::prelude::*;

fn dealt(seed: u64) -> MatchEngine {
    let deck = Deck::build(&default_symbols(), &mut DealRng::new(seed)).unwrap();
    MatchEngine::new(deck, 10)
}

/// Position of a card that does not pair with `position`.
fn non_partner(deck: &Deck, position: usize) -> usize {
    let partner = deck.partner_of(position).unwrap();
    (0..deck.len())
        .find(|p| *p != position && *p != partner)
        .unwrap()
}

/// Clear the whole board pair by pair.
fn solve(engine: &mut MatchEngine) -> Vec<FlipResult> {
    let mut results = Vec::new();
    for position in 0..engine.deck().len() {
        if engine.deck().card(position).unwrap().matched {
            continue;
        }
        let partner = engine.deck().partner_of(position).unwrap();
        results.push(engine.flip(position));
        results.push(engine.flip(partner));
    }
    results
}

/// Scenario: reveal, match, then mismatch on the default board.
#[test]
fn test_reveal_match_mismatch_scenario() {
    // Lay out the board so positions 0 and 1 pair, 2 and 3 do not.
    let mut layout: Vec<Symbol> = Vec::new();
    for symbol in default_symbols() {
        layout.push(symbol.clone());
        layout.push(symbol);
    }
    layout.swap(3, 4);
    let mut engine = MatchEngine::new(Deck::from_symbols(layout).unwrap(), 10);

    let first = engine.flip(0);
    assert!(!first.is_ignored());
    assert_eq!(
        first,
        FlipResult::FirstCardFlipped {
            position: 0,
            symbol: default_symbols()[0].clone()
        }
    );

    let second = engine.flip(1);
    assert!(matches!(
        second,
        FlipResult::MatchFound {
            score: 10,
            matched_pairs: 1,
            ..
        }
    ));
    assert_eq!(engine.round().score, 10);
    assert_eq!(engine.round().matched_pair_count, 1);

    engine.flip(2);
    assert_eq!(engine.flip(3), FlipResult::Mismatch { positions: [2, 3] });
    assert_eq!(engine.hide_mismatch(), Some([2, 3]));
    assert_eq!(engine.round().score, 10);
    assert!(!engine.deck().card(2).unwrap().face_up);
    assert!(!engine.deck().card(3).unwrap().face_up);
}

/// Test that solving the board ends in RoundComplete with the full score.
#[test]
fn test_full_round() {
    let mut engine = dealt(11);
    for _ in 0..25 {
        engine.tick();
    }

    let results = solve(&mut engine);
    let last = results.last().unwrap();
    let positions = last.resolved_positions().unwrap();
    let symbol = engine.deck().symbol_at(positions[0]).unwrap().clone();
    assert_eq!(engine.deck().symbol_at(positions[1]), Some(&symbol));
    assert_eq!(
        last,
        &FlipResult::RoundComplete {
            positions,
            symbol,
            score_delta: 10,
            score: 80,
            matched_pairs: 8,
            elapsed_seconds: 25,
        }
    );
    assert_eq!(engine.phase(), Phase::RoundComplete);
    assert_eq!(engine.round().matched_pair_count, 8);
    assert_eq!(engine.deck().matched_count(), 16);
}

/// Test that nothing mutates after the round completes.
#[test]
fn test_complete_round_is_frozen() {
    let mut engine = dealt(3);
    solve(&mut engine);
    let before = engine.round().clone();

    for position in 0..16 {
        assert_eq!(
            engine.flip(position),
            FlipResult::Ignored(IgnoreReason::RoundComplete)
        );
    }
    assert_eq!(engine.tick(), None);
    assert_eq!(engine.hide_mismatch(), None);
    assert_eq!(engine.round(), &before);
}

/// Test that reset returns a fresh state on the same layout.
#[test]
fn test_reset_keeps_layout() {
    let mut engine = dealt(8);
    let layout = engine.deck().symbols();
    solve(&mut engine);

    assert_eq!(engine.reset(), RoundState::new());
    assert_eq!(engine.phase(), Phase::Idle);
    assert_eq!(engine.deck().symbols(), layout);
    assert!(engine.deck().iter().all(|c| c.is_flippable()));
}

proptest! {
    /// Ignored flips never change the round state.
    #[test]
    fn prop_ignored_flips_change_nothing(seed in any::<u64>(), probes in prop::collection::vec(0usize..20, 1..30)) {
        let mut engine = dealt(seed);
        let first = 0;
        let other = non_partner(engine.deck(), first);
        engine.flip(first);
        engine.flip(other);
        prop_assert_eq!(engine.phase(), Phase::Resolving);

        let before = engine.round().clone();
        let faces: Vec<bool> = engine.deck().iter().map(|c| c.face_up).collect();
        for position in probes {
            let result = engine.flip(position);
            prop_assert!(result.is_ignored());
        }
        prop_assert_eq!(engine.round(), &before);
        let after: Vec<bool> = engine.deck().iter().map(|c| c.face_up).collect();
        prop_assert_eq!(faces, after);
    }

    /// A match adds exactly the bonus and one pair; a mismatch adds nothing.
    #[test]
    fn prop_scoring(seed in any::<u64>(), start in 0usize..16) {
        let mut engine = dealt(seed);
        let partner = engine.deck().partner_of(start).unwrap();

        engine.flip(start);
        engine.flip(partner);
        prop_assert_eq!(engine.round().score, 10);
        prop_assert_eq!(engine.round().matched_pair_count, 1);
        prop_assert!(engine.round().flipped_positions.is_empty());

        let next = (0..16).find(|p| engine.deck().card(*p).unwrap().is_flippable()).unwrap();
        let wrong = (0..16)
            .find(|p| {
                *p != next
                    && engine.deck().card(*p).unwrap().is_flippable()
                    && engine.deck().partner_of(next) != Some(*p)
            })
            .unwrap();
        engine.flip(next);
        let result = engine.flip(wrong);
        prop_assert_eq!(result, FlipResult::Mismatch { positions: [next, wrong] });
        prop_assert_eq!(engine.round().score, 10);
        engine.hide_mismatch();
        prop_assert!(engine.deck().card(next).unwrap().is_flippable());
        prop_assert!(engine.deck().card(wrong).unwrap().is_flippable());
    }

    /// Random click sequences keep the engine's invariants.
    #[test]
    fn prop_random_play_invariants(seed in any::<u64>(), clicks in prop::collection::vec(0usize..16, 0..200)) {
        let mut engine = dealt(seed);
        for position in clicks {
            engine.flip(position);
            if engine.phase() == Phase::Resolving {
                engine.hide_mismatch();
            }

            let round = engine.round();
            prop_assert!(round.flipped_positions.len() <= 2);
            prop_assert!(round.matched_pair_count <= 8);
            prop_assert_eq!(round.score, 10 * round.matched_pair_count as u32);
            prop_assert_eq!(engine.deck().matched_count(), 2 * round.matched_pair_count);
        }
    }
}
