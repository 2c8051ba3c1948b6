//! The match engine state machine.
//!
//! ```text
//!   Idle --flip--> OneFlipped --flip--> (evaluate)
//!     ^                                  |  match: score += bonus
//!     |                                  |  mismatch: stay Resolving
//!     +------- hide_mismatch() ----------+
//!   all pairs matched --> RoundComplete (terminal)
//! ```
//!
//! Evaluation happens synchronously inside the second `flip`. Presentation
//! delays belong to the caller: a mismatched pair stays face-up (and further
//! flips are ignored) until `hide_mismatch` is called.

use tracing::trace;

use super::result::{FlipResult, IgnoreReason};
use super::state::{Phase, RoundState};
use super::stats::RoundStats;
use crate::cards::Deck;

/// Card-flip state machine for a single round.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    deck: Deck,
    round: RoundState,
    match_bonus: u32,
}

impl MatchEngine {
    /// Start a round on a freshly dealt deck.
    #[must_use]
    pub fn new(deck: Deck, match_bonus: u32) -> Self {
        Self {
            deck,
            round: RoundState::new(),
            match_bonus,
        }
    }

    /// The board.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Current counters.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Points per matched pair.
    #[must_use]
    pub fn match_bonus(&self) -> u32 {
        self.match_bonus
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        Phase::of(&self.round, self.deck.pair_count())
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::RoundComplete
    }

    /// Time, score and bonus for the round so far.
    #[must_use]
    pub fn stats(&self) -> RoundStats {
        RoundStats::from_round(&self.round)
    }

    /// Turn over the card at `position`.
    ///
    /// Flips of matched or face-up cards, flips while two cards are pending,
    /// and flips after the round is complete leave the state untouched.
    pub fn flip(&mut self, position: usize) -> FlipResult {
        if let Err(reason) = self.check_flippable(position) {
            trace!(position, ?reason, "flip ignored");
            return FlipResult::Ignored(reason);
        }

        let Some(card) = self.deck.card_mut(position) else {
            return FlipResult::Ignored(IgnoreReason::OutOfRange);
        };
        card.face_up = true;
        let symbol = card.symbol.clone();
        self.round.flipped_positions.push(position);

        if self.round.flipped_positions.len() < 2 {
            return FlipResult::FirstCardFlipped { position, symbol };
        }
        self.evaluate()
    }

    fn check_flippable(&self, position: usize) -> Result<(), IgnoreReason> {
        match self.phase() {
            Phase::RoundComplete => return Err(IgnoreReason::RoundComplete),
            Phase::Resolving => return Err(IgnoreReason::Resolving),
            Phase::Idle | Phase::OneFlipped => {}
        }

        let card = self.deck.card(position).ok_or(IgnoreReason::OutOfRange)?;
        if card.matched {
            Err(IgnoreReason::AlreadyMatched)
        } else if card.face_up {
            Err(IgnoreReason::AlreadyFaceUp)
        } else {
            Ok(())
        }
    }

    fn evaluate(&mut self) -> FlipResult {
        let positions = [
            self.round.flipped_positions[0],
            self.round.flipped_positions[1],
        ];

        let (Some(first), Some(second)) = (
            self.deck.symbol_at(positions[0]),
            self.deck.symbol_at(positions[1]),
        ) else {
            return FlipResult::Mismatch { positions };
        };

        if first != second {
            return FlipResult::Mismatch { positions };
        }
        let symbol = first.clone();

        for position in positions {
            if let Some(card) = self.deck.card_mut(position) {
                card.matched = true;
            }
        }
        self.round.flipped_positions.clear();
        self.round.score = self.round.score.saturating_add(self.match_bonus);
        self.round.matched_pair_count += 1;

        if self.round.matched_pair_count == self.deck.pair_count() {
            FlipResult::RoundComplete {
                positions,
                symbol,
                score_delta: self.match_bonus,
                score: self.round.score,
                matched_pairs: self.round.matched_pair_count,
                elapsed_seconds: self.round.elapsed_seconds,
            }
        } else {
            FlipResult::MatchFound {
                positions,
                symbol,
                score_delta: self.match_bonus,
                score: self.round.score,
                matched_pairs: self.round.matched_pair_count,
            }
        }
    }

    /// Turn a mismatched pair back face-down.
    ///
    /// Returns the hidden positions, or `None` when nothing is pending.
    pub fn hide_mismatch(&mut self) -> Option<[usize; 2]> {
        if self.phase() != Phase::Resolving {
            return None;
        }

        let positions = [
            self.round.flipped_positions[0],
            self.round.flipped_positions[1],
        ];
        for position in positions {
            if let Some(card) = self.deck.card_mut(position) {
                card.face_up = false;
            }
        }
        self.round.flipped_positions.clear();
        Some(positions)
    }

    /// Advance the round clock by one second.
    ///
    /// Returns the new elapsed time, or `None` once the round is complete.
    pub fn tick(&mut self) -> Option<u32> {
        self.tick_by(1)
    }

    /// Advance the round clock by `seconds` at once. The clock saturates at
    /// `u32::MAX`.
    pub fn tick_by(&mut self, seconds: u32) -> Option<u32> {
        if self.is_complete() {
            return None;
        }
        self.round.elapsed_seconds = self.round.elapsed_seconds.saturating_add(seconds);
        Some(self.round.elapsed_seconds)
    }

    /// Clear the round and turn every card face-down, keeping the layout.
    ///
    /// Dealing a new layout is the deck builder's job; callers that start a
    /// new round construct a new engine instead.
    pub fn reset(&mut self) -> RoundState {
        self.deck.conceal_all();
        self.round = RoundState::new();
        self.round.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Symbol;

    /// a a b b c c
    fn engine() -> MatchEngine {
        let layout = ["a", "a", "b", "b", "c", "c"]
            .into_iter()
            .map(Symbol::from)
            .collect();
        MatchEngine::new(Deck::from_symbols(layout).unwrap(), 10)
    }

    #[test]
    fn test_first_flip() {
        let mut engine = engine();
        let result = engine.flip(0);

        assert_eq!(
            result,
            FlipResult::FirstCardFlipped {
                position: 0,
                symbol: Symbol::from("a")
            }
        );
        assert_eq!(engine.phase(), Phase::OneFlipped);
        assert!(engine.deck().card(0).unwrap().face_up);
    }

    #[test]
    fn test_match() {
        let mut engine = engine();
        engine.flip(0);
        let result = engine.flip(1);

        assert!(matches!(
            result,
            FlipResult::MatchFound {
                positions: [0, 1],
                score_delta: 10,
                score: 10,
                matched_pairs: 1,
                ..
            }
        ));
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(engine.round().flipped_positions.is_empty());
        assert!(engine.deck().card(0).unwrap().matched);
        assert!(engine.deck().card(1).unwrap().matched);
    }

    #[test]
    fn test_mismatch_blocks_until_hidden() {
        let mut engine = engine();
        engine.flip(0);
        assert_eq!(engine.flip(2), FlipResult::Mismatch { positions: [0, 2] });
        assert_eq!(engine.phase(), Phase::Resolving);
        assert_eq!(engine.round().score, 0);

        let before = engine.round().clone();
        assert_eq!(engine.flip(4), FlipResult::Ignored(IgnoreReason::Resolving));
        assert_eq!(engine.round(), &before);
        assert!(!engine.deck().card(4).unwrap().face_up);

        assert_eq!(engine.hide_mismatch(), Some([0, 2]));
        assert_eq!(engine.phase(), Phase::Idle);
        assert!(!engine.deck().card(0).unwrap().face_up);
        assert!(!engine.deck().card(2).unwrap().face_up);
        assert_eq!(engine.hide_mismatch(), None);
    }

    #[test]
    fn test_ignored_flips() {
        let mut engine = engine();
        assert_eq!(engine.flip(99), FlipResult::Ignored(IgnoreReason::OutOfRange));

        engine.flip(0);
        assert_eq!(engine.flip(0), FlipResult::Ignored(IgnoreReason::AlreadyFaceUp));
        engine.flip(1);
        assert_eq!(engine.flip(1), FlipResult::Ignored(IgnoreReason::AlreadyMatched));
        assert_eq!(engine.round().score, 10);
    }

    #[test]
    fn test_round_complete_is_terminal() {
        let mut engine = engine();
        engine.round.elapsed_seconds = 7;
        engine.flip(0);
        engine.flip(1);
        engine.flip(2);
        engine.flip(3);
        engine.flip(4);
        let result = engine.flip(5);

        assert_eq!(
            result,
            FlipResult::RoundComplete {
                positions: [4, 5],
                symbol: Symbol::from("c"),
                score_delta: 10,
                score: 30,
                matched_pairs: 3,
                elapsed_seconds: 7,
            }
        );
        assert!(engine.is_complete());

        let before = engine.round().clone();
        assert_eq!(engine.flip(0), FlipResult::Ignored(IgnoreReason::RoundComplete));
        assert_eq!(engine.tick(), None);
        assert_eq!(engine.round(), &before);
    }

    #[test]
    fn test_tick() {
        let mut engine = engine();
        assert_eq!(engine.tick(), Some(1));
        assert_eq!(engine.tick(), Some(2));
        assert_eq!(engine.round().elapsed_seconds, 2);
    }

    #[test]
    fn test_tick_by_saturates() {
        let mut engine = engine();
        assert_eq!(engine.tick_by(40), Some(40));
        assert_eq!(engine.tick_by(u32::MAX), Some(u32::MAX));
        assert_eq!(engine.tick(), Some(u32::MAX));
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        engine.tick();
        engine.flip(0);
        engine.flip(1);
        engine.flip(2);

        let fresh = engine.reset();
        assert_eq!(fresh, RoundState::new());
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.deck().matched_count(), 0);
        assert!(engine.deck().iter().all(|c| !c.face_up));
        assert_eq!(engine.deck().symbol_at(0), Some(&Symbol::from("a")));
    }

    #[test]
    fn test_stats() {
        let mut engine = engine();
        engine.flip(0);
        engine.flip(1);
        let stats = engine.stats();
        assert_eq!(stats.score, 10);
        assert_eq!(stats.bonus, 15);
    }
}
