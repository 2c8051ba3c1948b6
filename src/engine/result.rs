//! Outcomes of a flip.

use serde::{Deserialize, Serialize};

use crate::cards::Symbol;

/// Why a flip was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// No card at that position.
    OutOfRange,
    /// The card is already part of a matched pair.
    AlreadyMatched,
    /// The card is already face-up.
    AlreadyFaceUp,
    /// Two cards are face-up and unresolved.
    Resolving,
    /// Every pair has been found.
    RoundComplete,
    /// A new board is being dealt.
    Dealing,
}

/// Result of `MatchEngine::flip`.
///
/// The view reacts to each variant differently: reveal a face, hide a
/// mismatched pair after a delay, or show the round summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipResult {
    /// Nothing changed.
    Ignored(IgnoreReason),

    /// First card of a pair turned over.
    FirstCardFlipped { position: usize, symbol: Symbol },

    /// The two flipped cards share a symbol.
    MatchFound {
        positions: [usize; 2],
        symbol: Symbol,
        score_delta: u32,
        score: u32,
        matched_pairs: usize,
    },

    /// The two flipped cards differ. They stay face-up until hidden.
    Mismatch { positions: [usize; 2] },

    /// The final pair was matched.
    RoundComplete {
        positions: [usize; 2],
        symbol: Symbol,
        score_delta: u32,
        score: u32,
        matched_pairs: usize,
        elapsed_seconds: u32,
    },
}

impl FlipResult {
    /// Was the flip ignored?
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipResult::Ignored(_))
    }

    /// Positions resolved by this flip, if it was the second card.
    #[must_use]
    pub fn resolved_positions(&self) -> Option<[usize; 2]> {
        match self {
            FlipResult::MatchFound { positions, .. }
            | FlipResult::Mismatch { positions }
            | FlipResult::RoundComplete { positions, .. } => Some(*positions),
            FlipResult::Ignored(_) | FlipResult::FirstCardFlipped { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ignored() {
        assert!(FlipResult::Ignored(IgnoreReason::Resolving).is_ignored());
        assert!(!FlipResult::Mismatch { positions: [0, 1] }.is_ignored());
    }

    #[test]
    fn test_resolved_positions() {
        let first = FlipResult::FirstCardFlipped {
            position: 2,
            symbol: Symbol::from("🎨"),
        };
        assert_eq!(first.resolved_positions(), None);

        let mismatch = FlipResult::Mismatch { positions: [2, 5] };
        assert_eq!(mismatch.resolved_positions(), Some([2, 5]));
    }
}
