//! Round state and phases.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Positions currently face-up and unresolved. Never more than two.
pub type FlipBuffer = SmallVec<[usize; 2]>;

/// Mutable per-round counters.
///
/// Owned by `MatchEngine` and changed only through its operations.
/// A fresh value is created at every round start.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Points earned this round.
    pub score: u32,

    /// Whole seconds elapsed since the timer started.
    pub elapsed_seconds: u32,

    /// Face-up positions awaiting resolution (0-2).
    pub flipped_positions: FlipBuffer,

    /// Pairs matched so far, in `[0, N]`.
    pub matched_pair_count: usize,
}

impl RoundState {
    /// Create an empty round state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Engine phase, derived from `RoundState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No card awaiting a partner.
    Idle,
    /// One card flipped, waiting for the second.
    OneFlipped,
    /// Two cards flipped; further flips are ignored until they are hidden.
    Resolving,
    /// All pairs matched. Terminal.
    RoundComplete,
}

impl Phase {
    /// Derive the phase from a round state and the deck's pair count.
    #[must_use]
    pub fn of(round: &RoundState, pair_count: usize) -> Self {
        if round.matched_pair_count >= pair_count {
            return Phase::RoundComplete;
        }
        match round.flipped_positions.len() {
            0 => Phase::Idle,
            1 => Phase::OneFlipped,
            _ => Phase::Resolving,
        }
    }

    /// Does this phase accept new flips?
    #[must_use]
    pub fn accepts_flips(self) -> bool {
        matches!(self, Phase::Idle | Phase::OneFlipped)
    }
}
