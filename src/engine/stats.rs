//! Round summary figures.

use serde::{Deserialize, Serialize};

use super::state::RoundState;

/// Multiplier applied to the score when computing the bonus.
pub const DEFAULT_BONUS_MULTIPLIER: f64 = 1.5;

/// Snapshot of a round's time, score and derived bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStats {
    pub elapsed_seconds: u32,
    pub score: u32,
    pub bonus: u32,
}

impl RoundStats {
    /// Summarize a round using the default multiplier.
    #[must_use]
    pub fn from_round(round: &RoundState) -> Self {
        Self {
            elapsed_seconds: round.elapsed_seconds,
            score: round.score,
            bonus: calculate_bonus(round.score, DEFAULT_BONUS_MULTIPLIER),
        }
    }
}

/// `base * multiplier`, rounded to the nearest integer (halves round up).
///
/// Negative or non-finite products clamp to zero.
#[must_use]
pub fn calculate_bonus(base: u32, multiplier: f64) -> u32 {
    let bonus = (f64::from(base) * multiplier).round();
    if bonus.is_finite() && bonus > 0.0 {
        bonus.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
