//! Match engine: flip handling, match detection, round completion.
//!
//! The engine owns the deck and the `RoundState` for one round. It knows
//! nothing about time beyond the elapsed-seconds counter; the controller
//! decides when a mismatched pair is hidden and when the clock ticks.

pub mod matcher;
pub mod result;
pub mod state;
pub mod stats;

pub use matcher::MatchEngine;
pub use result::{FlipResult, IgnoreReason};
pub use state::{FlipBuffer, Phase, RoundState};
pub use stats::{calculate_bonus, RoundStats, DEFAULT_BONUS_MULTIPLIER};
