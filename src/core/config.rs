//! Game configuration types.
//!
//! Games configure the engine at startup by providing:
//! - The symbol set printed on card faces (one pair per symbol)
//! - The score awarded per matched pair
//! - `TimingConfig`: presentation delays and the timer period
//!
//! `MatchConfig::default()` reproduces the classic 4x4 board.

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{default_symbols, Symbol};

/// Default points awarded for each matched pair.
pub const DEFAULT_MATCH_BONUS: u32 = 10;

/// Presentation delays and the timer period.
///
/// These are scheduling directives for the controller. The match engine
/// itself never waits on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay between revealing the second card and presenting the outcome.
    pub evaluation_delay: Duration,

    /// How long a mismatched pair stays face-up once the outcome is shown.
    pub mismatch_hide_delay: Duration,

    /// Delay between the final match and the round-complete notification.
    pub completion_delay: Duration,

    /// Length of the reset animation before a fresh board is dealt.
    pub reset_delay: Duration,

    /// Period of the round timer.
    pub tick_interval: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            evaluation_delay: Duration::from_millis(500),
            mismatch_hide_delay: Duration::from_millis(1000),
            completion_delay: Duration::from_millis(500),
            reset_delay: Duration::from_millis(300),
            tick_interval: Duration::from_millis(1000),
        }
    }
}

impl TimingConfig {
    /// All presentation delays set to zero, timer period kept.
    ///
    /// Useful for headless play where nothing needs to be animated.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            evaluation_delay: Duration::ZERO,
            mismatch_hide_delay: Duration::ZERO,
            completion_delay: Duration::ZERO,
            reset_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Distinct card faces. Each appears exactly twice on the board.
    pub symbols: Vec<Symbol>,

    /// Points added to the score for each matched pair.
    pub match_bonus: u32,

    /// Presentation delays.
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            match_bonus: DEFAULT_MATCH_BONUS,
            timing: TimingConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Create a configuration for the given symbols with default scoring and timing.
    pub fn new(symbols: impl IntoIterator<Item = impl Into<Symbol>>) -> Self {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the per-match bonus.
    #[must_use]
    pub fn with_match_bonus(mut self, bonus: u32) -> Self {
        self.match_bonus = bonus;
        self
    }

    /// Set the timing configuration.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Number of pairs on the board (N).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of cards on the board (2N).
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.symbols.len() * 2
    }

    /// Check that this configuration can produce a playable round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_symbols(&self.symbols)?;
        if self.timing.tick_interval.is_zero() {
            return Err(ConfigError::invalid("tick interval must be non-zero"));
        }
        Ok(())
    }
}

/// Reject symbol sets that cannot form at least two distinct pairs.
pub(crate) fn validate_symbols(symbols: &[Symbol]) -> Result<(), ConfigError> {
    if symbols.len() < 2 {
        return Err(ConfigError::invalid(format!(
            "need at least 2 distinct symbols, got {}",
            symbols.len()
        )));
    }

    let mut seen = FxHashSet::default();
    for symbol in symbols {
        if !seen.insert(symbol) {
            return Err(ConfigError::invalid(format!("duplicate symbol {symbol}")));
        }
    }
    Ok(())
}
