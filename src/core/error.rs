//! Error types.
//!
//! The only failure the engine knows is a board that cannot be dealt.
//! Redundant input (flipping a matched card, flipping during resolution)
//! is ignored, never reported as an error.

use thiserror::Error;

/// Errors raised while validating a configuration or building a deck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration cannot produce a playable round.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
