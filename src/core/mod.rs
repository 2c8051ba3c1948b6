//! Core building blocks: RNG, configuration, errors.
//!
//! These are independent of any particular round and are shared by the
//! deck builder, the match engine and the controller.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{MatchConfig, TimingConfig, DEFAULT_MATCH_BONUS};
pub use error::ConfigError;
pub use rng::{DealRng, DealRngState};
