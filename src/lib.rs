//! # memory-match
//!
//! Engine for a card-flip memory game: a board of face-down pairs, two
//! cards turned at a time, points for every pair found, and a clock running
//! until the board is cleared.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: Every round's counters live in a `RoundState` owned by
//!    the `MatchEngine`; nothing is global, so games can run side by side.
//!
//! 2. **Explicit Time**: Presentation delays and the round clock are tasks on
//!    a virtual-clock `Scheduler`. Each has a `TaskHandle` that cancels it, and
//!    starting a new round cancels everything from the previous one.
//!
//! 3. **Render-Agnostic**: The view subscribes to `ViewEvent`s and feeds
//!    clicks back in. No rendering code lives here.
//!
//! ## Modules
//!
//! - `core`: Deal RNG, configuration, errors
//! - `cards`: Symbols, cards, deck building
//! - `engine`: Flip state machine and scoring
//! - `schedule`: Deferred and periodic tasks
//! - `view`: Observer contract
//! - `game`: Controller tying everything together

pub mod cards;
pub mod core;
pub mod engine;
pub mod game;
pub mod schedule;
pub mod view;

// Re-export commonly used types
pub use crate::core::{ConfigError, DealRng, DealRngState, MatchConfig, TimingConfig};

pub use crate::cards::{default_symbols, Card, Deck, Symbol};

pub use crate::engine::{
    calculate_bonus, FlipResult, IgnoreReason, MatchEngine, Phase, RoundState, RoundStats,
};

pub use crate::schedule::{Scheduler, TaskHandle};

pub use crate::view::{EventLog, ViewEvent, ViewObserver};

pub use crate::game::GameController;
