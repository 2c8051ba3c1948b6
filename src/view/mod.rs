//! Observer contract between the game and whatever renders it.

pub mod event;

pub use event::{EventLog, ViewEvent, ViewObserver};
