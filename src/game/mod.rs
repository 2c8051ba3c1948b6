//! Game controller: one owner for deck, engine, timers and observers.
//!
//! Several controllers can run side by side; they share no state.

mod controller;

pub use controller::GameController;
