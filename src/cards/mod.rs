//! Card system: symbols, cards, and the dealt deck.
//!
//! ## Key Types
//!
//! - `Symbol`: Opaque face identity, compared for equality only
//! - `Card`: One board position with its face-up/matched flags
//! - `Deck`: The shuffled board for a round, every symbol twice

pub mod card;
pub mod deck;
pub mod symbol;

pub use card::Card;
pub use deck::Deck;
pub use symbol::{default_symbols, Symbol, DEFAULT_SYMBOLS};
