//! Card - one position on the board.

use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// A card on the board.
///
/// Created face-down and unmatched when a deck is dealt. `face_up` and
/// `matched` change during play; the card is discarded with its deck when
/// the next round starts.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Index on the board, in `[0, 2N)`.
    pub position: usize,

    /// Face printed on this card.
    pub symbol: Symbol,

    /// Is the face currently shown?
    pub face_up: bool,

    /// Has this card been paired?
    pub matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card.
    #[must_use]
    pub fn new(position: usize, symbol: Symbol) -> Self {
        Self {
            position,
            symbol,
            face_up: false,
            matched: false,
        }
    }

    /// Can this card be turned over right now?
    #[must_use]
    pub fn is_flippable(&self) -> bool {
        !self.face_up && !self.matched
    }

    /// Turn the card face-down and clear its match.
    pub fn conceal(&mut self) {
        self.face_up = false;
        self.matched = false;
    }
}
