//! Card faces.
//!
//! A `Symbol` is the face printed on both cards of a pair. The engine only
//! compares symbols for equality; what a symbol looks like is up to the view.

use serde::{Deserialize, Serialize};

/// Face identity shared by the two cards of a pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol from a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label this symbol was created with.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Symbol {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Faces of the classic eight-pair board.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🌟", "🚀", "🎯", "🎨", "🎭", "🎪", "🎮", "🎲"];

/// The eight default symbols as owned values.
#[must_use]
pub fn default_symbols() -> Vec<Symbol> {
    DEFAULT_SYMBOLS.iter().copied().map(Symbol::from).collect()
}
