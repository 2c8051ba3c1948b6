//! Deck - the shuffled board for one round.
//!
//! A deck holds exactly `2N` cards for `N` distinct symbols, each symbol on
//! exactly two positions. Decks are built fresh for every round and never
//! reused.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::symbol::Symbol;
use crate::core::config::validate_symbols;
use crate::core::{ConfigError, DealRng};

/// An ordered board of cards, every symbol appearing twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deal a shuffled deck from a set of distinct symbols.
    ///
    /// The doubled symbol list is built in a private buffer and shuffled
    /// there; `symbols` is only read.
    ///
    /// Fails with `InvalidConfiguration` for fewer than two symbols or for
    /// duplicates.
    pub fn build(symbols: &[Symbol], rng: &mut DealRng) -> Result<Self, ConfigError> {
        validate_symbols(symbols)?;

        let mut layout: Vec<Symbol> = symbols.iter().chain(symbols.iter()).cloned().collect();
        rng.shuffle(&mut layout);

        Ok(Self::from_layout(layout))
    }

    /// Build a deck with a fixed layout.
    ///
    /// Every symbol in `layout` must appear exactly twice, and there must be
    /// at least two distinct symbols. Useful for replays and scripted tests.
    pub fn from_symbols(layout: Vec<Symbol>) -> Result<Self, ConfigError> {
        let mut counts: FxHashMap<&Symbol, usize> = FxHashMap::default();
        for symbol in &layout {
            *counts.entry(symbol).or_insert(0) += 1;
        }

        if let Some((symbol, count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(ConfigError::invalid(format!(
                "symbol {symbol} appears {count} times, expected 2"
            )));
        }
        if counts.len() < 2 {
            return Err(ConfigError::invalid(format!(
                "need at least 2 distinct symbols, got {}",
                counts.len()
            )));
        }

        Ok(Self::from_layout(layout))
    }

    fn from_layout(layout: Vec<Symbol>) -> Self {
        let cards = layout
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::new(position, symbol))
            .collect();
        Self { cards }
    }

    /// Number of cards (2N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck empty? A built deck never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs (N).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get a card by position.
    #[must_use]
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub(crate) fn card_mut(&mut self, position: usize) -> Option<&mut Card> {
        self.cards.get_mut(position)
    }

    /// Symbol at a position.
    #[must_use]
    pub fn symbol_at(&self, position: usize) -> Option<&Symbol> {
        self.cards.get(position).map(|c| &c.symbol)
    }

    /// Symbols in board order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.cards.iter().map(|c| c.symbol.clone()).collect()
    }

    /// The other position holding the same symbol.
    #[must_use]
    pub fn partner_of(&self, position: usize) -> Option<usize> {
        let symbol = self.symbol_at(position)?;
        self.cards
            .iter()
            .position(|c| c.position != position && &c.symbol == symbol)
    }

    /// Iterate over cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Turn every card face-down and unmatched, keeping the layout.
    pub(crate) fn conceal_all(&mut self) {
        for card in &mut self.cards {
            card.conceal();
        }
    }

    /// Number of cards currently matched.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
