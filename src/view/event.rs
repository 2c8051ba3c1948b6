//! Events emitted to the view layer.
//!
//! The controller never touches a rendering surface. It describes what
//! changed as `ViewEvent`s and hands them to every subscribed
//! `ViewObserver`; the view decides how to draw them.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::cards::Symbol;

/// Something the view should reflect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// A new board was dealt. Symbols are listed in board order, all face-down.
    DeckDealt { symbols: Vec<Symbol> },

    /// A card was turned face-up.
    CardRevealed { position: usize, symbol: Symbol },

    /// Cards were turned back face-down.
    CardsHidden { positions: Vec<usize> },

    /// The score changed.
    ScoreChanged { score: u32 },

    /// The round clock changed.
    TimeChanged { elapsed_seconds: u32 },

    /// Every pair was found.
    RoundCompleted { score: u32, elapsed_seconds: u32 },
}

impl ViewEvent {
    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ViewEvent::DeckDealt { .. } => "deck_dealt",
            ViewEvent::CardRevealed { .. } => "card_revealed",
            ViewEvent::CardsHidden { .. } => "cards_hidden",
            ViewEvent::ScoreChanged { .. } => "score_changed",
            ViewEvent::TimeChanged { .. } => "time_changed",
            ViewEvent::RoundCompleted { .. } => "round_completed",
        }
    }
}

/// Receiver of view events.
pub trait ViewObserver {
    /// Called once per event, in emission order.
    fn notify(&mut self, event: &ViewEvent);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ViewEvent),
{
    fn notify(&mut self, event: &ViewEvent) {
        self(event);
    }
}

/// Recording observer.
///
/// Clones share the same log, so one copy can be subscribed while another
/// is kept to inspect what was emitted.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<ViewEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Has nothing been recorded?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl ViewObserver for EventLog {
    fn notify(&mut self, event: &ViewEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
