//! Round controller.
//!
//! `GameController` is the single owner of everything a running game needs:
//! configuration, the deal RNG, the match engine for the current round, the
//! task scheduler and the view observers. The view translates user input into
//! `user_flipped`, `round_start_requested` and `round_reset_requested`, and
//! drives time with `advance`.
//!
//! ## Timing
//!
//! With the default `TimingConfig`:
//! - second card flipped: outcome presented 500ms later, flips ignored until then
//! - mismatch: pair hidden a further 1000ms later
//! - final match: timer stops at once, `RoundCompleted` 500ms after the outcome
//! - start/reset: everything pending is cancelled, new board dealt after 300ms
//! - timer: `TimeChanged` every 1000ms while running
//!
//! Zero delays run before the triggering call returns.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::cards::Deck;
use crate::core::{ConfigError, DealRng, MatchConfig};
use crate::engine::{FlipResult, IgnoreReason, MatchEngine, Phase, RoundState, RoundStats};
use crate::schedule::{Scheduler, TaskHandle};
use crate::view::{ViewEvent, ViewObserver};

/// Work deferred by a presentation delay or the round timer.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Deferred {
    /// Show the outcome of a resolved pair.
    PresentOutcome(FlipResult),
    /// Turn a mismatched pair face-down.
    HideMismatch,
    /// Tell the view the round is over.
    AnnounceCompletion { score: u32, elapsed_seconds: u32 },
    /// Reset animation finished; deal a fresh board.
    Deal { start_timer: bool },
    /// Timer periods elapsed.
    Tick,
}

/// Owns one game and mediates between the engine and the view.
pub struct GameController {
    config: MatchConfig,
    rng: DealRng,
    engine: MatchEngine,
    scheduler: Scheduler<Deferred>,
    /// Periodic tick, when the round clock is running.
    timer: Option<TaskHandle>,
    /// Pending deal, while the reset animation plays.
    dealing: Option<TaskHandle>,
    /// Pending outcome of a resolved pair.
    presenting: Option<TaskHandle>,
    round_number: u32,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl GameController {
    /// Create a game with a deterministic deal sequence.
    ///
    /// The first board is dealt immediately; the clock is not running until
    /// a round start is requested.
    pub fn new(config: MatchConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, DealRng::new(seed))
    }

    /// Create a game seeded from the operating system.
    pub fn with_entropy(config: MatchConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, DealRng::from_entropy())
    }

    fn with_rng(config: MatchConfig, mut rng: DealRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let deck = Deck::build(&config.symbols, &mut rng)?;
        debug!(
            seed = rng.seed(),
            pairs = config.pair_count(),
            "game created"
        );

        Ok(Self {
            engine: MatchEngine::new(deck, config.match_bonus),
            config,
            rng,
            scheduler: Scheduler::new(),
            timer: None,
            dealing: None,
            presenting: None,
            round_number: 1,
            observers: Vec::new(),
        })
    }

    /// Register a view observer.
    ///
    /// The observer is brought up to date straight away with the current
    /// board, score and time.
    pub fn subscribe(&mut self, mut observer: impl ViewObserver + 'static) {
        let round = self.engine.round();
        observer.notify(&ViewEvent::DeckDealt {
            symbols: self.engine.deck().symbols(),
        });
        observer.notify(&ViewEvent::ScoreChanged { score: round.score });
        observer.notify(&ViewEvent::TimeChanged {
            elapsed_seconds: round.elapsed_seconds,
        });
        self.observers.push(Box::new(observer));
    }

    // === Inputs ===

    /// The player clicked the card at `position`.
    pub fn user_flipped(&mut self, position: usize) -> FlipResult {
        if self.dealing.is_some() {
            trace!(position, "flip ignored while dealing");
            return FlipResult::Ignored(IgnoreReason::Dealing);
        }

        if self.presenting.is_some() && !self.engine.is_complete() {
            trace!(position, "flip ignored while presenting outcome");
            return FlipResult::Ignored(IgnoreReason::Resolving);
        }

        let result = self.engine.flip(position);
        match result {
            FlipResult::Ignored(_) => return result,
            FlipResult::FirstCardFlipped {
                position,
                ref symbol,
            } => {
                self.emit(ViewEvent::CardRevealed {
                    position,
                    symbol: symbol.clone(),
                });
            }
            FlipResult::MatchFound { .. }
            | FlipResult::Mismatch { .. }
            | FlipResult::RoundComplete { .. } => {
                if let Some(symbol) = self.engine.deck().symbol_at(position).cloned() {
                    self.emit(ViewEvent::CardRevealed { position, symbol });
                }
                if matches!(result, FlipResult::RoundComplete { .. }) {
                    self.stop_timer();
                }
                self.presenting = Some(self.scheduler.schedule_once(
                    self.config.timing.evaluation_delay,
                    Deferred::PresentOutcome(result.clone()),
                ));
            }
        }

        self.run_due(self.scheduler.now());
        result
    }

    /// Start (or restart) a round with the clock running.
    pub fn round_start_requested(&mut self) {
        self.begin_reset(true);
    }

    /// Reset the board without starting the clock.
    pub fn round_reset_requested(&mut self) {
        self.begin_reset(false);
    }

    /// Let `elapsed` pass, running every task that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now().saturating_add(elapsed);
        self.run_due(until);
        self.scheduler.advance_clock(until);
    }

    // === Accessors ===

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        self.engine.deck()
    }

    /// Current round counters.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        self.engine.round()
    }

    /// Current phase. A matched pair counts as `Resolving` until its
    /// outcome has been presented.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.engine.phase() {
            Phase::Idle if self.presenting.is_some() => Phase::Resolving,
            phase => phase,
        }
    }

    /// Time, score and bonus for the current round.
    #[must_use]
    pub fn stats(&self) -> RoundStats {
        self.engine.stats()
    }

    /// Rounds dealt so far, counting the initial board.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Is a reset animation in progress?
    #[must_use]
    pub fn is_dealing(&self) -> bool {
        self.dealing.is_some()
    }

    /// Is the round clock running?
    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer
            .is_some_and(|handle| self.scheduler.is_scheduled(handle))
    }

    /// Time since the controller was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Tasks waiting on the scheduler, including the timer.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    // === Internals ===

    fn begin_reset(&mut self, start_timer: bool) {
        self.stop_timer();
        self.presenting = None;
        let dropped = self.scheduler.cancel_all();
        debug!(dropped, start_timer, "round reset requested");

        self.dealing = Some(
            self.scheduler
                .schedule_once(self.config.timing.reset_delay, Deferred::Deal { start_timer }),
        );
        self.run_due(self.scheduler.now());
    }

    fn run_due(&mut self, until: Duration) {
        while let Some((task, runs)) = self.scheduler.pop_due_batch(until) {
            self.run(task, runs);
        }
    }

    fn run(&mut self, task: Deferred, runs: u64) {
        match task {
            Deferred::PresentOutcome(outcome) => {
                self.presenting = None;
                self.present(outcome);
            }
            Deferred::HideMismatch => {
                if let Some(positions) = self.engine.hide_mismatch() {
                    self.emit(ViewEvent::CardsHidden {
                        positions: positions.to_vec(),
                    });
                }
            }
            Deferred::AnnounceCompletion {
                score,
                elapsed_seconds,
            } => {
                debug!(
                    round = self.round_number,
                    score, elapsed_seconds, "round completed"
                );
                self.emit(ViewEvent::RoundCompleted {
                    score,
                    elapsed_seconds,
                });
            }
            Deferred::Deal { start_timer } => {
                self.dealing = None;
                self.deal();
                if start_timer {
                    self.start_timer();
                }
            }
            // Periods elapsed within one `advance` and before any other task
            // come in as one batch, reported with a single TimeChanged.
            Deferred::Tick => {
                let seconds = u32::try_from(runs).unwrap_or(u32::MAX);
                if let Some(elapsed_seconds) = self.engine.tick_by(seconds) {
                    self.emit(ViewEvent::TimeChanged { elapsed_seconds });
                }
            }
        }
    }

    fn present(&mut self, outcome: FlipResult) {
        match outcome {
            FlipResult::MatchFound { score, .. } => {
                self.emit(ViewEvent::ScoreChanged { score });
            }
            FlipResult::Mismatch { .. } => {
                self.scheduler
                    .schedule_once(self.config.timing.mismatch_hide_delay, Deferred::HideMismatch);
            }
            FlipResult::RoundComplete {
                score,
                elapsed_seconds,
                ..
            } => {
                self.emit(ViewEvent::ScoreChanged { score });
                self.scheduler.schedule_once(
                    self.config.timing.completion_delay,
                    Deferred::AnnounceCompletion {
                        score,
                        elapsed_seconds,
                    },
                );
            }
            FlipResult::Ignored(_) | FlipResult::FirstCardFlipped { .. } => {}
        }
    }

    fn deal(&mut self) {
        let deck = match Deck::build(&self.config.symbols, &mut self.rng) {
            Ok(deck) => deck,
            Err(err) => {
                warn!(%err, "deal failed, keeping previous board");
                return;
            }
        };

        self.engine = MatchEngine::new(deck, self.config.match_bonus);
        self.round_number += 1;
        debug!(round = self.round_number, "board dealt");

        self.emit(ViewEvent::DeckDealt {
            symbols: self.engine.deck().symbols(),
        });
        self.emit(ViewEvent::ScoreChanged { score: 0 });
        self.emit(ViewEvent::TimeChanged { elapsed_seconds: 0 });
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.timer = Some(
            self.scheduler
                .schedule_every(self.config.timing.tick_interval, Deferred::Tick),
        );
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn emit(&mut self, event: ViewEvent) {
        trace!(kind = event.kind(), "view event");
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }
}
