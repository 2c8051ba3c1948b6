//! Virtual-clock task queue.
//!
//! Tasks are scheduled relative to the scheduler's clock and come back out
//! of `pop_due` in deadline order (ties in scheduling order). The clock
//! only moves when the owner advances it, so a whole round can be replayed
//! deterministically in tests.
//!
//! ```
//! use std::time::Duration;
//! use memory_match::schedule::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! let hide = scheduler.schedule_once(Duration::from_millis(1000), "hide");
//! scheduler.schedule_every(Duration::from_millis(400), "tick");
//!
//! assert!(scheduler.cancel(hide));
//! let due: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(Duration::from_millis(1000))).collect();
//! assert_eq!(due, vec!["tick", "tick"]);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Cancellation token for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

impl TaskHandle {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Queue ordering: deadline in milliseconds, then insertion sequence.
type SlotKey = (u64, u64);

#[derive(Clone, Debug)]
struct Slot<T> {
    handle: TaskHandle,
    period: Option<u64>,
    task: T,
}

/// Deterministic single-threaded scheduler.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    /// Current time in milliseconds.
    now: u64,
    next_handle: u64,
    next_seq: u64,
    queue: BTreeMap<SlotKey, Slot<T>>,
    index: FxHashMap<TaskHandle, SlotKey>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: 0,
            next_handle: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
            index: FxHashMap::default(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time.
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now)
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Is the task still waiting to run (or, if periodic, still armed)?
    #[must_use]
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.index.contains_key(&handle)
    }

    /// Run `task` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskHandle {
        self.insert(millis(delay), None, task)
    }

    /// Run `task` every `period`, first at `now + period`.
    ///
    /// A zero period is treated as one millisecond.
    pub fn schedule_every(&mut self, period: Duration, task: T) -> TaskHandle {
        let period = millis(period).max(1);
        self.insert(period, Some(period), task)
    }

    fn insert(&mut self, delay: u64, period: Option<u64>, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.enqueue(self.now.saturating_add(delay), Slot { handle, period, task });
        handle
    }

    fn enqueue(&mut self, deadline: u64, slot: Slot<T>) {
        let key = (deadline, self.next_seq);
        self.next_seq += 1;
        self.index.insert(slot.handle, key);
        self.queue.insert(key, slot);
    }

    /// Cancel a task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.index.remove(&handle) {
            Some(key) => self.queue.remove(&key).is_some(),
            None => false,
        }
    }

    /// Cancel every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.index.clear();
        dropped
    }

    /// Take the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's deadline. Periodic tasks are re-armed
    /// one period later before being returned. When nothing is due the clock
    /// is left alone; use `advance_clock` to settle it at `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let until = millis(until);

        let (&key, _) = self.queue.first_key_value()?;
        if key.0 > until {
            return None;
        }
        let slot = self.queue.remove(&key)?;
        self.index.remove(&slot.handle);
        self.now = self.now.max(key.0);

        match slot.period {
            Some(period) => {
                let task = slot.task.clone();
                if let Some(next) = key.0.checked_add(period) {
                    self.enqueue(next, slot);
                }
                Some(task)
            }
            None => Some(slot.task),
        }
    }

    /// Like `pop_due`, but folds consecutive firings of a periodic task into
    /// one result with a run count.
    ///
    /// Firings are only folded up to `until` and strictly before the next
    /// other task's deadline, so relative order with other tasks is the same
    /// as popping them one at a time. One-shot tasks always come back with a
    /// count of 1. A periodic task whose next deadline would pass the end of
    /// the clock is dropped.
    pub fn pop_due_batch(&mut self, until: Duration) -> Option<(T, u64)> {
        let until = millis(until);

        let (&key, _) = self.queue.first_key_value()?;
        if key.0 > until {
            return None;
        }
        let slot = self.queue.remove(&key)?;
        self.index.remove(&slot.handle);

        let Some(period) = slot.period else {
            self.now = self.now.max(key.0);
            return Some((slot.task, 1));
        };

        let bound = match self.queue.first_key_value() {
            Some((&(next, _), _)) => until.min(next.saturating_sub(1)),
            None => until,
        };
        let runs = if bound >= key.0 {
            (bound - key.0) / period + 1
        } else {
            1
        };
        let last = key.0 + (runs - 1) * period;
        self.now = self.now.max(last);

        let task = slot.task.clone();
        if let Some(next) = last.checked_add(period) {
            self.enqueue(next, slot);
        }
        Some((task, runs))
    }

    /// Move the clock forward without running anything.
    pub fn advance_clock(&mut self, until: Duration) {
        self.now = self.now.max(millis(until));
    }
}
