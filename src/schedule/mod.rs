//! Deferred and periodic tasks.
//!
//! Presentation delays (re-hiding a mismatched pair, announcing the end of a
//! round, the reset animation) and the round timer are all tasks on a
//! `Scheduler`. Every task is identified by a `TaskHandle` returned at
//! schedule time, which is what cancels it.

pub mod scheduler;

pub use scheduler::{Scheduler, TaskHandle};
