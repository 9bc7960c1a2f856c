//! Run-scoped crawl state
//!
//! This module holds the two pieces of shared mutable state a crawl run
//! carries: the visited set and the per-task outcome definitions the
//! coordinator records.

mod task_state;
mod visited;

pub use task_state::{FailureKind, SkipReason, TaskOutcome};
pub use visited::VisitedSet;
