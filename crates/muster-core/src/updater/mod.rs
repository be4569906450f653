//! Per-instance update evaluation.
//!
//! [`InstanceUpdater`] watches a single logical instance of a job update and
//! maps each observation of its runtime state to the next action the
//! orchestrator should take.

mod classify;
mod evaluator;

pub use evaluator::{EvalResult, InstanceUpdater};

use std::time::Duration;

use uuid::Uuid;

/// Tuning for instance evaluation.
#[derive(Debug, Clone)]
pub struct UpdaterSettings {
    /// Failures the instance may accrue before the update is declared
    /// failed. A value of N tolerates N failures; the (N+1)-th trips.
    pub tolerated_failures: u32,
    /// How long a task must hold its current state before `Running` counts
    /// as stable.
    pub min_running_time: Duration,
    /// How long a task may sit outside `Running`, without terminating,
    /// before it counts as stuck.
    pub max_non_running_time: Duration,
}

impl UpdaterSettings {
    pub(crate) fn min_running_ms(&self) -> i64 {
        self.min_running_time.as_millis() as i64
    }

    pub(crate) fn max_non_running_ms(&self) -> i64 {
        self.max_non_running_time.as_millis() as i64
    }
}

/// Errors surfaced by [`InstanceUpdater::evaluate`].
#[derive(Debug, thiserror::Error)]
pub enum UpdaterError {
    /// A stored task must carry at least one status event. An empty history
    /// is a contract violation by the caller, not a recoverable condition.
    #[error("task {task_id} has an empty status history")]
    EmptyTaskEvents { task_id: Uuid },
}
