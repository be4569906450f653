//! The decision core: maps one observation of an instance's runtime state to
//! the next action the orchestrator should take.

use std::sync::Arc;

use crate::clock::Clock;
use crate::model::{ScheduleStatus, ScheduledTask, TaskConfig};

use super::classify;
use super::{UpdaterError, UpdaterSettings};

/// What the orchestrator should do next for one instance.
///
/// Callers match exhaustively. `Succeeded` and the `Failed*` variants are
/// terminal: the updater accepts further calls after returning one, but the
/// result stays the same for the same observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalResult {
    /// The instance is in the desired stable state.
    Succeeded,
    /// The instance entered a terminal state more times than tolerated.
    FailedTerminated,
    /// The instance sat outside `Running` for too long, more times than
    /// tolerated.
    FailedStuck,
    /// Kill the current task, then evaluate again on the next state change.
    KillTaskAndEvaluateOnStateChange,
    /// Launch a task with the desired configuration, then evaluate again on
    /// the next state change.
    ReplaceTaskAndEvaluateOnStateChange,
    /// Nothing to do now; evaluate again on the next state change.
    EvaluateOnStateChange,
    /// Nothing to do now; evaluate again once the minimum running time has
    /// elapsed, or sooner on a state change.
    EvaluateAfterMinRunningMs,
}

impl EvalResult {
    /// Whether this result ends the update for the instance.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::FailedTerminated | Self::FailedStuck
        )
    }

    /// Whether this result declares the instance permanently failed.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::FailedTerminated | Self::FailedStuck)
    }
}

/// Intermediate decision: either final, or an observed failure whose result
/// depends on how many failures have accrued.
enum Outcome {
    Done(EvalResult),
    /// `terminal` once tolerance is exhausted, otherwise `remedy`.
    Failure {
        terminal: EvalResult,
        remedy: EvalResult,
    },
}

/// Decision engine for a single instance of a job update.
///
/// The desired configuration is fixed for the updater's lifetime. The only
/// state carried between calls is the count of observed failures; no
/// reference to prior observations is held. One updater per instance, one
/// caller at a time -- a multi-threaded orchestrator must serialize
/// observations per instance.
pub struct InstanceUpdater {
    desired_state: Option<TaskConfig>,
    settings: UpdaterSettings,
    clock: Arc<dyn Clock>,
    observed_failures: u32,
}

impl InstanceUpdater {
    /// Create an updater driving one instance toward `desired_state`.
    ///
    /// `desired_state = None` means the instance should not exist once the
    /// update completes.
    pub fn new(
        desired_state: Option<TaskConfig>,
        settings: UpdaterSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            desired_state,
            settings,
            clock,
            observed_failures: 0,
        }
    }

    /// Failures observed so far. Never decreases.
    pub fn observed_failures(&self) -> u32 {
        self.observed_failures
    }

    /// Decide the next action given the latest known task for this instance.
    ///
    /// `observation = None` means no task occupies the instance's slot. The
    /// returned result is the only side-effect channel; executing the action
    /// and re-observing is the caller's job.
    pub fn evaluate(
        &mut self,
        observation: Option<&ScheduledTask>,
    ) -> Result<EvalResult, UpdaterError> {
        let now_ms = self.clock.now_ms();
        let task = classify::present_task(observation);

        let outcome = match (&self.desired_state, task) {
            // Nothing wanted, nothing there: a no-op update.
            (None, None) => Outcome::Done(EvalResult::Succeeded),
            // The instance does not exist yet, or its slot was vacated.
            (Some(_), None) => Outcome::Done(EvalResult::ReplaceTaskAndEvaluateOnStateChange),
            // The instance must go away.
            (None, Some(task)) => {
                if task.status.is_killable() {
                    Outcome::Done(EvalResult::KillTaskAndEvaluateOnStateChange)
                } else {
                    // Already draining, or in a non-killable transient.
                    Outcome::Done(EvalResult::EvaluateOnStateChange)
                }
            }
            (Some(desired), Some(task)) => {
                evaluate_both_present(desired, task, now_ms, &self.settings)?
            }
        };

        let result = match outcome {
            Outcome::Done(result) => result,
            Outcome::Failure { terminal, remedy } => self.record_failure(terminal, remedy),
        };

        tracing::debug!(
            instance_id = ?observation.map(|t| t.assigned_task.instance_id),
            result = ?result,
            observed_failures = self.observed_failures,
            "evaluated instance"
        );

        Ok(result)
    }

    /// Count one observed failure and decide whether tolerance is exhausted.
    ///
    /// Failures are counted only here. A kill the updater itself requests on
    /// the wrong-config path is remediation, not an observed failure.
    fn record_failure(&mut self, terminal: EvalResult, remedy: EvalResult) -> EvalResult {
        self.observed_failures += 1;
        tracing::info!(
            observed_failures = self.observed_failures,
            tolerated_failures = self.settings.tolerated_failures,
            "observed instance failure"
        );
        if self.observed_failures > self.settings.tolerated_failures {
            terminal
        } else {
            remedy
        }
    }
}

/// Decide for an instance whose slot holds a task while the update also
/// wants one there.
fn evaluate_both_present(
    desired: &TaskConfig,
    task: &ScheduledTask,
    now_ms: i64,
    settings: &UpdaterSettings,
) -> Result<Outcome, UpdaterError> {
    if task.task_events.is_empty() {
        return Err(UpdaterError::EmptyTaskEvents {
            task_id: task.assigned_task.task_id,
        });
    }

    let status = task.status;
    let outcome = if desired.equal_ignoring_owner(task.config()) {
        // The desired configuration is in place.
        if status == ScheduleStatus::Running {
            if classify::appears_stable(task, now_ms, settings.min_running_ms()) {
                Outcome::Done(EvalResult::Succeeded)
            } else {
                Outcome::Done(EvalResult::EvaluateAfterMinRunningMs)
            }
        } else if status.is_terminal() {
            // The desired task has died.
            Outcome::Failure {
                terminal: EvalResult::FailedTerminated,
                remedy: EvalResult::EvaluateOnStateChange,
            }
        } else if classify::appears_stuck(task, now_ms, settings.max_non_running_ms()) {
            // Alive but out of Running for too long. Remediate by killing,
            // unless the task is already draining.
            Outcome::Failure {
                terminal: EvalResult::FailedStuck,
                remedy: if status.is_killable() {
                    EvalResult::KillTaskAndEvaluateOnStateChange
                } else {
                    EvalResult::EvaluateOnStateChange
                },
            }
        } else {
            // Transient on the way into or out of Running.
            Outcome::Done(EvalResult::EvaluateAfterMinRunningMs)
        }
    } else {
        // The wrong configuration is in place; it must be replaced.
        if status.is_killable() {
            Outcome::Done(EvalResult::KillTaskAndEvaluateOnStateChange)
        } else if status.is_terminal() && task.is_permanently_killed() {
            // The old task has exited; the slot is safe to refill.
            Outcome::Done(EvalResult::ReplaceTaskAndEvaluateOnStateChange)
        } else {
            // Already draining, wait.
            Outcome::Done(EvalResult::EvaluateOnStateChange)
        }
    };

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
