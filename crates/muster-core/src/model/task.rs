//! Runtime projection of a scheduled task.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::TaskConfig;
use super::status::ScheduleStatus;

/// A single status transition in a task's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// Milliseconds since the epoch at which the transition was observed.
    pub timestamp_ms: i64,
    pub status: ScheduleStatus,
}

impl TaskEvent {
    pub fn new(timestamp_ms: i64, status: ScheduleStatus) -> Self {
        Self {
            timestamp_ms,
            status,
        }
    }
}

/// The task as handed to an executor: identity plus configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedTask {
    pub task_id: Uuid,
    /// Index of the logical instance this task fills within its job.
    pub instance_id: u32,
    pub task_config: TaskConfig,
}

/// The scheduler's view of a live (or recently dead) task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub status: ScheduleStatus,
    /// Status history, oldest first. Non-empty for any stored task; the
    /// latest event's status equals `status`.
    pub task_events: Vec<TaskEvent>,
    pub assigned_task: AssignedTask,
}

impl ScheduledTask {
    /// The most recent status transition, if any history exists.
    pub fn latest_event(&self) -> Option<&TaskEvent> {
        self.task_events.last()
    }

    /// The configuration this task was launched with.
    pub fn config(&self) -> &TaskConfig {
        &self.assigned_task.task_config
    }

    /// The task was asked to die and has moved past the draining state.
    pub fn is_permanently_killed(&self) -> bool {
        self.status != ScheduleStatus::Killing
            && self
                .task_events
                .iter()
                .any(|event| event.status == ScheduleStatus::Killing)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
