//! Predicates over an observed task, relative to a point in time.

use crate::model::{ScheduleStatus, ScheduledTask, TaskEvent};

/// Signed age of an event. Negative when the clock has regressed past the
/// event's timestamp; a negative age fails every threshold test.
fn millis_since(now_ms: i64, event: &TaskEvent) -> i64 {
    now_ms - event.timestamp_ms
}

/// A permanently killed task is treated as absent; its slot is free to be
/// refilled.
pub(super) fn present_task(observation: Option<&ScheduledTask>) -> Option<&ScheduledTask> {
    observation.filter(|task| !task.is_permanently_killed())
}

/// Whatever state the task is currently in has persisted at least
/// `min_running_ms`.
pub(super) fn appears_stable(task: &ScheduledTask, now_ms: i64, min_running_ms: i64) -> bool {
    task.latest_event()
        .is_some_and(|event| millis_since(now_ms, event) >= min_running_ms)
}

/// The trailing non-running streak is at least `max_non_running_ms` long.
///
/// Walks events newest to oldest, stopping at the first `Running` event; the
/// streak is measured from the earliest event after that stop. A task that
/// never ran is measured from its first event.
pub(super) fn appears_stuck(task: &ScheduledTask, now_ms: i64, max_non_running_ms: i64) -> bool {
    let Some(first) = task.task_events.first() else {
        return false;
    };
    let mut earliest = first;
    for event in task.task_events.iter().rev() {
        if event.status == ScheduleStatus::Running {
            break;
        }
        earliest = event;
    }
    millis_since(now_ms, earliest) >= max_non_running_ms
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
