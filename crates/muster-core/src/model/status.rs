//! Task lifecycle states.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a scheduled task.
///
/// The updater cares about three partitions of this enum: *active* states
/// (the task can still transition), *terminal* states (it cannot), and the
/// single *up* state, `Running`. `Killing` is active but draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    /// Waiting for resources.
    Pending,
    /// Matched to a host, not yet started.
    Assigned,
    /// Executor is preparing the sandbox.
    Starting,
    /// The task process is up.
    Running,
    /// Asked to die, draining.
    Killing,
    /// Exited on its own with success.
    Finished,
    /// Exited on its own with failure.
    Failed,
    /// Forcibly terminated.
    Killed,
    /// The host or executor disappeared.
    Lost,
}

impl ScheduleStatus {
    /// Whether the task can still transition out of this state.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Self::Pending | Self::Assigned | Self::Starting | Self::Running | Self::Killing
        )
    }

    /// Whether no further transitions exist from this state.
    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }

    /// Active and not already draining, so a kill command would have effect.
    pub fn is_killable(self) -> bool {
        self.is_active() && self != Self::Killing
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Killing => "killing",
            Self::Finished => "finished",
            Self::Failed => "failed",
            Self::Killed => "killed",
            Self::Lost => "lost",
        };
        f.write_str(s)
    }
}

impl FromStr for ScheduleStatus {
    type Err = ScheduleStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "assigned" => Ok(Self::Assigned),
            "starting" => Ok(Self::Starting),
            "running" => Ok(Self::Running),
            "killing" => Ok(Self::Killing),
            "finished" => Ok(Self::Finished),
            "failed" => Ok(Self::Failed),
            "killed" => Ok(Self::Killed),
            "lost" => Ok(Self::Lost),
            other => Err(ScheduleStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ScheduleStatus`] string.
#[derive(Debug, Clone)]
pub struct ScheduleStatusParseError(pub String);

impl fmt::Display for ScheduleStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid schedule status: {:?}", self.0)
    }
}

impl std::error::Error for ScheduleStatusParseError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
