//! Task configuration and owner-insensitive equality.

use serde::{Deserialize, Serialize};

/// Identity of the role/user a task runs as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: String,
    pub user: String,
}

impl Identity {
    pub fn new(role: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            user: user.into(),
        }
    }
}

/// Opaque executor payload attached to a task configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub name: String,
    pub data: serde_json::Value,
}

/// Configuration of a task, as submitted and as launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub job_name: String,
    pub owner: Identity,
    pub num_cpus: f64,
    pub ram_mb: i64,
    pub disk_mb: i64,
    /// Long-running service, restarted on exit.
    pub is_service: bool,
    pub production: bool,
    pub executor_config: Option<ExecutorConfig>,
}

impl TaskConfig {
    /// Copy of `self` with the owner reset to the empty identity.
    fn with_empty_owner(&self) -> TaskConfig {
        TaskConfig {
            owner: Identity::default(),
            ..self.clone()
        }
    }

    /// Structural equality, ignoring the owner identity.
    ///
    /// The scheduler may rewrite owner identity between submission and
    /// launch, so a config that differs only there still counts as the same
    /// configuration.
    pub fn equal_ignoring_owner(&self, other: &TaskConfig) -> bool {
        self.with_empty_owner() == other.with_empty_owner()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
