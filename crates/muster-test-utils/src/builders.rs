//! Builders for model values to simplify test setup.

use muster_core::model::{
    AssignedTask, ExecutorConfig, Identity, ScheduleStatus, ScheduledTask, TaskConfig, TaskEvent,
};
use uuid::Uuid;

/// Builder for [`TaskConfig`].
pub struct TaskConfigBuilder {
    config: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(job_name: &str) -> Self {
        Self {
            config: TaskConfig {
                job_name: job_name.to_owned(),
                owner: Identity::default(),
                num_cpus: 1.0,
                ram_mb: 128,
                disk_mb: 256,
                is_service: true,
                production: false,
                executor_config: None,
            },
        }
    }

    pub fn owned_by(mut self, role: &str, user: &str) -> Self {
        self.config.owner = Identity::new(role, user);
        self
    }

    pub fn cpus(mut self, num_cpus: f64) -> Self {
        self.config.num_cpus = num_cpus;
        self
    }

    pub fn ram_mb(mut self, ram_mb: i64) -> Self {
        self.config.ram_mb = ram_mb;
        self
    }

    pub fn disk_mb(mut self, disk_mb: i64) -> Self {
        self.config.disk_mb = disk_mb;
        self
    }

    pub fn service(mut self, is_service: bool) -> Self {
        self.config.is_service = is_service;
        self
    }

    pub fn production(mut self, production: bool) -> Self {
        self.config.production = production;
        self
    }

    pub fn executor(mut self, name: &str, data: serde_json::Value) -> Self {
        self.config.executor_config = Some(ExecutorConfig {
            name: name.to_owned(),
            data,
        });
        self
    }

    pub fn build(self) -> TaskConfig {
        self.config
    }
}

/// Builder for [`ScheduledTask`].
///
/// Unless overridden with [`Self::status`], the built task's status is that
/// of its latest event, which is the contract stored tasks obey.
pub struct ScheduledTaskBuilder {
    task_id: Uuid,
    instance_id: u32,
    config: TaskConfig,
    events: Vec<TaskEvent>,
    status: Option<ScheduleStatus>,
}

impl ScheduledTaskBuilder {
    pub fn new(config: TaskConfig) -> Self {
        Self {
            task_id: Uuid::new_v4(),
            instance_id: 0,
            config,
            events: Vec::new(),
            status: None,
        }
    }

    pub fn instance_id(mut self, instance_id: u32) -> Self {
        self.instance_id = instance_id;
        self
    }

    pub fn event(mut self, timestamp_ms: i64, status: ScheduleStatus) -> Self {
        self.events.push(TaskEvent::new(timestamp_ms, status));
        self
    }

    pub fn status(mut self, status: ScheduleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> ScheduledTask {
        let status = self
            .status
            .or_else(|| self.events.last().map(|event| event.status))
            .unwrap_or(ScheduleStatus::Pending);
        ScheduledTask {
            status,
            task_events: self.events,
            assigned_task: AssignedTask {
                task_id: self.task_id,
                instance_id: self.instance_id,
                task_config: self.config,
            },
        }
    }
}
