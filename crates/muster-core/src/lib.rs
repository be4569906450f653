//! Per-instance update decision engine for a cluster job scheduler.
//!
//! A job update moves each logical instance from a (possibly absent) old
//! task configuration to a (possibly absent) new one. For a single instance,
//! [`updater::InstanceUpdater`] decides on every observed change to that
//! instance's runtime state what the orchestrator should do next: wait,
//! replace, kill, mark succeeded, or declare the instance permanently
//! failed. The engine performs no I/O and holds no timers; executing the
//! returned action is the caller's job.

pub mod clock;
pub mod model;
pub mod updater;
