//! Shared document model for the `Taskboard` dashboard.
//!
//! Describes the two JSON documents the dashboard consumes (tasks and
//! schedules) and the cadence grouping applied to scheduled jobs. Every
//! field is optional on the wire: absent or `null` values fall back to
//! their defaults instead of failing the whole document.

mod de;
pub mod meta;
pub mod schedule;
pub mod task;
