//! Data models for ssp-puller
//!
//! - Scheduled-events index documents
//! - Fetch tasks and their outcomes
//! - Per-invocation run statistics

pub mod fetch_task;
pub mod run_stats;
pub mod scheduled_events;

pub use fetch_task::{CalendarDay, DetailKind, FetchOutcome, FetchTask};
pub use run_stats::RunStats;
pub use scheduled_events::{Event, ScheduledEventsDocument};
