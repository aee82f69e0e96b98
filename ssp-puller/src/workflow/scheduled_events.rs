//! Scheduled-events reconciliation pipeline
//!
//! Fetches one index document per (sport, day) from the start date through
//! the current year. Days already captured are skipped by the download
//! primitive, so re-running only fills the gaps.

use super::Puller;
use crate::error::PullerResult;
use crate::models::{CalendarDay, FetchTask, RunStats};
use crate::services::{CalendarEnumerator, ErrorBudget, SkipRule};
use chrono::Datelike;
use ssp_common::{DaysInMonth, Sport};
use tracing::info;

pub const PIPELINE_NAME: &str = "scheduled events";

/// Historical first day of the upstream archive
pub const DEFAULT_START: CalendarDay = CalendarDay {
    year: 2008,
    month: 10,
    day: 1,
};

/// Parameters of one reconciliation run
#[derive(Debug, Clone)]
pub struct ScheduledEventsJob {
    pub sport: Sport,
    pub start: CalendarDay,
    pub max_errors: usize,
    pub days_in_month: DaysInMonth,
    pub skip_rule: SkipRule,
    /// Last year to enumerate; the current local year when `None`
    pub through_year: Option<i32>,
}

impl ScheduledEventsJob {
    pub fn new(sport: Sport, max_errors: usize) -> Self {
        Self {
            sport,
            start: DEFAULT_START,
            max_errors,
            days_in_month: DaysInMonth::STANDARD,
            skip_rule: SkipRule::default(),
            through_year: None,
        }
    }

    fn enumerator(&self) -> CalendarEnumerator {
        CalendarEnumerator::new(self.start, self.days_in_month, self.skip_rule)
    }
}

impl Puller {
    /// Fetch every day's index document, sequentially
    pub async fn export_scheduled_events(&self, job: &ScheduledEventsJob) -> PullerResult<RunStats> {
        let through_year = job
            .through_year
            .unwrap_or_else(|| chrono::Local::now().year());

        info!(
            sport = %job.sport,
            start = %job.start,
            through_year,
            max_errors = job.max_errors,
            "Reconciling scheduled events"
        );

        let base_url = self.base_url();
        let root = self.data_root().to_path_buf();
        let sport = job.sport;
        let tasks = job
            .enumerator()
            .days(through_year)
            .map(|day| FetchTask::scheduled_events(&base_url, &root, sport, day));

        let budget = ErrorBudget::new(job.max_errors);
        let mut stats = RunStats::default();
        let result = self
            .run_tasks(tasks, 1, &budget, &mut stats, PIPELINE_NAME)
            .await;

        stats.days_processed = stats.fetched + stats.not_found + stats.skipped + stats.failed;
        info!(errors = budget.count(), "Scheduled events finished: {}", stats);
        result.map(|()| stats)
    }
}
