//! Per-invocation pipeline statistics

use super::FetchOutcome;
use std::fmt;

/// Counters collected while a pipeline runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub fetched: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
    pub days_processed: usize,
    pub days_skipped: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Fetched => self.fetched += 1,
            FetchOutcome::NotFound => self.not_found += 1,
            FetchOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Requests that reached the upstream
    pub fn requests(&self) -> usize {
        self.fetched + self.not_found + self.failed
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fetched, {} not found, {} skipped, {} failed over {} days ({} days skipped)",
            self.fetched,
            self.not_found,
            self.skipped,
            self.failed,
            self.days_processed,
            self.days_skipped
        )
    }
}
