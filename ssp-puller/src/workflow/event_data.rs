//! Event index replayer
//!
//! Walks `<root>/<year>/<month>/<day>` as found on disk, unpacks each day's
//! captured `scheduled-events.json.tar.gz` for the sport and fans every
//! listed event out into four detail fetches.
//!
//! Directory names are trusted as-is; only directories are visited and they
//! are visited in name order.

use super::Puller;
use crate::error::{PullerError, PullerResult};
use crate::models::fetch_task::{ARCHIVE_SUFFIX, SCHEDULED_EVENTS_FILE};
use crate::models::{DetailKind, FetchTask, RunStats, ScheduledEventsDocument};
use crate::services::{extract_archive, ErrorBudget};
use ssp_common::Sport;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

pub const PIPELINE_NAME: &str = "event metadata";

/// Leading `<year>/<month>/<day>` of an archived index entry
const INDEX_STRIP_COMPONENTS: usize = 3;

/// Parameters of one event data export
#[derive(Debug, Clone)]
pub struct EventDataJob {
    pub sport: Sport,
    /// Only replay this year directory when set
    pub year: Option<String>,
    pub max_errors: usize,
    pub max_parallelism: usize,
}

impl EventDataJob {
    pub fn new(sport: Sport, max_errors: usize) -> Self {
        Self {
            sport,
            year: None,
            max_errors,
            max_parallelism: 1,
        }
    }
}

impl Puller {
    /// Replay every captured index under the data root
    pub async fn export_event_data(&self, job: &EventDataJob) -> PullerResult<RunStats> {
        let root = self.data_root().to_path_buf();
        info!(
            sport = %job.sport,
            root = %root.display(),
            year = job.year.as_deref().unwrap_or("*"),
            max_errors = job.max_errors,
            max_parallelism = job.max_parallelism,
            "Exporting event data"
        );

        let budget = ErrorBudget::new(job.max_errors);
        let mut stats = RunStats::default();

        for year in list_dirs(&root, "years").await? {
            if job.year.as_deref().is_some_and(|filter| filter != year) {
                continue;
            }
            let year_dir = root.join(&year);

            for month in list_dirs(&year_dir, "months").await? {
                let month_dir = year_dir.join(&month);

                for day in list_dirs(&month_dir, "days").await? {
                    let day_dir = month_dir.join(&day);
                    self.replay_day(&day_dir, job, &budget, &mut stats).await?;
                }
            }
        }

        info!(errors = budget.count(), "Event data finished: {}", stats);
        Ok(stats)
    }

    async fn replay_day(
        &self,
        day_dir: &Path,
        job: &EventDataJob,
        budget: &ErrorBudget,
        stats: &mut RunStats,
    ) -> PullerResult<()> {
        let partition = partition_dir(day_dir, job.sport);
        let index_path = partition.join(SCHEDULED_EVENTS_FILE);
        let archive_path = partition.join(format!("{}{}", SCHEDULED_EVENTS_FILE, ARCHIVE_SUFFIX));

        if !tokio::fs::try_exists(&archive_path).await? {
            debug!(partition = %partition.display(), "no scheduled events captured, skipping day");
            stats.days_skipped += 1;
            return Ok(());
        }

        info!(partition = %partition.display(), "processing partition");
        let (archive, dest) = (archive_path.clone(), day_dir.to_path_buf());
        let extracted = tokio::task::spawn_blocking(move || {
            extract_archive(&archive, &dest, INDEX_STRIP_COMPONENTS)
        })
        .await
        .map_err(|e| ssp_common::Error::Internal(format!("extract task failed: {}", e)))?;

        if let Err(e) = extracted {
            error!(archive = %archive_path.display(), error = %e, "failed to decompress");
            stats.record_failure();
            stats.days_skipped += 1;
            budget.record_failure();
            return budget.check(PIPELINE_NAME);
        }

        if !tokio::fs::try_exists(&index_path).await? {
            debug!(path = %index_path.display(), "archive held no index file, skipping day");
            stats.days_skipped += 1;
            return Ok(());
        }

        let parsed = ScheduledEventsDocument::from_file(&index_path).await;
        let removed = tokio::fs::remove_file(&index_path).await;

        // The partition keeps only the archive, even for an unreadable index
        let document = parsed?;
        if let Err(e) = removed {
            error!(path = %index_path.display(), error = %e, "failed to remove raw file");
            stats.record_failure();
            budget.record_failure();
            budget.check(PIPELINE_NAME)?;
        }

        debug!(events = document.len(), partition = %partition.display(), "scheduling detail fetches");
        let base_url = self.base_url();
        let tasks = document.events.iter().flat_map(|event| {
            let (base_url, partition) = (&base_url, &partition);
            DetailKind::ALL
                .into_iter()
                .map(move |kind| FetchTask::detail(base_url, partition, event.id, kind))
        });

        self.run_tasks(tasks, job.max_parallelism, budget, stats, PIPELINE_NAME)
            .await?;
        stats.days_processed += 1;
        Ok(())
    }
}

/// Sorted names of the sub-directories of `dir`
async fn list_dirs(dir: &Path, level: &'static str) -> PullerResult<Vec<String>> {
    let to_error = |source: std::io::Error| PullerError::ReadTree {
        level,
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await.map_err(to_error)?;
    while let Some(entry) = entries.next_entry().await.map_err(to_error)? {
        if !entry.file_type().await.map_err(to_error)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => warn!(?name, dir = %dir.display(), "skipping non UTF-8 directory name"),
        }
    }
    names.sort();
    Ok(names)
}

/// `<root>/<year>/<month>/<day>/<sport>` for a day directory
pub fn partition_dir(day_dir: &Path, sport: Sport) -> PathBuf {
    day_dir.join(sport.as_str())
}
