//! Export pipelines
//!
//! Two independent pipelines share the download primitive:
//! - **Scheduled events** (reconciliation): calendar enumerator → one index
//!   fetch per day
//! - **Event data** (main export): replay every captured index on disk →
//!   four detail fetches per event
//!
//! Each invocation owns its own [`ErrorBudget`].

pub mod event_data;
pub mod scheduled_events;

pub use event_data::EventDataJob;
pub use scheduled_events::ScheduledEventsJob;

use crate::config::PullerSettings;
use crate::error::PullerResult;
use crate::models::{FetchTask, RunStats};
use crate::services::{ApiEndpoint, Downloader, ErrorBudget, UpstreamClient};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use tracing::error;

/// Entry point for both export pipelines
pub struct Puller {
    downloader: Downloader,
    endpoint: ApiEndpoint,
    data_root: PathBuf,
    force: bool,
}

impl Puller {
    pub fn new(settings: &PullerSettings) -> PullerResult<Self> {
        let client = UpstreamClient::new(&settings.client)?;
        Ok(Self {
            downloader: Downloader::new(client, settings.data_root.clone()),
            endpoint: settings.endpoint.clone(),
            data_root: settings.data_root.clone(),
            force: settings.force,
        })
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    fn base_url(&self) -> String {
        self.endpoint.base_url()
    }

    /// Run `tasks` with at most `parallelism` fetches in flight
    ///
    /// Every failure is logged and charged to `budget`, which is checked
    /// after each completion. Once exceeded no further task is started;
    /// fetches already in flight are awaited, then `TooManyDownloadErrors`
    /// is returned. With `parallelism == 1` tasks run strictly in order.
    pub(crate) async fn run_tasks<I>(
        &self,
        tasks: I,
        parallelism: usize,
        budget: &ErrorBudget,
        stats: &mut RunStats,
        pipeline: &'static str,
    ) -> PullerResult<()>
    where
        I: IntoIterator<Item = FetchTask>,
    {
        budget.check(pipeline)?;

        let force = self.force;
        let downloader = &self.downloader;
        let fetch = move |task: FetchTask| async move {
            let result = downloader.fetch(&task, force).await;
            (task, result)
        };

        let mut pending = tasks.into_iter();
        let mut in_flight = FuturesUnordered::new();

        // Seed initial batch of tasks
        for task in pending.by_ref().take(parallelism.max(1)) {
            in_flight.push(fetch(task));
        }

        while let Some((task, result)) = in_flight.next().await {
            match result {
                Ok(outcome) => stats.record(outcome),
                Err(e) => {
                    error!(url = %task.url, error = %e, "error while downloading");
                    stats.record_failure();
                    budget.record_failure();
                }
            }

            if budget.is_exhausted() {
                continue;
            }
            if let Some(next) = pending.next() {
                in_flight.push(fetch(next));
            }
        }

        budget.check(pipeline)
    }
}
