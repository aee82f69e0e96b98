//! Idempotent download-and-compress primitive
//!
//! A fetch writes the response body to `<dir>/<file>`, compresses it into
//! `<dir>/<file>.tar.gz` and removes the raw file. If either artifact is
//! already on disk the fetch is skipped without touching the network, unless
//! `force` is set. HTTP 404 is a legitimate "no data" answer: its body is
//! archived like a 200 so the key is not requested again.
//!
//! Failing to archive fails the call. Failing to delete the raw file after a
//! successful archive only logs a warning.

use super::archive::archive_file;
use super::upstream_client::UpstreamClient;
use crate::error::{PullerError, PullerResult};
use crate::models::{FetchOutcome, FetchTask};
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

pub struct Downloader {
    client: UpstreamClient,
    data_root: PathBuf,
}

impl Downloader {
    /// `data_root` is stripped from archive entry names
    pub fn new(client: UpstreamClient, data_root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            data_root: data_root.into(),
        }
    }

    /// Fetch one task. No retry: the caller charges failures to its budget.
    pub async fn fetch(&self, task: &FetchTask, force: bool) -> PullerResult<FetchOutcome> {
        let raw_path = task.raw_path();
        let archive_path = task.archive_path();

        if !force {
            if tokio::fs::try_exists(&raw_path).await? {
                info!(path = %raw_path.display(), "file exists already, skipping");
                return Ok(FetchOutcome::Skipped);
            }
            if tokio::fs::try_exists(&archive_path).await? {
                info!(path = %archive_path.display(), "file exists already, skipping");
                return Ok(FetchOutcome::Skipped);
            }
        }

        info!(url = %task.url, "processing url");
        let mut response = self.client.get(&task.url).await?;

        let outcome = match response.status() {
            StatusCode::OK => FetchOutcome::Fetched,
            StatusCode::NOT_FOUND => FetchOutcome::NotFound,
            status => {
                return Err(PullerError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: task.url.clone(),
                })
            }
        };

        if !tokio::fs::try_exists(&task.dir).await? {
            info!(dir = %task.dir.display(), "creating folder");
            tokio::fs::create_dir_all(&task.dir).await?;
        }

        debug!(path = %raw_path.display(), "downloading data into file");
        if let Err(e) = write_body(&mut response, &raw_path).await {
            if let Err(rm) = tokio::fs::remove_file(&raw_path).await {
                warn!(path = %raw_path.display(), error = %rm, "Failed to remove partial download");
            }
            return Err(e);
        }

        let (raw, archive, base) = (raw_path.clone(), archive_path.clone(), self.data_root.clone());
        tokio::task::spawn_blocking(move || archive_file(&raw, &archive, &base))
            .await
            .map_err(|e| ssp_common::Error::Internal(format!("archive task failed: {}", e)))??;

        if let Err(e) = tokio::fs::remove_file(&raw_path).await {
            warn!(path = %raw_path.display(), error = %e, "failed to remove raw file");
        }

        debug!(path = %archive_path.display(), ?outcome, "artifact stored");
        Ok(outcome)
    }
}

async fn write_body(response: &mut reqwest::Response, path: &Path) -> PullerResult<()> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}
