//! Test helper utilities
//!
//! Shared utilities for testing ssp-puller

#![allow(dead_code)]

pub mod log_capture;
pub mod mock_upstream;

pub use log_capture::LogCapture;
pub use mock_upstream::MockUpstream;

use ssp_puller::config::PullerSettings;
use ssp_puller::services::{archive_file, ApiEndpoint, ClientSettings};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings pointing a puller at `upstream` with `data_root` as export tree
pub fn test_settings(upstream: &MockUpstream, data_root: &Path, max_errors: usize) -> PullerSettings {
    PullerSettings {
        data_root: data_root.to_path_buf(),
        endpoint: ApiEndpoint::new("http", upstream.host()),
        max_errors,
        max_parallelism: 1,
        client: ClientSettings {
            timeout: Duration::from_secs(5),
            verify_tls: false,
        },
        force: false,
        log_level: "debug".to_string(),
    }
}

/// Write a captured index for `<year>/<month>/<day>/<sport>` the way the
/// download primitive leaves it: archive only, raw file removed
pub fn seed_index(root: &Path, date: (&str, &str, &str), sport: &str, body: &[u8]) -> PathBuf {
    let partition = root.join(date.0).join(date.1).join(date.2).join(sport);
    std::fs::create_dir_all(&partition).unwrap();

    let raw = partition.join("scheduled-events.json");
    std::fs::write(&raw, body).unwrap();
    archive_file(&raw, &partition.join("scheduled-events.json.tar.gz"), root).unwrap();
    std::fs::remove_file(&raw).unwrap();
    partition
}

/// Index body listing `ids`
pub fn index_body(ids: &[i64]) -> Vec<u8> {
    let events: Vec<String> = ids
        .iter()
        .map(|id| format!(r#"{{"id":{},"hasEventPlayerStatistics":true}}"#, id))
        .collect();
    format!(r#"{{"events":[{}]}}"#, events.join(",")).into_bytes()
}
