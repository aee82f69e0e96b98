//! Error types for ssp-puller
//!
//! Per-fetch failures (`Http`, `UnexpectedStatus`, `Io`, `Archive`) are soft:
//! the pipelines log them and charge them to the error budget. `Parse`,
//! `ReadTree` and `TooManyDownloadErrors` end a pipeline invocation.

use std::path::PathBuf;
use thiserror::Error;

/// Puller error type
#[derive(Debug, Error)]
pub enum PullerError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a status other than 200 or 404
    #[error("error in response (status code not in [200, 404]): {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Creating or extracting a tar.gz artifact failed
    #[error("archive {path} failed: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A decompressed index document is not valid JSON
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The export tree could not be listed
    #[error("failed to read filesystem for \"{level}\" at {path}: {source}")]
    ReadTree {
        level: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The error budget of a pipeline was exceeded
    #[error("{pipeline}: too many download errors")]
    TooManyDownloadErrors { pipeline: &'static str },

    /// ssp-common error
    #[error("Common error: {0}")]
    Common(#[from] ssp_common::Error),
}

/// Result type for puller operations
pub type PullerResult<T> = Result<T, PullerError>;
