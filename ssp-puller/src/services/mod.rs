//! Service modules for the fetch-archive-reconcile pipeline
//!
//! Leaves first: archive writer/reader, upstream HTTP client, download
//! primitive, error budget and the calendar enumerator.

pub mod archive;
pub mod calendar;
pub mod downloader;
pub mod error_budget;
pub mod upstream_client;

pub use archive::{archive_file, create_archive, extract_archive};
pub use calendar::{CalendarEnumerator, SkipRule};
pub use downloader::Downloader;
pub use error_budget::ErrorBudget;
pub use upstream_client::{ApiEndpoint, ClientSettings, UpstreamClient};
