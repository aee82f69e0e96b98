//! Fetch task value objects

use ssp_common::Sport;
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of a day's index document inside its partition
pub const SCHEDULED_EVENTS_FILE: &str = "scheduled-events.json";

/// Suffix appended to an artifact once it has been compressed
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Per-event detail endpoints, in fetch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    Statistics,
    Incidents,
    Votes,
    Graph,
}

impl DetailKind {
    pub const ALL: [DetailKind; 4] = [
        DetailKind::Statistics,
        DetailKind::Incidents,
        DetailKind::Votes,
        DetailKind::Graph,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailKind::Statistics => "statistics",
            DetailKind::Incidents => "incidents",
            DetailKind::Votes => "votes",
            DetailKind::Graph => "graph",
        }
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar date produced by the enumerator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDay {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Zero-padded (year, month, day) directory names
    pub fn segments(&self) -> (String, String, String) {
        (
            self.year.to_string(),
            format!("{:02}", self.month),
            format!("{:02}", self.day),
        )
    }

    /// `YYYY/MM/DD`
    pub fn path_fragment(&self) -> String {
        let (y, m, d) = self.segments();
        format!("{}/{}/{}", y, m, d)
    }

    /// `YYYY-MM-DD`, as used in the scheduled-events URL
    pub fn url_date(&self) -> String {
        let (y, m, d) = self.segments();
        format!("{}-{}-{}", y, m, d)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_fragment())
    }
}

/// One unit of download work: where to GET from and where to store it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub url: String,
    pub dir: PathBuf,
    pub filename: String,
}

impl FetchTask {
    pub fn new(url: impl Into<String>, dir: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dir: dir.into(),
            filename: filename.into(),
        }
    }

    /// Index fetch for one sport and day
    pub fn scheduled_events(base_url: &str, root: &Path, sport: Sport, day: CalendarDay) -> Self {
        let (y, m, d) = day.segments();
        Self::new(
            format!(
                "{}/api/v1/sport/{}/scheduled-events/{}",
                base_url,
                sport,
                day.url_date()
            ),
            root.join(y).join(m).join(d).join(sport.as_str()),
            SCHEDULED_EVENTS_FILE,
        )
    }

    /// Detail fetch for one event, stored next to its index in `partition`
    pub fn detail(base_url: &str, partition: &Path, event_id: i64, kind: DetailKind) -> Self {
        Self::new(
            format!("{}/api/v1/event/{}/{}", base_url, event_id, kind),
            partition,
            format!("{}-{}.json", event_id, kind),
        )
    }

    /// Raw (uncompressed) artifact path
    pub fn raw_path(&self) -> PathBuf {
        self.dir.join(&self.filename)
    }

    /// Compressed artifact path (`<file>.tar.gz`)
    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(format!("{}{}", self.filename, ARCHIVE_SUFFIX))
    }
}

/// Non-error result of a download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Artifact already present, no request issued
    Skipped,
    /// HTTP 200, body archived
    Fetched,
    /// HTTP 404, body archived as a "no data" marker
    NotFound,
}
