//! Scheduled-events index document
//!
//! One document per sport and day, listing the events the detail fetches are
//! fanned out from.

use crate::error::{PullerError, PullerResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed `scheduled-events.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ScheduledEventsDocument {
    /// Events in upstream order
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single scheduled event
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Event {
    /// Event identifier, unique within its document
    pub id: i64,

    /// Whether player statistics exist for the event. Not consulted when
    /// scheduling detail fetches.
    #[serde(rename = "hasEventPlayerStatistics", default)]
    pub has_event_player_statistics: bool,
}

impl ScheduledEventsDocument {
    pub fn from_slice(bytes: &[u8], path: &Path) -> PullerResult<Self> {
        serde_json::from_slice(bytes).map_err(|source| PullerError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse an extracted index file
    pub async fn from_file(path: &Path) -> PullerResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_slice(&bytes, path)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
