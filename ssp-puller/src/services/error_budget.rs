//! Error budget shared by every fetch of one pipeline invocation
//!
//! The counter only grows. Once it strictly exceeds the ceiling the owning
//! pipeline stops dispatching work and reports `TooManyDownloadErrors`.

use crate::error::{PullerError, PullerResult};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct ErrorBudget {
    max_errors: usize,
    count: AtomicUsize,
}

impl ErrorBudget {
    pub fn new(max_errors: usize) -> Self {
        Self {
            max_errors,
            count: AtomicUsize::new(0),
        }
    }

    /// Charge one soft failure. Returns false once the budget is exceeded.
    pub fn record_failure(&self) -> bool {
        let count = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        if count > self.max_errors {
            tracing::warn!(
                errors = count,
                max_errors = self.max_errors,
                "Error budget exhausted"
            );
            false
        } else {
            true
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn is_exhausted(&self) -> bool {
        self.count() > self.max_errors
    }

    /// `Err(TooManyDownloadErrors)` for `pipeline` once exhausted
    pub fn check(&self, pipeline: &'static str) -> PullerResult<()> {
        if self.is_exhausted() {
            Err(PullerError::TooManyDownloadErrors { pipeline })
        } else {
            Ok(())
        }
    }
}
