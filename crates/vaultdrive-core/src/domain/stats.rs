//! Per-run synchronization statistics
//!
//! Counts accumulate monotonically during one run and are discarded
//! afterwards; the final value is the run's summary.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Result of synchronizing a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new remote file was created
    Added,
    /// An existing remote file's content was replaced
    Updated,
    /// Fingerprints matched; no upload was performed
    Unchanged,
}

impl Display for SyncOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncOutcome::Added => "added",
            SyncOutcome::Updated => "updated",
            SyncOutcome::Unchanged => "unchanged",
        };
        write!(f, "{s}")
    }
}

/// Summary of a completed synchronization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Number of new remote files created
    pub added: u32,
    /// Number of remote files whose content was replaced
    pub updated: u32,
    /// Number of files skipped because fingerprints matched
    pub unchanged: u32,
}

impl SyncStats {
    /// Create an empty stats accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the counter matching the given outcome
    pub fn record(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Added => self.added += 1,
            SyncOutcome::Updated => self.updated += 1,
            SyncOutcome::Unchanged => self.unchanged += 1,
        }
    }

    /// Total number of eligible files processed
    #[must_use]
    pub fn total(&self) -> u32 {
        self.added + self.updated + self.unchanged
    }
}

impl Display for SyncStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "added: {}, updated: {}, unchanged: {}",
            self.added, self.updated, self.unchanged
        )
    }
}
