//! Export state tracking.

use chrono::{DateTime, Utc};

/// Counters for one export run.
///
/// Only the download orchestrator mutates these; the progress line reads
/// `new_downloads` and `existing_skips`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportCounters {
    pub new_downloads: u64,
    pub existing_skips: u64,

    // Not shown in the progress line
    pub stale_skips: u64,
    pub failed: u64,
}

impl ExportCounters {
    /// Record a completed download.
    pub fn increment_new(&mut self) {
        self.new_downloads += 1;
    }

    /// Record an item already present on disk.
    pub fn increment_existing(&mut self) {
        self.existing_skips += 1;
    }

    /// Record an item skipped because its media reference expired.
    pub fn increment_stale(&mut self) {
        self.stale_skips += 1;
    }

    /// Record an item whose download failed.
    pub fn increment_failed(&mut self) {
        self.failed += 1;
    }

    /// Items accounted as exported (new plus already present).
    pub fn total_exported(&self) -> u64 {
        self.new_downloads + self.existing_skips
    }
}

/// How an export run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// An empty page signalled the end of history.
    Completed,
    /// The operator stopped the run.
    Interrupted,
}

/// Result of an export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub channel: String,
    pub outcome: ExportOutcome,
    pub counters: ExportCounters,
    /// Cursor after the last fetched page.
    pub last_offset: i64,
    pub pages_fetched: u64,
    pub page_errors: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExportReport {
    /// Wall-clock duration of the run in seconds.
    pub fn elapsed_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut counters = ExportCounters::default();
        counters.increment_new();
        counters.increment_new();
        counters.increment_existing();
        counters.increment_stale();
        counters.increment_failed();

        assert_eq!(counters.new_downloads, 2);
        assert_eq!(counters.existing_skips, 1);
        assert_eq!(counters.total_exported(), 3);
    }
}
