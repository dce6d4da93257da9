//! Anonymization run summary and reporting
//!
//! This module defines the structure for tracking and reporting the result
//! of one anonymization run.

use std::time::Duration;

/// Summary of an anonymization run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// CSV files discovered under the data root
    pub files_found: usize,

    /// Files anonymized and written (or that would be written in dry-run)
    pub files_written: usize,

    /// Files skipped because their name could not be anonymized or they
    /// failed to read
    pub files_skipped: usize,

    /// Data rows read across all processed files
    pub rows_read: usize,

    /// Rows dropped because a subject value had no map entry
    pub rows_dropped: usize,

    /// Cells rewritten by date shifting
    pub cells_shifted: usize,

    /// Distinct warnings emitted during the run
    pub warnings: usize,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every discovered file produced output
    pub fn is_successful(&self) -> bool {
        self.files_skipped == 0
    }

    /// Percentage of discovered files that produced output
    pub fn success_rate(&self) -> f64 {
        if self.files_found == 0 {
            return 100.0;
        }
        (self.files_written as f64 / self.files_found as f64) * 100.0
    }
}
