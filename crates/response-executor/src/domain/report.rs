//! Execution reports
//!
//! A report is assembled in a [`ReportBuilder`] while the sequence runs and
//! only replaces the published report once complete.

use super::{SequenceTracker, SystemMode};
use serde::{Deserialize, Serialize};

/// Maximum status summary length in bytes
pub const STATUS_SUMMARY_MAX_LEN: usize = 511;

/// Maximum error details length in bytes
pub const ERROR_DETAILS_MAX_LEN: usize = 255;

/// Outcome of one dispatch
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Timestamp of the request that produced this report
    pub response_id: u64,
    pub overall_result: i32,
    /// Epoch millis
    pub start_time: u64,
    /// Epoch millis
    pub end_time: u64,
    pub sub_operations: u32,
    pub success_count: u32,
    pub failed_count: u32,
    pub warning_count: u32,
    pub system_mode: SystemMode,
    pub status_summary: String,
    pub error_details: String,
}

impl ExecutionReport {
    pub fn is_success(&self) -> bool {
        self.overall_result == crate::error::RESULT_SUCCESS
    }

    /// Wall-clock dispatch duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

/// Scratch report for an in-flight dispatch
#[derive(Debug)]
pub struct ReportBuilder {
    report: ExecutionReport,
}

impl ReportBuilder {
    pub fn start(response_id: u64, start_time: u64) -> Self {
        Self {
            report: ExecutionReport {
                response_id,
                start_time,
                ..ExecutionReport::default()
            },
        }
    }

    /// Copy step counters from the tracker
    pub fn counts(mut self, tracker: &SequenceTracker) -> Self {
        self.report.sub_operations = tracker.attempted();
        self.report.success_count = tracker.succeeded();
        self.report.failed_count = tracker.failed();
        self.report.warning_count = tracker.warning_count();
        self
    }

    pub fn status_summary(mut self, summary: impl Into<String>) -> Self {
        self.report.status_summary = truncate_to(summary.into(), STATUS_SUMMARY_MAX_LEN);
        self
    }

    pub fn error_details(mut self, details: impl Into<String>) -> Self {
        self.report.error_details = truncate_to(details.into(), ERROR_DETAILS_MAX_LEN);
        self
    }

    pub fn finish(mut self, end_time: u64, overall_result: i32, mode: SystemMode) -> ExecutionReport {
        self.report.end_time = end_time;
        self.report.overall_result = overall_result;
        self.report.system_mode = mode;
        self.report
    }
}

/// Truncate on a char boundary at or below `max` bytes
fn truncate_to(mut s: String, max: usize) -> String {
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
    }
    s
}
