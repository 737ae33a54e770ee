//! Aggregate results of a test run.

use std::io::{self, Write};

use super::outcome::{Status, TestRecord};

/// Aggregated outcome of a whole run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of tests the run was asked to execute.
    pub total: usize,
    pub passed: usize,
    pub skipped: usize,
    pub failed: Vec<String>,
    pub timed_out: Vec<String>,
    /// Tests that passed with a non-zero exit, with that exit code.
    pub passed_with_warnings: Vec<(String, i32)>,
}

impl RunSummary {
    /// Create an empty summary for a run of `total` tests.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Fold one record into the summary.
    pub fn record(&mut self, record: TestRecord) {
        match record.status {
            Status::Passed => self.passed += 1,
            Status::Skipped => self.skipped += 1,
            Status::PassedWithWarnings { code } => {
                self.passed_with_warnings.push((record.test, code));
            },
            Status::Failed { .. } => self.failed.push(record.test),
            Status::TimedOut => self.timed_out.push(record.test),
        }
    }

    /// Failed plus timed-out tests.
    pub fn failure_count(&self) -> usize {
        self.failed.len() + self.timed_out.len()
    }

    /// True when nothing failed or timed out.
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }

    /// Write the end-of-run report.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.is_success() {
            writeln!(out, "All tests passed")?;
        } else {
            writeln!(out)?;
            writeln!(
                out,
                "Out of {} tests {} failed:",
                self.total,
                self.failure_count()
            )?;
            for test in &self.failed {
                writeln!(out, "{test}")?;
            }
            for test in &self.timed_out {
                writeln!(out, "{test} (TIMEOUT)")?;
            }
        }

        if !self.passed_with_warnings.is_empty() {
            writeln!(
                out,
                "{} tests passed but exited with non-zero code:",
                self.passed_with_warnings.len()
            )?;
            for (test, code) in &self.passed_with_warnings {
                writeln!(out, "{test} ({code})")?;
            }
        }

        Ok(())
    }
}
