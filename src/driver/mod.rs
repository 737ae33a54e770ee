//! Test-run driver for the MongoDB JavaScript test suite.
//!
//! Tests run one after another through a [`TestRunner`], each bounded by a
//! timeout. Every outcome is streamed as soon as it is known and folded into
//! a [`RunSummary`]; a failing or hanging test never stops the run.
//!
//! ## Module Structure
//!
//! - [`outcome`]: completion classification and per-test records
//! - [`summary`]: aggregate results and the final report
//! - [`discovery`]: parsing the runner's test listing
//! - [`resmoke`]: the `resmoke.py` runner
//! - [`cleanup`]: working-directory removal and the timeout kill sweep

pub mod cleanup;
pub mod discovery;
pub mod error;
pub mod outcome;
pub mod resmoke;
pub mod summary;

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::info;

pub use error::{DriverError, Result};
pub use outcome::{Completion, Status, TestRecord, classify};
pub use resmoke::ResmokeRunner;
pub use summary::RunSummary;

use crate::constants::STATUS_MARGIN;
use crate::ui;
use crate::utils::{absolute_path, format_elapsed, status_column};

/// Executes tests on behalf of the driver.
#[async_trait]
pub trait TestRunner: Send + Sync {
    /// Discover every test of the configured suite.
    async fn list_tests(&self) -> Result<Vec<String>>;

    /// Run one test, giving up after `timeout`.
    async fn run_test(&self, test: &str, timeout: Duration) -> Result<Completion>;
}

/// Sequential test loop.
#[derive(Debug, Clone)]
pub struct Driver {
    dbpath: PathBuf,
    timeout: Duration,
}

impl Driver {
    /// Create a driver that cleans `<dbpath>/job0` between tests.
    pub fn new(dbpath: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            dbpath: absolute_path(dbpath.into()),
            timeout,
        }
    }

    /// Run `tests` (sorted by name) and write progress plus the final
    /// report to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the runner cannot be started or `out` cannot
    /// be written. Test failures and timeouts are part of the summary.
    pub async fn run<R, W>(&self, runner: &R, tests: &[String], out: &mut W) -> Result<RunSummary>
    where
        R: TestRunner + ?Sized,
        W: Write,
    {
        let mut tests = tests.to_vec();
        tests.sort();

        info!(count = tests.len(), timeout_secs = self.timeout.as_secs(), "Starting test run");

        let margin = status_column(&tests, STATUS_MARGIN);
        let mut summary = RunSummary::new(tests.len());

        for test in &tests {
            write!(out, "{:<margin$}", format!("{test} ..."))?;
            out.flush()?;

            let start = Instant::now();
            let completion = runner.run_test(test, self.timeout).await?;
            let record = TestRecord::new(test.as_str(), completion, start.elapsed());

            writeln!(out, "{}\t{}", record.status, format_elapsed(record.elapsed))?;
            if record.status.shows_output() {
                ui::write_output_box(out, &format!("Output of {test}"), &record.output)?;
            }

            if record.status != Status::Skipped {
                cleanup::remove_job_dir(&self.dbpath);
            }

            summary.record(record);
        }

        summary.write_report(out)?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    use crate::constants::JOB_DIR;

    /// Replays canned completions and recreates `job0` for every test, the
    /// way a real runner leaves its working directory behind.
    struct FakeRunner {
        completions: HashMap<String, Completion>,
        job_dir: PathBuf,
        calls: Mutex<Vec<String>>,
        job_dir_seen: Mutex<Vec<bool>>,
    }

    impl FakeRunner {
        fn new(dbpath: &std::path::Path, completions: &[(&str, Completion)]) -> Self {
            Self {
                completions: completions
                    .iter()
                    .map(|(t, c)| ((*t).to_string(), c.clone()))
                    .collect(),
                job_dir: dbpath.join(JOB_DIR),
                calls: Mutex::new(Vec::new()),
                job_dir_seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TestRunner for FakeRunner {
        async fn list_tests(&self) -> Result<Vec<String>> {
            Ok(self.completions.keys().cloned().collect())
        }

        async fn run_test(&self, test: &str, _timeout: Duration) -> Result<Completion> {
            self.job_dir_seen.lock().unwrap().push(self.job_dir.exists());
            std::fs::create_dir_all(&self.job_dir).unwrap();
            self.calls.lock().unwrap().push(test.to_string());
            Ok(self.completions[test].clone())
        }
    }

    fn names(tests: &[&str]) -> Vec<String> {
        tests.iter().map(|t| (*t).to_string()).collect()
    }

    #[tokio::test]
    async fn test_runs_sorted_and_continues_after_failures() {
        let dbpath = TempDir::new().unwrap();
        let runner = FakeRunner::new(
            dbpath.path(),
            &[
                ("c.js", Completion::exited(0, "ok")),
                ("a.js", Completion::exited(1, "assertion failed")),
                ("b.js", Completion::TimedOut),
            ],
        );
        let driver = Driver::new(dbpath.path(), Duration::from_secs(1));

        let mut out = Vec::new();
        let summary = driver
            .run(&runner, &names(&["c.js", "a.js", "b.js"]), &mut out)
            .await
            .unwrap();

        assert_eq!(*runner.calls.lock().unwrap(), names(&["a.js", "b.js", "c.js"]));
        assert_eq!(summary.failed, names(&["a.js"]));
        assert_eq!(summary.timed_out, names(&["b.js"]));
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failure_count(), 2);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("a.js ...    FAILED\t"));
        assert!(text.contains("assertion failed"));
        assert!(text.contains("b.js ...    TIMEOUT\t"));
        assert!(text.contains("Out of 3 tests 2 failed:"));
        assert!(text.contains("b.js (TIMEOUT)"));
    }

    #[tokio::test]
    async fn test_job_dir_removed_unless_skipped() {
        let dbpath = TempDir::new().unwrap();
        let runner = FakeRunner::new(
            dbpath.path(),
            &[
                ("a.js", Completion::exited(0, "No tests ran")),
                ("b.js", Completion::exited(0, "ok")),
                ("c.js", Completion::exited(0, "ok")),
            ],
        );
        let driver = Driver::new(dbpath.path(), Duration::from_secs(1));

        let mut out = Vec::new();
        let summary = driver
            .run(&runner, &names(&["a.js", "b.js", "c.js"]), &mut out)
            .await
            .unwrap();

        // a.js was skipped so b.js still sees its directory; b.js passed so
        // c.js starts clean.
        assert_eq!(*runner.job_dir_seen.lock().unwrap(), vec![false, true, false]);
        assert!(!dbpath.path().join(JOB_DIR).exists());
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.passed, 2);
        assert!(String::from_utf8(out).unwrap().ends_with("All tests passed\n"));
    }

    #[tokio::test]
    async fn test_warnings_reported_with_exit_code() {
        let dbpath = TempDir::new().unwrap();
        let runner = FakeRunner::new(
            dbpath.path(),
            &[(
                "w.js",
                Completion::exited(3, "1 were skipped, 0 failed, 0 errored"),
            )],
        );
        let driver = Driver::new(dbpath.path(), Duration::from_secs(1));

        let mut out = Vec::new();
        let summary = driver.run(&runner, &names(&["w.js"]), &mut out).await.unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.passed_with_warnings, vec![("w.js".to_string(), 3)]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PASSED WITH WARNINGS. Test exited with code 3"));
        assert!(text.contains("1 tests passed but exited with non-zero code:\nw.js (3)\n"));
    }

    #[tokio::test]
    async fn test_empty_run() {
        let dbpath = TempDir::new().unwrap();
        let runner = FakeRunner::new(dbpath.path(), &[]);
        let driver = Driver::new(dbpath.path(), Duration::from_secs(1));

        let mut out = Vec::new();
        let summary = driver.run(&runner, &[], &mut out).await.unwrap();

        assert_eq!(summary, RunSummary::new(0));
        assert_eq!(String::from_utf8(out).unwrap(), "All tests passed\n");
    }
}
