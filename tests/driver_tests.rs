//! Driver tests against a stand-in `resmoke.py`.
//!
//! The stand-in is a shell script whose behavior depends on the test file
//! name, so these tests only run on Unix. They run serially: executing a
//! freshly written script while another test forks can fail with ETXTBSY.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;

use pmse_harness::driver::{Completion, Driver, ResmokeRunner, Status, TestRunner, classify};
use serial_test::serial;
use tempfile::TempDir;

const FAKE_RESMOKE: &str = r#"#!/bin/sh
# Listing mode: --suites=<suite> -n
if [ "$2" = "-n" ]; then
    echo "[resmoke] listing tests"
    echo "jstests/core/pass.js"
    echo "jstests/core/fail.js"
    echo "jstests/core/notes.txt"
    exit 0
fi

for last; do :; done
case "$last" in
    *pass.js) echo "1 test(s) ran"; exit 0 ;;
    *skip.js) echo "No tests ran"; exit 0 ;;
    *warn.js) echo "1 were skipped, 0 failed, 0 errored"; exit 2 ;;
    *fail.js) echo "assert failed" >&2; exit 1 ;;
    *args.js) echo "$@"; exit 0 ;;
    *hang.js) exec sleep 30 ;;
    *mkjob.js)
        for arg; do
            case "$arg" in --dbpath=*) mkdir -p "${arg#--dbpath=}/job0" ;; esac
        done
        exit 0 ;;
esac
exit 99
"#;

/// Write the stand-in to `<root>/buildscripts/resmoke.py`.
fn install_resmoke(root: &Path) {
    let scripts = root.join("buildscripts");
    fs::create_dir_all(&scripts).unwrap();
    let resmoke = scripts.join("resmoke.py");
    fs::write(&resmoke, FAKE_RESMOKE).unwrap();
    fs::set_permissions(&resmoke, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Lay out `<root>/buildscripts/resmoke.py` and a dbpath.
fn setup() -> (TempDir, ResmokeRunner) {
    let root = TempDir::new().unwrap();
    install_resmoke(root.path());
    fs::create_dir_all(root.path().join("db")).unwrap();

    let runner = ResmokeRunner::new(root.path(), root.path().join("db"), "core")
        .with_db_process("pmse-harness-test-no-such-process");
    (root, runner)
}

async fn run(runner: &ResmokeRunner, test: &str, timeout: Duration) -> Completion {
    runner.run_test(test, timeout).await.unwrap()
}

#[tokio::test]
#[serial]
async fn test_list_tests_filters_listing() {
    let (root, runner) = setup();

    let tests = runner.list_tests().await.unwrap();

    let expected: Vec<String> = ["pass.js", "fail.js"]
        .iter()
        .map(|t| root.path().join("jstests/core").join(t).display().to_string())
        .collect();
    assert_eq!(tests, expected);
}

#[tokio::test]
#[serial]
async fn test_statuses_from_exit_codes_and_output() {
    let (_root, runner) = setup();
    let timeout = Duration::from_secs(10);

    assert_eq!(classify(&run(&runner, "pass.js", timeout).await), Status::Passed);
    assert_eq!(classify(&run(&runner, "skip.js", timeout).await), Status::Skipped);
    assert_eq!(
        classify(&run(&runner, "warn.js", timeout).await),
        Status::PassedWithWarnings { code: 2 }
    );
    assert_eq!(
        classify(&run(&runner, "fail.js", timeout).await),
        Status::Failed { code: Some(1) }
    );
}

#[tokio::test]
#[serial]
async fn test_stderr_is_merged_into_output() {
    let (_root, runner) = setup();

    let completion = run(&runner, "fail.js", Duration::from_secs(10)).await;
    assert!(completion.output().contains("assert failed"));
}

#[tokio::test]
#[serial]
async fn test_invocation_flags() {
    let (root, runner) = setup();

    let completion = run(&runner, "args.js", Duration::from_secs(10)).await;
    let expected = format!(
        "--continueOnFailure --storageEngine=pmse --suites=core --dbpath={} {}",
        root.path().join("db").display(),
        root.path().join("jstests/core/args.js").display()
    );
    assert_eq!(completion.output().trim_end(), expected);
}

#[tokio::test]
#[serial]
async fn test_hanging_test_times_out() {
    let (_root, runner) = setup();

    let start = std::time::Instant::now();
    let completion = run(&runner, "hang.js", Duration::from_millis(300)).await;

    assert_eq!(completion, Completion::TimedOut);
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
#[serial]
async fn test_missing_runner_is_an_error() {
    let root = TempDir::new().unwrap();
    let runner = ResmokeRunner::new(root.path(), root.path().join("db"), "core");

    assert!(runner.run_test("pass.js", Duration::from_secs(1)).await.is_err());
    assert!(runner.list_tests().await.is_err());
}

#[tokio::test]
#[serial]
async fn test_full_run_counts_failures_and_timeouts() {
    let (root, runner) = setup();
    let dbpath = root.path().join("db");
    fs::create_dir_all(dbpath.join("job0")).unwrap();

    let tests: Vec<String> = ["warn.js", "hang.js", "pass.js", "fail.js", "skip.js"]
        .iter()
        .map(|t| (*t).to_string())
        .collect();
    let driver = Driver::new(&dbpath, Duration::from_millis(500));

    let mut out = Vec::new();
    let summary = driver.run(&runner, &tests, &mut out).await.unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.failed, vec!["fail.js".to_string()]);
    assert_eq!(summary.timed_out, vec!["hang.js".to_string()]);
    assert_eq!(summary.failure_count(), 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.passed_with_warnings, vec![("warn.js".to_string(), 2)]);
    assert!(!dbpath.join("job0").exists());

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Out of 5 tests 2 failed:\nfail.js\nhang.js (TIMEOUT)\n"));
    assert!(text.contains("1 tests passed but exited with non-zero code:\nwarn.js (2)\n"));
}

#[tokio::test]
#[serial]
async fn test_relative_paths_resolve_against_working_directory() {
    let base = TempDir::new().unwrap();
    install_resmoke(&base.path().join("mongo"));
    fs::create_dir_all(base.path().join("db")).unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(base.path()).unwrap();
    let runner = ResmokeRunner::new("mongo", "db", "core")
        .with_db_process("pmse-harness-test-no-such-process");
    let driver = Driver::new("db", Duration::from_secs(10));
    std::env::set_current_dir(previous).unwrap();

    let mut out = Vec::new();
    let tests = vec!["mkjob.js".to_string()];
    let summary = driver.run(&runner, &tests, &mut out).await.unwrap();

    assert_eq!(summary.passed, 1);
    assert!(base.path().join("db").is_dir());
    assert!(!base.path().join("db/job0").exists());
    assert!(!base.path().join("mongo/db").exists());
}
