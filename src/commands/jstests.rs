//! Run the JavaScript test suite one test at a time.
//!
//! `pmse-harness jstests -m <mongo-root> -d <dbpath> -s core` discovers every
//! test of the suite through `resmoke.py -n`; `-t a.js b.js` runs only the
//! named tests.

use anyhow::{Context, Result};
use std::time::Duration;

use pmse_harness::driver::{Driver, ResmokeRunner, TestRunner};

use super::{require_dir, require_file};
use crate::JstestsArgs;

/// Execute the jstests command.
///
/// Fails when any test failed or timed out, unless `--no-fail-exit` is set.
pub async fn execute(args: JstestsArgs) -> Result<()> {
    // resmoke runs from the mongo root, so both paths are anchored here first.
    let mongo_root = std::path::absolute(&args.mongo_root).with_context(|| {
        format!("Failed to resolve mongo root '{}'", args.mongo_root.display())
    })?;
    let dbpath = std::path::absolute(&args.dbpath)
        .with_context(|| format!("Failed to resolve dbpath '{}'", args.dbpath.display()))?;

    require_dir(&mongo_root, "Mongo root")?;

    let runner = ResmokeRunner::new(&mongo_root, &dbpath, &args.suite)
        .with_storage_engine(&args.storage_engine);
    require_file(
        runner.program(),
        "The test runner ships with the mongo sources. Check --mongo-root.",
    )?;

    let tests = match args.tests {
        Some(tests) if !tests.is_empty() => tests,
        _ => runner
            .list_tests()
            .await
            .with_context(|| format!("Failed to list tests for suite '{}'", args.suite))?,
    };

    if tests.is_empty() {
        println!("No tests found for suite '{}'", args.suite);
        return Ok(());
    }

    let driver = Driver::new(&dbpath, Duration::from_secs(args.timeout));
    let mut stdout = std::io::stdout();
    let summary = driver
        .run(&runner, &tests, &mut stdout)
        .await
        .context("Test run aborted")?;

    if !summary.is_success() && !args.no_fail_exit {
        anyhow::bail!(
            "{} of {} tests failed",
            summary.failure_count(),
            summary.total
        );
    }

    Ok(())
}
