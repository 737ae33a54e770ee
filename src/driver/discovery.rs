//! Test discovery from the runner's listing output.

use std::path::Path;

use crate::constants::{JSTESTS_DIR, TEST_EXTENSION};

/// Extract test paths from the output of `resmoke.py --suites=<suite> -n`.
///
/// Only lines that look like paths under the test tree and end in the test
/// extension are kept; each is joined onto `mongo_root`. Banner and log
/// lines are dropped.
pub fn parse_listing(stdout: &str, mongo_root: &Path) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| line.starts_with(JSTESTS_DIR) && line.ends_with(TEST_EXTENSION))
        .map(|line| mongo_root.join(line).display().to_string())
        .collect()
}
