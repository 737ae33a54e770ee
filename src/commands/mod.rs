//! CLI command implementations for pmse-harness.
//!
//! - [`jstests`] - run the JavaScript test suite through `resmoke.py`
//! - [`plan`] - compile a YCSB suite definition into `testplan.sh`

pub mod jstests;
pub mod plan;

use anyhow::Result;
use std::path::Path;

/// Require a file to exist, printing a hint if not found.
pub fn require_file(path: &Path, hint: &str) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }

    eprintln!("\nError: {} not found\n", path.display());
    eprintln!("{hint}");

    anyhow::bail!("Missing required file: {}", path.display())
}

/// Require a directory to exist.
pub fn require_dir(path: &Path, what: &str) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    anyhow::bail!("{what} is not a directory: {}", path.display())
}
