//! Parsed-configuration reports: stdout summary, `configurations.json` and
//! per-suite `test_description.txt`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use super::config::SuiteConfig;
use crate::constants::{CONFIGURATIONS_FILE, DESCRIPTION_FILE};

/// Write the human-readable summary of every suite.
pub fn write_summary<W: Write>(out: &mut W, suites: &[SuiteConfig]) -> io::Result<()> {
    writeln!(out, "Script read those tests:")?;
    for (index, suite) in suites.iter().enumerate() {
        write!(out, "{}", suite.describe(index + 1))?;
    }
    Ok(())
}

/// One JSON object per suite, newline-delimited.
pub fn configurations_json(suites: &[SuiteConfig]) -> serde_json::Result<String> {
    let mut jsonl = String::new();
    for suite in suites {
        jsonl.push_str(&serde_json::to_string(suite)?);
        jsonl.push('\n');
    }
    Ok(jsonl)
}

/// Write `configurations.json` (replacing any previous one) and append each
/// suite's description to `<results>/<suite>/test_description.txt`.
pub fn write_results(results_dir: &Path, suites: &[SuiteConfig]) -> Result<()> {
    fs::create_dir_all(results_dir).with_context(|| {
        format!(
            "Failed to create results directory: {}",
            results_dir.display()
        )
    })?;

    let json_path = results_dir.join(CONFIGURATIONS_FILE);
    let jsonl = configurations_json(suites).context("Failed to serialize configurations")?;
    fs::write(&json_path, jsonl)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    for (index, suite) in suites.iter().enumerate() {
        let suite_dir = results_dir.join(&suite.name);
        fs::create_dir_all(&suite_dir)
            .with_context(|| format!("Failed to create {}", suite_dir.display()))?;

        let description_path = suite_dir.join(DESCRIPTION_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&description_path)
            .with_context(|| format!("Failed to open {}", description_path.display()))?;
        write!(file, "{}", suite.describe(index + 1))
            .with_context(|| format!("Failed to write {}", description_path.display()))?;
    }

    Ok(())
}
