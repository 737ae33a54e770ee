//! YCSB suite-plan compiler.
//!
//! Reads the tool locations and a declarative suite definition, then
//! produces:
//!
//! - `results/configurations.json` - one JSON record per suite
//! - `results/<suite>/test_description.txt` - aligned text description
//! - `testplan.sh` - the benchmark commands, one per suite and thread count
//!
//! Everything is parsed, validated and expanded by [`PlanJob::prepare`]
//! before [`CompiledPlan::write`] touches the filesystem, so a bad input
//! never leaves partial output behind.

pub mod config;
pub mod error;
pub mod parser;
pub mod paths;
pub mod plan;
pub mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

pub use config::{Journaling, Phase, SuiteConfig};
pub use error::ConfigError;
pub use parser::{Keyword, parse_suites};
pub use paths::PathConfig;
pub use plan::{CommandPlan, PlanOptions};

use crate::constants::{PATH_CONFIG_FILE, RESULTS_DIR, SUITE_FILE, TESTPLAN_FILE};

/// Inputs and outputs of one compiler run.
#[derive(Debug, Clone)]
pub struct PlanJob {
    pub paths_file: PathBuf,
    pub suites_file: PathBuf,
    pub results_dir: PathBuf,
    pub output: PathBuf,
    pub options: PlanOptions,
}

impl Default for PlanJob {
    fn default() -> Self {
        Self {
            paths_file: PathBuf::from(PATH_CONFIG_FILE),
            suites_file: PathBuf::from(SUITE_FILE),
            results_dir: PathBuf::from(RESULTS_DIR),
            output: PathBuf::from(TESTPLAN_FILE),
            options: PlanOptions::default(),
        }
    }
}

impl PlanJob {
    /// Parse and validate every input and expand the plan, without writing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in either input file.
    pub fn prepare(&self) -> std::result::Result<CompiledPlan, ConfigError> {
        let paths = PathConfig::load_from(&self.paths_file)?;

        let source = fs::read_to_string(&self.suites_file)
            .map_err(|e| ConfigError::read(&self.suites_file, e))?;
        let suites = parse_suites(&source)?;
        info!(
            suites = suites.len(),
            file = %self.suites_file.display(),
            "Parsed suite definitions"
        );

        let plan = CommandPlan::expand(&suites, &paths, self.options)?;

        Ok(CompiledPlan {
            suites,
            plan,
            results_dir: self.results_dir.clone(),
            output: self.output.clone(),
        })
    }
}

/// A fully validated plan, ready to be written.
#[derive(Debug, Clone)]
pub struct CompiledPlan {
    pub suites: Vec<SuiteConfig>,
    pub plan: CommandPlan,
    results_dir: PathBuf,
    output: PathBuf,
}

impl CompiledPlan {
    /// Write the results directory and the test plan script.
    pub fn write(&self) -> Result<()> {
        report::write_results(&self.results_dir, &self.suites)?;
        self.plan.write_script(&self.output)?;
        info!(
            commands = self.plan.len(),
            script = %self.output.display(),
            "Wrote test plan"
        );
        Ok(())
    }

    pub fn output(&self) -> &std::path::Path {
        &self.output
    }
}
