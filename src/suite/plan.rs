//! Expansion of suites into the shell commands of `testplan.sh`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use super::config::SuiteConfig;
use super::error::ConfigError;
use super::paths::PathConfig;
use crate::constants::{
    CREATE_TABLE_SCRIPT, DROP_TABLE_SCRIPT, MONGO_SHELL, SCRIPT_HEADER, UNSET_NUMA_NODE,
    WORKLOAD_SCRIPT,
};

/// Knobs for plan expansion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Embed `-1` with a warning instead of failing on an unset NUMA node.
    pub allow_unset_numa: bool,
}

/// Ordered shell commands of a test plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPlan {
    commands: Vec<String>,
}

impl CommandPlan {
    /// Expand every suite across its thread counts, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a suite lacks a proportion, or its NUMA node
    /// while `allow_unset_numa` is off.
    pub fn expand(
        suites: &[SuiteConfig],
        paths: &PathConfig,
        options: PlanOptions,
    ) -> Result<Self, ConfigError> {
        let mongo = &paths.mongo_path;
        let mongo_shell = mongo.join(MONGO_SHELL);
        let drop_table = format!(
            "{} {}",
            mongo_shell.display(),
            mongo.join(DROP_TABLE_SCRIPT).display()
        );
        let create_table = format!(
            "{} {}",
            mongo_shell.display(),
            mongo.join(CREATE_TABLE_SCRIPT).display()
        );

        let mut commands = Vec::new();
        for suite in suites {
            let workload_args = workload_args(suite, options)?;
            if suite.threads.is_empty() {
                warn!("Suite '{}' has no THREADS; nothing generated", suite.name);
            }

            for threads in &suite.threads {
                if suite.drops_table() {
                    commands.push(drop_table.clone());
                }
                if suite.create_after_drop {
                    commands.push(create_table.clone());
                }
                commands.push(format!(
                    "{} {} {} {} {threads} {workload_args} {}",
                    WORKLOAD_SCRIPT,
                    suite.name,
                    suite.phase().as_str(),
                    suite.journaling_token(),
                    paths.ycsb_path.display()
                ));
            }
        }

        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Script text: header line then one command per line.
    pub fn render(&self) -> String {
        let mut script = String::from(SCRIPT_HEADER);
        script.push('\n');
        for command in &self.commands {
            script.push_str(command);
            script.push('\n');
        }
        script
    }

    /// Write the script to `path` and make it executable.
    pub fn write_script(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .with_context(|| format!("Failed to write test plan: {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755))
                .with_context(|| format!("Failed to make {} executable", path.display()))?;
        }

        Ok(())
    }
}

/// `<records> <operations> <read> <update> <insert> <numa>` for a suite.
fn workload_args(suite: &SuiteConfig, options: PlanOptions) -> Result<String, ConfigError> {
    let proportion = |value: Option<f64>, field| {
        value.ok_or_else(|| ConfigError::incomplete(&suite.name, field))
    };
    let read = proportion(suite.read_proportion, "READ_PROPORTION")?;
    let update = proportion(suite.update_proportion, "UPDATE_PROPORTION")?;
    let insert = proportion(suite.insert_proportion, "INSERT_PROPORTION")?;

    let numa = match suite.ycsb_numa {
        Some(node) => node.to_string(),
        None if options.allow_unset_numa => {
            warn!("NUMA node is not set for test: {}.", suite.name);
            UNSET_NUMA_NODE.to_string()
        },
        None => return Err(ConfigError::incomplete(&suite.name, "YCSB_NUMA")),
    };

    Ok(format!(
        "{} {} {read} {update} {insert} {numa}",
        suite.records, suite.operations
    ))
}
