//! Compile a YCSB suite definition into a test plan.
//!
//! Reads `path_configuration.txt` and `test_suite.txt` from the working
//! directory (both overridable), prints what was read, then writes the
//! results directory and `testplan.sh`.

use anyhow::{Context, Result};

use pmse_harness::suite::{PlanJob, PlanOptions, report};

use crate::PlanArgs;

/// Execute the plan command.
pub fn execute(args: PlanArgs) -> Result<()> {
    let job = PlanJob {
        paths_file: args.paths,
        suites_file: args.suites,
        results_dir: args.results_dir,
        output: args.output,
        options: PlanOptions {
            allow_unset_numa: args.allow_unset_numa,
        },
    };

    let compiled = job.prepare().context("Invalid benchmark configuration")?;

    report::write_summary(&mut std::io::stdout(), &compiled.suites)?;
    compiled.write()?;

    println!(
        "Generated {} commands for {} suites in {}",
        compiled.plan.len(),
        compiled.suites.len(),
        compiled.output().display()
    );

    Ok(())
}
