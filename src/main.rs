//! pmse-harness CLI.
//!
//! - `pmse-harness jstests` - run the MongoDB JavaScript tests against pmse
//! - `pmse-harness plan` - turn a YCSB suite definition into `testplan.sh`

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pmse_harness::constants;

#[derive(Parser)]
#[command(name = "pmse-harness")]
#[command(about = "Test and benchmark harness for the pmse storage engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run jstests through resmoke.py, one test at a time
    Jstests(JstestsArgs),

    /// Compile test_suite.txt into a YCSB test plan
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
pub struct JstestsArgs {
    /// Path to mongo source root directory
    #[arg(short, long)]
    pub mongo_root: PathBuf,

    /// Directory where the database is created
    #[arg(short, long)]
    pub dbpath: PathBuf,

    /// Suite to run
    #[arg(short, long)]
    pub suite: String,

    /// Test case timeout in seconds
    #[arg(long, default_value_t = constants::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Storage engine passed to resmoke.py
    #[arg(long, default_value = constants::DEFAULT_STORAGE_ENGINE)]
    pub storage_engine: String,

    /// Tests from the selected suite to run (default: run all)
    #[arg(short, long, num_args = 1..)]
    pub tests: Option<Vec<String>>,

    /// Exit with status 0 even if tests failed
    #[arg(long)]
    pub no_fail_exit: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path configuration with YCSB_PATH= and MONGO_PATH= lines
    #[arg(long, default_value = constants::PATH_CONFIG_FILE)]
    pub paths: PathBuf,

    /// Suite definition file
    #[arg(long, default_value = constants::SUITE_FILE)]
    pub suites: PathBuf,

    /// Directory for configurations.json and per-suite descriptions
    #[arg(long, default_value = constants::RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Generated script
    #[arg(short, long, default_value = constants::TESTPLAN_FILE)]
    pub output: PathBuf,

    /// Embed -1 for an unset YCSB_NUMA instead of failing
    #[arg(long)]
    pub allow_unset_numa: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Jstests(args) => commands::jstests::execute(args).await,
        Commands::Plan(args) => commands::plan::execute(args),
    }
}

/// Initialize logging on stderr; stdout carries the reports.
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool, format: LogFormat) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}
