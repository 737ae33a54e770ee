//! Shared constants for the test driver and the suite-plan compiler.

// =============================================================================
// Test Driver
// =============================================================================

/// Default per-test timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5 * 60;

/// Storage engine passed to the test runner unless overridden.
pub const DEFAULT_STORAGE_ENGINE: &str = "pmse";

/// Test runner location, relative to the mongo source root.
pub const RESMOKE_PATH: [&str; 2] = ["buildscripts", "resmoke.py"];

/// Directory under the mongo root holding the JavaScript test tree.
pub const JSTESTS_DIR: &str = "jstests";

/// Extension of a JavaScript test file.
pub const TEST_EXTENSION: &str = ".js";

/// Per-test working directory the runner creates under `--dbpath`.
pub const JOB_DIR: &str = "job0";

/// Database process force-killed after a timeout.
pub const DB_PROCESS_NAME: &str = "mongod";

/// Output signature of a run where everything was skipped but nothing failed.
pub const WARNINGS_MARKER: &str = "were skipped, 0 failed, 0 errored";

/// Output signature of a run that executed nothing.
pub const NO_TESTS_MARKER: &str = "No tests ran";

/// Extra columns between the longest test name and its status.
pub const STATUS_MARGIN: usize = 8;

// =============================================================================
// Suite-Plan Compiler
// =============================================================================

/// Default path-configuration file (`YCSB_PATH=` / `MONGO_PATH=` lines).
pub const PATH_CONFIG_FILE: &str = "path_configuration.txt";

/// Default suite-definition file.
pub const SUITE_FILE: &str = "test_suite.txt";

/// Default results directory.
pub const RESULTS_DIR: &str = "results";

/// JSON-lines file holding every parsed suite.
pub const CONFIGURATIONS_FILE: &str = "configurations.json";

/// Per-suite human-readable description.
pub const DESCRIPTION_FILE: &str = "test_description.txt";

/// Default generated script.
pub const TESTPLAN_FILE: &str = "testplan.sh";

/// First line of the generated script.
pub const SCRIPT_HEADER: &str = "#!/bin/bash";

/// Wrapper script invoked once per suite and thread count.
pub const WORKLOAD_SCRIPT: &str = "./run_workload.sh";

/// Mongo shell binary name under `MONGO_PATH`.
pub const MONGO_SHELL: &str = "mongo";

/// Shell script dropping the benchmark table.
pub const DROP_TABLE_SCRIPT: &str = "drop_table.js";

/// Shell script recreating the benchmark table.
pub const CREATE_TABLE_SCRIPT: &str = "create_table.js";

/// Value embedded for an unset NUMA node when the legacy behavior is requested.
pub const UNSET_NUMA_NODE: &str = "-1";
