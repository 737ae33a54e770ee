//! `resmoke.py` invocation.
//!
//! Each test runs as a child process with stderr merged into stdout. A
//! reader thread drains the shared pipe so a chatty test can never block on
//! a full pipe while we wait for it.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::TestRunner;
use super::cleanup::kill_processes_named;
use super::discovery::parse_listing;
use super::error::{DriverError, Result};
use super::outcome::Completion;
use crate::constants::{DB_PROCESS_NAME, DEFAULT_STORAGE_ENGINE, JSTESTS_DIR, RESMOKE_PATH};
use crate::utils::absolute_path;

/// Runs tests through `<mongo_root>/buildscripts/resmoke.py`.
#[derive(Debug, Clone)]
pub struct ResmokeRunner {
    mongo_root: PathBuf,
    dbpath: PathBuf,
    suite: String,
    storage_engine: String,
    program: PathBuf,
    db_process: String,
}

impl ResmokeRunner {
    /// Create a runner for `suite` using the resmoke script under `mongo_root`.
    pub fn new(
        mongo_root: impl Into<PathBuf>,
        dbpath: impl Into<PathBuf>,
        suite: impl Into<String>,
    ) -> Self {
        let mongo_root = absolute_path(mongo_root.into());
        let program = RESMOKE_PATH
            .iter()
            .fold(mongo_root.clone(), |path, part| path.join(part));
        Self {
            mongo_root,
            dbpath: absolute_path(dbpath.into()),
            suite: suite.into(),
            storage_engine: DEFAULT_STORAGE_ENGINE.to_string(),
            program,
            db_process: DB_PROCESS_NAME.to_string(),
        }
    }

    /// Select the storage engine passed as `--storageEngine`.
    #[must_use]
    pub fn with_storage_engine(mut self, engine: impl Into<String>) -> Self {
        self.storage_engine = engine.into();
        self
    }

    /// Override the process name force-killed after a timeout.
    #[must_use]
    pub fn with_db_process(mut self, name: impl Into<String>) -> Self {
        self.db_process = name.into();
        self
    }

    /// Path of the resmoke script.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Fixed flags of every test invocation.
    pub fn run_args(&self) -> Vec<String> {
        vec![
            "--continueOnFailure".to_string(),
            format!("--storageEngine={}", self.storage_engine),
            format!("--suites={}", self.suite),
            format!("--dbpath={}", self.dbpath.display()),
        ]
    }

    /// Location of a test: relative names resolve under `jstests/<suite>`,
    /// absolute paths are used as they are.
    pub fn test_path(&self, test: &str) -> PathBuf {
        self.mongo_root.join(JSTESTS_DIR).join(&self.suite).join(test)
    }

    /// Wait for the child and the drained output, then map the exit status.
    async fn wait_for_completion(
        &self,
        child: &mut tokio::process::Child,
        output: oneshot::Receiver<Vec<u8>>,
    ) -> Result<Completion> {
        let status = child
            .wait()
            .await
            .map_err(|e| DriverError::wait(&self.program, e))?;
        let bytes = output.await.unwrap_or_default();

        Ok(Completion::Exited {
            code: status.code(),
            output: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

#[async_trait]
impl TestRunner for ResmokeRunner {
    async fn list_tests(&self) -> Result<Vec<String>> {
        debug!(program = %self.program.display(), suite = %self.suite, "Listing tests");

        let output = Command::new(&self.program)
            .arg(format!("--suites={}", self.suite))
            .arg("-n")
            .current_dir(&self.mongo_root)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| DriverError::spawn(&self.program, e))?;

        if !output.status.success() {
            warn!("Test listing exited with {}", output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_listing(&stdout, &self.mongo_root))
    }

    async fn run_test(&self, test: &str, timeout: Duration) -> Result<Completion> {
        let test_path = self.test_path(test);
        let args = self.run_args();
        debug!(
            "Running: {} {} {}",
            self.program.display(),
            args.join(" "),
            test_path.display()
        );

        let (mut reader, writer) =
            std::io::pipe().map_err(|e| DriverError::spawn(&self.program, e))?;

        // The command holds copies of the write end; it must be dropped once
        // spawned or the reader never sees EOF.
        let mut child = {
            let stderr = writer
                .try_clone()
                .map_err(|e| DriverError::spawn(&self.program, e))?;
            let mut cmd = Command::new(&self.program);
            cmd.args(&args)
                .arg(&test_path)
                .current_dir(&self.mongo_root)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr)
                .kill_on_drop(true);
            cmd.spawn()
                .map_err(|e| DriverError::spawn(&self.program, e))?
        };

        let (tx, rx) = oneshot::channel();
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Err(e) = reader.read_to_end(&mut buf) {
                debug!("Output pipe closed with error: {}", e);
            }
            let _ = tx.send(buf);
        });

        match tokio::time::timeout(timeout, self.wait_for_completion(&mut child, rx)).await {
            Ok(completion) => completion,
            Err(_) => {
                debug!("Timed out after {}s: {}", timeout.as_secs(), test);
                let _ = child.start_kill();
                let _ = child.wait().await;
                kill_processes_named(&self.db_process);
                Ok(Completion::TimedOut)
            },
        }
    }
}
