//! Cleanup between tests.
//!
//! Both operations are best effort: nothing here can abort a run.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;

use sysinfo::{ProcessesToUpdate, System};
use tracing::{debug, warn};

use crate::constants::JOB_DIR;

/// Remove `<dbpath>/job0` so the next test starts from an empty database.
///
/// A missing directory is fine; other failures are logged.
pub fn remove_job_dir(dbpath: &Path) {
    let job_dir = dbpath.join(JOB_DIR);
    match fs::remove_dir_all(&job_dir) {
        Ok(()) => debug!("Removed {}", job_dir.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {},
        Err(e) => warn!("Failed to remove {}: {}", job_dir.display(), e),
    }
}

/// Force-kill every running process with exactly this name.
///
/// Returns how many kill signals were delivered. Failures are ignored.
pub fn kill_processes_named(name: &str) -> usize {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    let killed = system
        .processes_by_exact_name(OsStr::new(name))
        .filter(|process| process.kill())
        .count();

    debug!(process = name, killed, "Kill sweep finished");
    killed
}
