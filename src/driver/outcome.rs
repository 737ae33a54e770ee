//! Test outcome classification.

use std::fmt;
use std::time::Duration;

use crate::constants::{NO_TESTS_MARKER, WARNINGS_MARKER};

/// How a single runner invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The runner exited on its own. `code` is `None` when it was killed by
    /// a signal.
    Exited { code: Option<i32>, output: String },
    /// The timeout elapsed first.
    TimedOut,
}

impl Completion {
    /// Convenience constructor for a normal exit.
    pub fn exited(code: i32, output: impl Into<String>) -> Self {
        Self::Exited {
            code: Some(code),
            output: output.into(),
        }
    }

    /// Captured output; empty for a timeout.
    pub fn output(&self) -> &str {
        match self {
            Self::Exited { output, .. } => output,
            Self::TimedOut => "",
        }
    }
}

/// Classified test status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Passed,
    /// Non-zero exit, but everything was skipped and nothing failed.
    PassedWithWarnings { code: i32 },
    Failed { code: Option<i32> },
    TimedOut,
    Skipped,
}

impl Status {
    /// Whether the captured output is shown for this status.
    pub fn shows_output(self) -> bool {
        matches!(self, Self::Failed { .. } | Self::PassedWithWarnings { .. })
    }

    /// Whether the status counts towards the failure total.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed { .. } | Self::TimedOut)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("PASSED"),
            Self::PassedWithWarnings { code } => {
                write!(f, "PASSED WITH WARNINGS. Test exited with code {code}")
            },
            Self::Failed { .. } => f.write_str("FAILED"),
            Self::TimedOut => f.write_str("TIMEOUT"),
            Self::Skipped => f.write_str("SKIPPED"),
        }
    }
}

/// Classify a runner completion. The first matching rule wins:
///
/// 1. non-zero exit with the all-skipped signature: passed with warnings
/// 2. zero exit with "No tests ran": skipped
/// 3. zero exit: passed
/// 4. anything else that exited: failed
/// 5. timeout: timed out
pub fn classify(completion: &Completion) -> Status {
    match completion {
        Completion::Exited {
            code: Some(code),
            output,
        } if *code != 0 && output.contains(WARNINGS_MARKER) => {
            Status::PassedWithWarnings { code: *code }
        },
        Completion::Exited {
            code: Some(0),
            output,
        } => {
            if output.contains(NO_TESTS_MARKER) {
                Status::Skipped
            } else {
                Status::Passed
            }
        },
        Completion::Exited { code, .. } => Status::Failed { code: *code },
        Completion::TimedOut => Status::TimedOut,
    }
}

/// One executed test, folded into the summary and then dropped.
#[derive(Debug, Clone)]
pub struct TestRecord {
    pub test: String,
    pub status: Status,
    pub elapsed: Duration,
    pub output: String,
}

impl TestRecord {
    /// Build a record from a runner completion.
    pub fn new(test: impl Into<String>, completion: Completion, elapsed: Duration) -> Self {
        let status = classify(&completion);
        let output = match completion {
            Completion::Exited { output, .. } => output,
            Completion::TimedOut => String::new(),
        };
        Self {
            test: test.into(),
            status,
            elapsed,
            output,
        }
    }
}
