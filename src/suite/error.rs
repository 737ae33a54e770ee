//! Configuration error types for the suite-plan compiler.
//!
//! Every variant is fatal: nothing is written once one of these is raised.

use std::path::PathBuf;

use super::parser::Keyword;

/// Result type for configuration parsing and plan expansion.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `YCSB_PATH=` or `MONGO_PATH=` with nothing after the `=`.
    #[error("no path in {key}")]
    EmptyPath { key: &'static str },

    /// A required path key never appeared.
    #[error("{key} is missing from {}", .path.display())]
    MissingPathKey { key: &'static str, path: PathBuf },

    /// A configured path is not an existing directory.
    #[error("wrong path to {what}: {} is not a directory", .path.display())]
    NotADirectory { what: &'static str, path: PathBuf },

    /// A line holds zero or several keywords.
    #[error("line {line}: expected exactly one keyword, found {found}")]
    KeywordCount { line: usize, found: usize },

    /// The keyword is not the first token of its line.
    #[error("line {line}: unrecognized keyword '{token}'")]
    UnrecognizedKeyword { line: usize, token: String },

    /// A suite setting appeared before any `SUITE` line.
    #[error("line {line}: {keyword} outside of a SUITE block")]
    OutsideSuite { line: usize, keyword: Keyword },

    /// A keyword is missing its argument.
    #[error("line {line}: {keyword} requires an argument")]
    MissingArgument { line: usize, keyword: Keyword },

    /// A keyword got more arguments than it takes.
    #[error("line {line}: unexpected argument '{token}' after {keyword}")]
    UnexpectedArgument {
        line: usize,
        keyword: Keyword,
        token: String,
    },

    /// An argument failed to parse or is out of range.
    #[error("line {line}: invalid {keyword} value '{value}': {reason}")]
    InvalidValue {
        line: usize,
        keyword: Keyword,
        value: String,
        reason: String,
    },

    /// A suite name that cannot be used as a results subdirectory.
    #[error("line {line}: invalid suite name '{name}'")]
    InvalidSuiteName { line: usize, name: String },

    /// A suite lacks a value its benchmark command needs.
    #[error("suite '{suite}': {field} is not set")]
    IncompleteSuite { suite: String, field: &'static str },
}

impl ConfigError {
    /// Create a read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(
        line: usize,
        keyword: Keyword,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidValue {
            line,
            keyword,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an incomplete suite error.
    pub fn incomplete(suite: impl Into<String>, field: &'static str) -> Self {
        Self::IncompleteSuite {
            suite: suite.into(),
            field,
        }
    }
}
