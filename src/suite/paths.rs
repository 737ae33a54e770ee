//! Tool locations from `path_configuration.txt`.
//!
//! ```text
//! YCSB_PATH=/opt/YCSB/
//! MONGO_PATH=/opt/mongo/
//! ```
//!
//! Other lines are ignored; a repeated key keeps its last value.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};

const YCSB_KEY: &str = "YCSB_PATH";
const MONGO_KEY: &str = "MONGO_PATH";

/// Directories of the benchmark tool and the mongo build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConfig {
    pub ycsb_path: PathBuf,
    pub mongo_path: PathBuf,
}

impl PathConfig {
    /// Load and validate the path configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a key is missing or
    /// empty, or either path is not an existing directory.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        let config = Self::parse(&content, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the key-value lines without touching the filesystem.
    /// `origin` only names the file in error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let mut ycsb = None;
        let mut mongo = None;

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let (name, slot) = match key {
                YCSB_KEY => (YCSB_KEY, &mut ycsb),
                MONGO_KEY => (MONGO_KEY, &mut mongo),
                _ => continue,
            };
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::EmptyPath { key: name });
            }
            *slot = Some(PathBuf::from(value));
        }

        let missing = |key| ConfigError::MissingPathKey {
            key,
            path: origin.to_path_buf(),
        };
        Ok(Self {
            ycsb_path: ycsb.ok_or_else(|| missing(YCSB_KEY))?,
            mongo_path: mongo.ok_or_else(|| missing(MONGO_KEY))?,
        })
    }

    /// Check that both paths are existing directories.
    pub fn validate(&self) -> Result<()> {
        if !self.mongo_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                what: "MONGO",
                path: self.mongo_path.clone(),
            });
        }
        if !self.ycsb_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                what: "YCSB",
                path: self.ycsb_path.clone(),
            });
        }
        Ok(())
    }
}
