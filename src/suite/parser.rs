//! Suite-definition grammar.
//!
//! ```text
//! # comment
//! SUITE write_workload
//! THREADS 1 2 4 8 16
//! JOURNALING enabled
//! RECORDS 1000
//! OPERATIONS 100
//! READ_PROPORTION 0.0
//! UPDATE_PROPORTION 0.0
//! INSERT_PROPORTION 1.0
//! YCSB_NUMA 1
//! DROP_BEFORE
//! ENDSUITE
//! ```
//!
//! Blank lines and `#` comments are skipped. Every other line holds exactly
//! one keyword, as its first token.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::config::{Journaling, SuiteConfig};
use super::error::{ConfigError, Result};
use crate::constants::CONFIGURATIONS_FILE;
use crate::utils::is_safe_path_component;

/// Keywords of the suite-definition grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Suite,
    Threads,
    Journaling,
    Records,
    Operations,
    ReadProportion,
    UpdateProportion,
    InsertProportion,
    YcsbNuma,
    Load,
    DropBefore,
    CreateAfterDrop,
    EndSuite,
}

impl Keyword {
    /// Every keyword, in grammar order.
    pub const ALL: [Keyword; 13] = [
        Self::Suite,
        Self::Threads,
        Self::Journaling,
        Self::Records,
        Self::Operations,
        Self::ReadProportion,
        Self::UpdateProportion,
        Self::InsertProportion,
        Self::YcsbNuma,
        Self::Load,
        Self::DropBefore,
        Self::CreateAfterDrop,
        Self::EndSuite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Suite => "SUITE",
            Self::Threads => "THREADS",
            Self::Journaling => "JOURNALING",
            Self::Records => "RECORDS",
            Self::Operations => "OPERATIONS",
            Self::ReadProportion => "READ_PROPORTION",
            Self::UpdateProportion => "UPDATE_PROPORTION",
            Self::InsertProportion => "INSERT_PROPORTION",
            Self::YcsbNuma => "YCSB_NUMA",
            Self::Load => "LOAD",
            Self::DropBefore => "DROP_BEFORE",
            Self::CreateAfterDrop => "CREATE_AFTER_DROP",
            Self::EndSuite => "ENDSUITE",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Keyword {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.as_str() == s).ok_or(())
    }
}

/// One meaningful line: its keyword and the tokens after it.
#[derive(Debug, PartialEq, Eq)]
struct Directive<'a> {
    line: usize,
    keyword: Keyword,
    args: Vec<&'a str>,
}

impl<'a> Directive<'a> {
    /// Tokenize a line. Returns `None` for blank lines and comments.
    fn parse(line: usize, text: &'a str) -> Result<Option<Self>> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let found = tokens
            .iter()
            .filter(|t| t.parse::<Keyword>().is_ok())
            .count();
        if found != 1 {
            return Err(ConfigError::KeywordCount { line, found });
        }

        let keyword = tokens[0]
            .parse::<Keyword>()
            .map_err(|()| ConfigError::UnrecognizedKeyword {
                line,
                token: tokens[0].to_string(),
            })?;

        Ok(Some(Self {
            line,
            keyword,
            args: tokens[1..].to_vec(),
        }))
    }

    fn no_args(&self) -> Result<()> {
        match self.args.first() {
            None => Ok(()),
            Some(token) => Err(self.unexpected(token)),
        }
    }

    fn single_arg(&self) -> Result<&'a str> {
        match self.args.as_slice() {
            [] => Err(ConfigError::MissingArgument {
                line: self.line,
                keyword: self.keyword,
            }),
            [value] => Ok(*value),
            [_, extra, ..] => Err(self.unexpected(extra)),
        }
    }

    fn parse_arg<T>(&self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.single_arg()?;
        value
            .parse()
            .map_err(|e| ConfigError::invalid_value(self.line, self.keyword, value, e))
    }

    fn proportion(&self) -> Result<f64> {
        let value: f64 = self.parse_arg()?;
        if (0.0..=1.0).contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::invalid_value(
                self.line,
                self.keyword,
                self.args[0],
                "must be between 0.0 and 1.0",
            ))
        }
    }

    fn threads(&self) -> Result<Vec<u32>> {
        if self.args.is_empty() {
            return Err(ConfigError::MissingArgument {
                line: self.line,
                keyword: self.keyword,
            });
        }

        self.args
            .iter()
            .map(|token| match token.parse::<u32>() {
                Ok(0) => Err(ConfigError::invalid_value(
                    self.line,
                    self.keyword,
                    *token,
                    "thread count must be positive",
                )),
                Ok(n) => Ok(n),
                Err(e) => Err(ConfigError::invalid_value(self.line, self.keyword, *token, e)),
            })
            .collect()
    }

    fn unexpected(&self, token: &str) -> ConfigError {
        ConfigError::UnexpectedArgument {
            line: self.line,
            keyword: self.keyword,
            token: token.to_string(),
        }
    }

    /// Apply a setting to the open suite.
    fn apply(&self, suite: &mut SuiteConfig) -> Result<()> {
        match self.keyword {
            Keyword::Threads => suite.threads = self.threads()?,
            Keyword::Journaling => {
                let value = self.single_arg()?;
                let journaling = Journaling::from_setting(value).ok_or_else(|| {
                    ConfigError::invalid_value(
                        self.line,
                        self.keyword,
                        value,
                        "expected 'enabled' or 'disabled'",
                    )
                })?;
                suite.journaling = Some(journaling);
            },
            Keyword::Records => suite.records = self.parse_arg()?,
            Keyword::Operations => suite.operations = self.parse_arg()?,
            Keyword::ReadProportion => suite.read_proportion = Some(self.proportion()?),
            Keyword::UpdateProportion => suite.update_proportion = Some(self.proportion()?),
            Keyword::InsertProportion => suite.insert_proportion = Some(self.proportion()?),
            Keyword::YcsbNuma => suite.ycsb_numa = Some(self.parse_arg()?),
            Keyword::Load => {
                self.no_args()?;
                suite.is_load = true;
            },
            Keyword::DropBefore => {
                self.no_args()?;
                suite.drop_before = true;
            },
            Keyword::CreateAfterDrop => {
                self.no_args()?;
                suite.create_after_drop = true;
            },
            Keyword::Suite | Keyword::EndSuite => {
                unreachable!("block keywords are handled by the fold")
            },
        }
        Ok(())
    }
}

/// Parser state: finished suites plus the one still open.
#[derive(Debug, Default)]
struct Accumulator {
    done: Vec<SuiteConfig>,
    open: Option<SuiteConfig>,
}

impl Accumulator {
    fn step(mut self, directive: &Directive<'_>) -> Result<Self> {
        match directive.keyword {
            Keyword::Suite => {
                let name = directive.single_arg()?;
                // Suite directories share the results directory with the JSON dump.
                if !is_safe_path_component(name) || name == CONFIGURATIONS_FILE {
                    return Err(ConfigError::InvalidSuiteName {
                        line: directive.line,
                        name: name.to_string(),
                    });
                }
                self.done.extend(self.open.take());
                self.open = Some(SuiteConfig::new(name));
            },
            Keyword::EndSuite => {
                directive.no_args()?;
                match self.open.take() {
                    Some(suite) => self.done.push(suite),
                    None => debug!("line {}: ENDSUITE without an open suite", directive.line),
                }
            },
            keyword => {
                let suite = self.open.as_mut().ok_or(ConfigError::OutsideSuite {
                    line: directive.line,
                    keyword,
                })?;
                directive.apply(suite)?;
            },
        }
        Ok(self)
    }

    fn finish(mut self) -> Vec<SuiteConfig> {
        self.done.extend(self.open.take());
        self.done
    }
}

/// Parse a suite-definition file into suites, in file order.
///
/// # Errors
///
/// Returns the first grammar or value error, with its 1-based line number.
pub fn parse_suites(source: &str) -> Result<Vec<SuiteConfig>> {
    source
        .lines()
        .enumerate()
        .try_fold(Accumulator::default(), |acc, (index, text)| {
            match Directive::parse(index + 1, text)? {
                Some(directive) => acc.step(&directive),
                None => Ok(acc),
            }
        })
        .map(Accumulator::finish)
}
