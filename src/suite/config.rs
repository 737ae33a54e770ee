//! Parsed suite configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ui::label_line;

/// Durability mode, serialized as the token YCSB's MongoDB binding expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Journaling {
    #[serde(rename = "journaled")]
    Enabled,
    #[serde(rename = "acknowledged")]
    Disabled,
}

impl Journaling {
    /// Parse the `enabled` / `disabled` setting of a `JOURNALING` line.
    pub fn from_setting(value: &str) -> Option<Self> {
        match value {
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Write-concern token passed to the benchmark.
    pub fn token(self) -> &'static str {
        match self {
            Self::Enabled => "journaled",
            Self::Disabled => "acknowledged",
        }
    }
}

/// Benchmark phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Populate the initial records.
    Load,
    /// Execute the measured workload.
    Run,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Run => "run",
        }
    }
}

/// One `SUITE ... ENDSUITE` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub name: String,
    pub threads: Vec<u32>,
    pub journaling: Option<Journaling>,
    pub records: u64,
    pub operations: u64,
    pub read_proportion: Option<f64>,
    pub update_proportion: Option<f64>,
    pub insert_proportion: Option<f64>,
    pub ycsb_numa: Option<u32>,
    pub drop_before: bool,
    pub create_after_drop: bool,
    pub is_load: bool,
}

impl SuiteConfig {
    /// Create an empty suite with defaults for every field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            threads: Vec::new(),
            journaling: None,
            records: 0,
            operations: 0,
            read_proportion: None,
            update_proportion: None,
            insert_proportion: None,
            ycsb_numa: None,
            drop_before: false,
            create_after_drop: false,
            is_load: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_load { Phase::Load } else { Phase::Run }
    }

    /// Journaling token for the generated command.
    ///
    /// Loading never journals; a run without a `JOURNALING` line is
    /// acknowledged only.
    pub fn journaling_token(&self) -> &'static str {
        match self.phase() {
            Phase::Load => Journaling::Disabled.token(),
            Phase::Run => self.journaling.unwrap_or(Journaling::Disabled).token(),
        }
    }

    /// Whether the table is dropped before each benchmark invocation.
    pub fn drops_table(&self) -> bool {
        self.drop_before || self.create_after_drop || self.is_load
    }

    /// Human-readable description, numbered from 1.
    pub fn describe(&self, number: usize) -> SuiteDescription<'_> {
        SuiteDescription {
            number,
            suite: self,
        }
    }
}

/// Aligned text description of a suite, as printed and stored under
/// `results/<suite>/`.
#[derive(Debug)]
pub struct SuiteDescription<'a> {
    number: usize,
    suite: &'a SuiteConfig,
}

fn optional<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for SuiteDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.suite;
        let lines = [
            label_line("Test#: ", self.number),
            label_line("Name: ", &s.name),
            label_line("Threads: ", format!("{:?}", s.threads)),
            label_line("Journaling: ", optional(s.journaling.map(Journaling::token))),
            label_line("Records: ", s.records),
            label_line("Operation: ", s.operations),
            label_line("Read proportion: ", optional(s.read_proportion)),
            label_line("Update proportion: ", optional(s.update_proportion)),
            label_line("Insert proportion: ", optional(s.insert_proportion)),
            label_line("NUMA for YCSB: ", optional(s.ycsb_numa)),
        ];
        for line in lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f)
    }
}
