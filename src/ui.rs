//! UI utilities for consistent terminal output formatting.
//!
//! Provides shared formatting for captured test output and the aligned
//! `label value` lines used in suite descriptions.

use std::io::{self, Write};

/// Width of output box separators.
const OUTPUT_BOX_WIDTH: usize = 60;

/// Width of the right-aligned label column in descriptions.
const LABEL_WIDTH: usize = 20;

/// Width of the left-aligned value column in descriptions.
const VALUE_WIDTH: usize = 12;

/// Write an output box with a title and the captured output of a command.
///
/// Outputs:
/// ```text
/// ============================================================
/// <title>
/// ============================================================
/// <output>
/// ```
///
/// An empty body only prints the framed title.
pub fn write_output_box<W: Write>(out: &mut W, title: &str, body: &str) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(OUTPUT_BOX_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(OUTPUT_BOX_WIDTH))?;

    let body = body.trim_end();
    if !body.is_empty() {
        writeln!(out, "{body}")?;
    }

    Ok(())
}

/// Format a description line: label right-aligned, value left-aligned.
///
/// # Examples
///
/// ```
/// use pmse_harness::ui::label_line;
///
/// assert_eq!(label_line("Name: ", "insert"), "              Name:  insert      ");
/// ```
pub fn label_line(label: &str, value: impl std::fmt::Display) -> String {
    format!(
        "{label:>label_width$} {value:<value_width$}",
        value = value.to_string(),
        label_width = LABEL_WIDTH,
        value_width = VALUE_WIDTH,
    )
}
