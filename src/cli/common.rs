//! Shared types for CLI commands: exit codes, errors and output helpers.

use serde::Serialize;
use swatchmatch::color::{normalize, Color};

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input (unparseable color, unknown vibe, no colors in text)
    ValidationError = 1,
    /// File, network or serialization failure
    IoError = 2,
}

/// Error returned by command handlers.
#[derive(Debug)]
pub struct CliError {
    /// Printed to stderr after `Error: `.
    pub message: String,
    /// Process exit status.
    pub code: ExitCode,
}

impl CliError {
    /// Input error, exit code 1.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ExitCode::ValidationError,
        }
    }

    /// Runtime error, exit code 2.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: ExitCode::IoError,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Parses a hex color argument.
pub fn parse_color(input: &str) -> CliResult<Color> {
    normalize(input).ok_or_else(|| {
        CliError::validation(format!(
            "Invalid color '{input}'. Expected a 3 or 6 digit hex color such as #ff0000"
        ))
    })
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Formats a labelled color row for human-readable output.
pub fn color_row(label: &str, color: Color) -> String {
    format!("  {label:<20} {color}")
}
