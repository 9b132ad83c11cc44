//! CLI support for ghjq
//!
//! Provides programmatic access to the filter and set commands for embedding
//! in other tools; the `ghjq` binary is a thin wrapper over these.

mod filter;
mod sets;

pub use filter::{FilterOptions, QuerySyntax, execute_filter, parse_filter_query};
pub use sets::{SetOp, SetOptions, execute_set_op};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Query parse error
    Parse(crate::ParseError),
    /// Evaluation error under strict filtering
    Filter(crate::RecordError),
    /// Identity key error under the abort policy
    Key(crate::sets::SkippedRecord),
    /// Invalid identity path
    Path(crate::PathError),
    /// JSON parsing error in an input collection
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Filter(e) => write!(f, "Filter error: {}", e),
            CliError::Key(e) => write!(f, "Identity error: {}", e),
            CliError::Path(e) => write!(f, "Invalid identity path: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Pass a file or pipe JSON to stdin."),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Filter(e) => Some(e),
            CliError::Path(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::RecordError> for CliError {
    fn from(e: crate::RecordError) -> Self {
        CliError::Filter(e)
    }
}

impl From<crate::sets::SkippedRecord> for CliError {
    fn from(e: crate::sets::SkippedRecord) -> Self {
        CliError::Key(e)
    }
}

impl From<crate::PathError> for CliError {
    fn from(e: crate::PathError) -> Self {
        CliError::Path(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
