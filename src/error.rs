//! Error taxonomy for trace analysis
//!
//! Usage errors are handled by clap at the binary boundary; everything the
//! library itself can detect is a variant here. Malformed rows are NOT an
//! error: the record sources degrade them to defaults so one bad row does
//! not discard an otherwise-useful report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by input resolution and the record sources
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Supplied path does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// Directory search found nothing matching the expected patterns
    #[error("no {pattern} found in {}", .dir.display())]
    NoTraceFile { dir: PathBuf, pattern: String },

    /// Database is missing one of the required table roles
    #[error("database missing required {role} table; available tables: {available}")]
    MissingTable {
        role: &'static str,
        available: String,
    },

    /// Trace header resolves no duration field
    #[error(
        "trace header has no usable duration: need a DurationNs column \
         or both Start_Timestamp and End_Timestamp"
    )]
    NoDurationColumns,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
