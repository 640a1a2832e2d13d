//! Input path resolution
//!
//! rocprofv3 writes `kernel_trace.csv` (sometimes prefixed with the traced
//! PID, e.g. `6055_kernel_trace.csv`) somewhere under its output directory,
//! and rocpd runs produce a `*_results.db` SQLite file. The user hands us a
//! file or a directory; this module turns that into a concrete input.

use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

/// A resolved trace input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceInput {
    /// rocprofv3 CSV kernel trace
    Csv(PathBuf),
    /// rocpd SQLite database
    Rocpd(PathBuf),
}

/// Resolve a user-supplied path to a concrete trace input.
///
/// Files are classified by extension (`.db` means rocpd). Directories are
/// searched recursively for `kernel_trace.csv`, then `*_kernel_trace.csv`,
/// then `*_results.db`; `prefer_db` flips the search to look for the
/// database first.
pub fn resolve_input(path: &Path, prefer_db: bool) -> Result<TraceInput> {
    if !path.exists() {
        return Err(AnalysisError::PathNotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return Ok(classify_file(path));
    }

    let found = if prefer_db {
        find_database(path).or_else(|| find_csv_trace(path))
    } else {
        find_csv_trace(path).or_else(|| find_database(path))
    };

    found.ok_or_else(|| AnalysisError::NoTraceFile {
        dir: path.to_path_buf(),
        pattern: "kernel_trace.csv, *_kernel_trace.csv or *_results.db".to_string(),
    })
}

fn classify_file(path: &Path) -> TraceInput {
    match path.extension().and_then(|e| e.to_str()) {
        Some("db") => TraceInput::Rocpd(path.to_path_buf()),
        _ => TraceInput::Csv(path.to_path_buf()),
    }
}

fn find_csv_trace(dir: &Path) -> Option<TraceInput> {
    find_first(dir, &|name| name == "kernel_trace.csv")
        .or_else(|| find_first(dir, &|name| name.ends_with("_kernel_trace.csv")))
        .map(TraceInput::Csv)
}

fn find_database(dir: &Path) -> Option<TraceInput> {
    find_first(dir, &|name| name.ends_with("_results.db")).map(TraceInput::Rocpd)
}

/// Depth-first search for the first file whose name matches the predicate.
/// Entries are visited in sorted order so the result is deterministic.
fn find_first(dir: &Path, matches: &dyn Fn(&str) -> bool) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for entry in &entries {
        if entry.is_file() {
            if let Some(name) = entry.file_name().and_then(|n| n.to_str()) {
                if matches(name) {
                    return Some(entry.clone());
                }
            }
        }
    }
    for entry in &entries {
        if entry.is_dir() {
            if let Some(found) = find_first(entry, matches) {
                return Some(found);
            }
        }
    }
    None
}
