//! CLI argument parsing for Resumen

use clap::Parser;
use std::path::PathBuf;

use crate::report;

#[derive(Parser, Debug)]
#[command(name = "resumen")]
#[command(version)]
#[command(
    about = "Summarize GPU kernel timing from rocprofv3 traces and rocpd databases",
    long_about = None
)]
pub struct Cli {
    /// Trace file, trace directory, or rocpd results database to analyze
    pub path: PathBuf,

    /// Number of kernels shown in the summary table
    #[arg(short = 'n', long = "top", value_name = "N", default_value_t = report::DEFAULT_TOP)]
    pub top: usize,

    /// Number of kernels shown in the per-kernel timing breakdown
    #[arg(long = "timing-top", value_name = "M", default_value_t = report::DEFAULT_TIMING_TOP)]
    pub timing_top: usize,

    /// Prefer a rocpd database when searching a directory
    #[arg(long = "db")]
    pub db: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
