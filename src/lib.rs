//! Resumen - offline GPU kernel trace summarizer
//!
//! Parses kernel-execution traces produced by rocprofv3 (delimited CSV) or
//! stored by rocpd (SQLite), folds them into per-kernel timing aggregates,
//! and renders a ranked, fixed-width report of where GPU wall-clock time
//! went: invocation counts, total/avg/min/max/median durations, and
//! percent-of-total-time per kernel.

pub mod cli;
pub mod csv_source;
pub mod error;
pub mod locate;
pub mod record;
pub mod report;
pub mod rocpd;
pub mod stats;
