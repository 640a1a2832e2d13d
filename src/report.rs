//! Report rendering
//!
//! Turns the finished aggregate into fixed-width text matching the layout
//! performance engineers already read from the rocprof analysis scripts:
//! a banner with run totals, a ranked top-N table with a percent-of-time
//! column, and a per-kernel timing breakdown for the top M entries.
//! Everything lands on stdout as one string; this module does no I/O and,
//! past the empty-input guard, cannot fail.

use std::fmt::Write;

use crate::stats::{KernelSummary, StatsTracker};

pub const DEFAULT_TOP: usize = 20;
pub const DEFAULT_TIMING_TOP: usize = 10;

const NAME_WIDTH: usize = 60;
const RULE_WIDTH: usize = 100;

/// Report shape knobs, both CLI-overridable
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Rows in the primary summary table
    pub top: usize,
    /// Kernels in the detailed timing breakdown
    pub timing_top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            timing_top: DEFAULT_TIMING_TOP,
        }
    }
}

/// Render the full report. Empty aggregate renders the normal
/// "no data" outcome, not an error.
pub fn render(tracker: &StatsTracker, options: &ReportOptions) -> String {
    if tracker.is_empty() {
        return "No kernel data found\n".to_string();
    }

    let rows = tracker.summarize();
    let mut out = String::new();

    render_banner(&mut out, tracker, &rows);
    render_summary_table(&mut out, &rows, options.top);
    render_timing_breakdown(&mut out, &rows, options.timing_top);

    out
}

fn render_banner(out: &mut String, tracker: &StatsTracker, rows: &[KernelSummary]) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Kernel Trace Analysis Summary");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total kernels executed: {}", tracker.total_dispatches());
    let _ = writeln!(out, "Unique kernel types: {}", rows.len());
    let _ = writeln!(
        out,
        "Total GPU time: {:.2} ms",
        tracker.grand_total_ns() / 1e6
    );
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out);
}

fn render_summary_table(out: &mut String, rows: &[KernelSummary], top: usize) {
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:>8} {:>12} {:>12} {:>12} {:>12} {:>8}",
        "Kernel Name", "Count", "Total(ms)", "Avg(us)", "Min(us)", "Max(us)", "%Time"
    );
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} {}",
        "-".repeat(NAME_WIDTH),
        "-".repeat(8),
        "-".repeat(12),
        "-".repeat(12),
        "-".repeat(12),
        "-".repeat(12),
        "-".repeat(8),
    );

    for row in rows.iter().take(top) {
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$} {:>8} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>7.1}%",
            truncate_name(&row.name, NAME_WIDTH),
            row.count,
            row.total_ns / 1e6,
            row.avg_ns / 1e3,
            row.min_ns / 1e3,
            row.max_ns / 1e3,
            row.percent,
        );
    }

    if rows.len() > top {
        let _ = writeln!(out);
        let _ = writeln!(out, "... and {} more kernel types", rows.len() - top);
    }
}

fn render_timing_breakdown(out: &mut String, rows: &[KernelSummary], timing_top: usize) {
    let _ = writeln!(out);
    let _ = writeln!(out, "Timing Statistics (microseconds):");
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for row in rows.iter().take(timing_top) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", truncate_name(&row.name, NAME_WIDTH));
        let _ = writeln!(out, "  Count: {}", row.count);
        let _ = writeln!(
            out,
            "  Min: {:.2} us, Max: {:.2} us",
            row.min_ns / 1e3,
            row.max_ns / 1e3
        );
        let _ = writeln!(
            out,
            "  Avg: {:.2} us, Median: {:.2} us",
            row.avg_ns / 1e3,
            row.median_ns / 1e3
        );
    }
}

/// Truncate a kernel name to `width` with a trailing ellipsis marker.
/// Names are never wrapped. Char-based so demangled C++ symbols with
/// multibyte characters cannot split a UTF-8 boundary.
fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let kept: String = name.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
