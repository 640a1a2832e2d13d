//! Per-kernel timing aggregation
//!
//! Durations are accumulated and retained in nanoseconds; conversion to
//! microseconds/milliseconds happens only at render time, so repeated
//! conversions never compound rounding error into the stored values.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::record::TimingRecord;

/// Accumulated statistics for a single kernel symbol
#[derive(Debug, Clone, Default)]
pub struct KernelStats {
    /// Number of dispatches observed
    pub count: u64,
    /// Running sum of durations (nanoseconds)
    pub total_duration_ns: f64,
    /// Every observed duration, retained for exact min/max/median
    pub durations: Vec<f64>,
}

/// Finalized read-only view of one kernel, derived at report time
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSummary {
    pub name: String,
    pub count: u64,
    pub total_ns: f64,
    pub avg_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
    pub median_ns: f64,
    /// Share of the grand total, 0 when the grand total is 0
    pub percent: f64,
}

/// Folds timing records into per-kernel aggregates
#[derive(Debug, Default)]
pub struct StatsTracker {
    /// Map from kernel name to statistics
    stats: HashMap<String, KernelStats>,
    /// First-seen order of kernel names. Hash iteration order is not
    /// reproducible, and the ranking tie-break contract is insertion order.
    order: Vec<String>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one kernel dispatch
    pub fn record(&mut self, kernel_name: &str, duration_ns: f64) {
        if !self.stats.contains_key(kernel_name) {
            self.order.push(kernel_name.to_string());
        }
        let entry = self.stats.entry(kernel_name.to_string()).or_default();
        entry.count += 1;
        entry.total_duration_ns += duration_ns;
        entry.durations.push(duration_ns);
    }

    /// Fold an entire record sequence
    pub fn consume<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = TimingRecord>,
    {
        for record in records {
            self.record(&record.kernel_name, record.duration_ns);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Number of distinct kernel names
    pub fn unique_kernels(&self) -> usize {
        self.stats.len()
    }

    /// Total dispatches across all kernels
    pub fn total_dispatches(&self) -> u64 {
        self.stats.values().map(|s| s.count).sum()
    }

    /// Grand total GPU time in nanoseconds
    pub fn grand_total_ns(&self) -> f64 {
        self.stats.values().map(|s| s.total_duration_ns).sum()
    }

    pub fn get(&self, kernel_name: &str) -> Option<&KernelStats> {
        self.stats.get(kernel_name)
    }

    /// Derive summary rows ranked by total time descending.
    ///
    /// The sort is stable over first-seen order, so equal totals keep the
    /// order in which their kernels first appeared in the input. Median is
    /// the lower-middle element of the sorted durations (`sorted[len / 2]`),
    /// not the averaged interpolation.
    pub fn summarize(&self) -> Vec<KernelSummary> {
        let grand_total = self.grand_total_ns();

        let mut rows: Vec<KernelSummary> = self
            .order
            .iter()
            .map(|name| {
                let stats = &self.stats[name];
                let mut sorted = stats.durations.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

                // count >= 1 for any existing key, so indexing and the
                // average division are safe
                KernelSummary {
                    name: name.clone(),
                    count: stats.count,
                    total_ns: stats.total_duration_ns,
                    avg_ns: stats.total_duration_ns / stats.count as f64,
                    min_ns: sorted[0],
                    max_ns: sorted[sorted.len() - 1],
                    median_ns: sorted[sorted.len() / 2],
                    percent: if grand_total > 0.0 {
                        stats.total_duration_ns / grand_total * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        rows.sort_by(|a, b| b.total_ns.partial_cmp(&a.total_ns).unwrap_or(Ordering::Equal));
        rows
    }
}
