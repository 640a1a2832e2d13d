//! Normalized timing record shared by both record sources

/// One observed kernel dispatch, normalized from either input origin
#[derive(Debug, Clone, PartialEq)]
pub struct TimingRecord {
    /// Grouping key, kept verbatim; only truncated at render time
    pub kernel_name: String,
    /// Duration in nanoseconds; never negative
    pub duration_ns: f64,
}

impl TimingRecord {
    /// Build a record from start/end timestamps in nanoseconds.
    ///
    /// An inverted interval (end before start) is a data-quality problem in
    /// the trace; the duration is clamped to zero and the record still
    /// counts toward its kernel.
    pub fn from_interval(kernel_name: String, start_ns: f64, end_ns: f64) -> Self {
        let duration_ns = end_ns - start_ns;
        if duration_ns < 0.0 {
            tracing::warn!(
                kernel = %kernel_name,
                start_ns,
                end_ns,
                "inverted timestamp interval, clamping duration to 0"
            );
            return Self {
                kernel_name,
                duration_ns: 0.0,
            };
        }
        Self {
            kernel_name,
            duration_ns,
        }
    }
}
