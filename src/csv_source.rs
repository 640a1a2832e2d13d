//! Record source for rocprofv3 CSV kernel traces
//!
//! rocprofv3 has shipped two header conventions for the same logical
//! fields: the kernel name appears as `Kernel_Name` or `Name`, and the
//! duration is either a direct `DurationNs` column or must be derived from
//! `Start_Timestamp`/`End_Timestamp`. Candidate labels are tried in
//! priority order and resolved exactly once when the source is opened,
//! never per row.
//!
//! When a `Kind` column is present the trace multiplexes several event
//! kinds (memory copies, barriers, ...) and only `KERNEL_DISPATCH` rows
//! pass the filter. Without one, every row is a kernel record.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::error::{AnalysisError, Result};
use crate::record::TimingRecord;

/// Candidate header labels per logical field, in priority order
const KIND_LABELS: &[&str] = &["Kind"];
const NAME_LABELS: &[&str] = &["Kernel_Name", "Name"];
const DURATION_LABELS: &[&str] = &["DurationNs"];
const START_LABELS: &[&str] = &["Start_Timestamp"];
const END_LABELS: &[&str] = &["End_Timestamp"];

/// Marker value in the `Kind` column for kernel dispatch events
const KERNEL_DISPATCH_KIND: &str = "KERNEL_DISPATCH";

/// Fallback grouping key for rows with no kernel name
const UNKNOWN_KERNEL: &str = "Unknown";

/// How the duration is obtained from a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationColumns {
    /// Direct nanosecond column
    Direct(usize),
    /// Derived from start/end timestamp columns
    Interval { start: usize, end: usize },
}

/// Column indices resolved once from the header row
#[derive(Debug, Clone)]
pub struct ColumnMap {
    kind: Option<usize>,
    name: Option<usize>,
    duration: DurationColumns,
}

impl ColumnMap {
    /// Resolve the logical fields against a header row.
    ///
    /// A missing name column is tolerated (every row degrades to
    /// "Unknown"); a header that yields no duration at all means the file
    /// cannot be summarized and is rejected up front.
    pub fn resolve(headers: &StringRecord) -> Result<Self> {
        let kind = find_column(headers, KIND_LABELS);
        let name = find_column(headers, NAME_LABELS);

        let duration = if let Some(idx) = find_column(headers, DURATION_LABELS) {
            DurationColumns::Direct(idx)
        } else {
            match (
                find_column(headers, START_LABELS),
                find_column(headers, END_LABELS),
            ) {
                (Some(start), Some(end)) => DurationColumns::Interval { start, end },
                _ => return Err(AnalysisError::NoDurationColumns),
            }
        };

        if name.is_none() {
            warn!("trace header has no kernel name column, rows will group under \"Unknown\"");
        }

        Ok(Self {
            kind,
            name,
            duration,
        })
    }

    /// True when the row passes the event-kind filter
    fn is_kernel_dispatch(&self, row: &StringRecord) -> bool {
        match self.kind {
            Some(idx) => row.get(idx).map(str::trim) == Some(KERNEL_DISPATCH_KIND),
            None => true,
        }
    }

    /// Normalize one row; malformed fields degrade rather than abort
    fn extract(&self, row: &StringRecord) -> TimingRecord {
        let kernel_name = self
            .name
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_KERNEL)
            .to_string();

        match self.duration {
            DurationColumns::Direct(idx) => TimingRecord {
                duration_ns: parse_field(row, idx, &kernel_name, "DurationNs"),
                kernel_name,
            },
            DurationColumns::Interval { start, end } => {
                let start_ns = parse_field(row, start, &kernel_name, "Start_Timestamp");
                let end_ns = parse_field(row, end, &kernel_name, "End_Timestamp");
                TimingRecord::from_interval(kernel_name, start_ns, end_ns)
            }
        }
    }
}

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|label| headers.iter().position(|h| h.trim() == *label))
}

fn parse_field(row: &StringRecord, idx: usize, kernel: &str, field: &str) -> f64 {
    match row.get(idx).map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.parse::<f64>().unwrap_or_else(|_| {
            warn!(kernel, field, value = raw, "unparseable numeric field, using 0");
            0.0
        }),
        _ => {
            warn!(kernel, field, "missing numeric field, using 0");
            0.0
        }
    }
}

/// Streaming record source over a rocprofv3 CSV trace
#[derive(Debug)]
pub struct CsvSource<R: Read = File> {
    reader: csv::Reader<R>,
    columns: ColumnMap,
}

impl CsvSource<File> {
    /// Open a trace file and resolve its header
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvSource<R> {
    /// Build a source from any reader (tests feed in-memory CSV here)
    pub fn from_reader(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);
        let columns = ColumnMap::resolve(reader.headers()?)?;
        Ok(Self { reader, columns })
    }

    /// Lazily yield normalized records, dropping non-dispatch rows.
    /// Unreadable rows are logged and skipped, not fatal.
    pub fn records(&mut self) -> impl Iterator<Item = TimingRecord> + '_ {
        let columns = self.columns.clone();
        self.reader.records().filter_map(move |row| match row {
            Ok(row) if columns.is_kernel_dispatch(&row) => Some(columns.extract(&row)),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "skipping unreadable CSV row");
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_from(data: &str) -> CsvSource<&[u8]> {
        CsvSource::from_reader(data.as_bytes()).unwrap()
    }

    #[test]
    fn test_direct_duration_with_name_label() {
        let mut src = source_from("Name,DurationNs\ngemm,4000\nsoftmax,1500\n");
        let records: Vec<_> = src.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kernel_name, "gemm");
        assert_eq!(records[0].duration_ns, 4000.0);
        assert_eq!(records[1].kernel_name, "softmax");
    }

    #[test]
    fn test_kernel_name_label_takes_priority() {
        let mut src = source_from("Name,Kernel_Name,DurationNs\nshort,full_name,10\n");
        let records: Vec<_> = src.records().collect();
        assert_eq!(records[0].kernel_name, "full_name");
    }

    #[test]
    fn test_duration_derived_from_timestamps() {
        let mut src = source_from(
            "Kind,Kernel_Name,Start_Timestamp,End_Timestamp\nKERNEL_DISPATCH,gemm,1000,5000\n",
        );
        let records: Vec<_> = src.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_ns, 4000.0);
    }

    #[test]
    fn test_kind_column_filters_non_dispatch() {
        let data = "Kind,Kernel_Name,Start_Timestamp,End_Timestamp\n\
                    KERNEL_DISPATCH,gemm,0,100\n\
                    MEMORY_COPY,copy,0,900\n\
                    KERNEL_DISPATCH,gemm,100,300\n";
        let mut src = source_from(data);
        let records: Vec<_> = src.records().collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kernel_name == "gemm"));
    }

    #[test]
    fn test_no_kind_column_keeps_all_rows() {
        let mut src = source_from("Name,DurationNs\na,1\nb,2\n");
        assert_eq!(src.records().count(), 2);
    }

    #[test]
    fn test_missing_name_degrades_to_unknown() {
        let mut src = source_from("Kernel_Name,DurationNs\n,500\n");
        let records: Vec<_> = src.records().collect();
        assert_eq!(records[0].kernel_name, "Unknown");
        assert_eq!(records[0].duration_ns, 500.0);
    }

    #[test]
    fn test_unparseable_duration_degrades_to_zero() {
        let mut src = source_from("Name,DurationNs\ngemm,not_a_number\n");
        let records: Vec<_> = src.records().collect();
        assert_eq!(records[0].duration_ns, 0.0);
    }

    #[test]
    fn test_header_without_duration_is_rejected() {
        let err = CsvSource::from_reader("Name,Start_Timestamp\ngemm,10\n".as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoDurationColumns));
    }

    #[test]
    fn test_quoted_name_with_commas() {
        let mut src = source_from("Name,DurationNs\n\"foo<int, float>(int)\",42\n");
        let records: Vec<_> = src.records().collect();
        assert_eq!(records[0].kernel_name, "foo<int, float>(int)");
    }

    #[test]
    fn test_empty_body_yields_no_records() {
        let mut src = source_from("Name,DurationNs\n");
        assert_eq!(src.records().count(), 0);
    }

    #[test]
    fn test_column_map_resolves_once() {
        let headers = StringRecord::from(vec!["Kind", "Name", "DurationNs"]);
        let map = ColumnMap::resolve(&headers).unwrap();
        assert_eq!(map.kind, Some(0));
        assert_eq!(map.name, Some(1));
        assert_eq!(map.duration, DurationColumns::Direct(2));
    }
}
