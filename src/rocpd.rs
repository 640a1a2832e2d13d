//! Record source for rocpd SQLite databases (ROCm 7.x)
//!
//! rocpd appends a run-specific UUID to every table name
//! (`rocpd_kernel_dispatch_<uuid>`, ...), so the three required table roles
//! are resolved by prefix scan over `sqlite_master` before any row is
//! read. Dispatch rows join the kernel symbol table on the composite key
//! `kernel_id = id AND guid = guid` — ids are only unique within one
//! run-scope guid, so a plain id join would cross-match runs.

use std::path::Path;

use itertools::Itertools;
use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::record::TimingRecord;

const DISPATCH_PREFIX: &str = "rocpd_kernel_dispatch";
const STRING_PREFIX: &str = "rocpd_string";
const SYMBOL_PREFIX: &str = "rocpd_info_kernel_symbol";

/// Typed role-to-table-name bindings, validated eagerly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRoles {
    pub kernel_dispatch: String,
    pub string: String,
    pub kernel_symbol: String,
}

impl TableRoles {
    /// Bind each role to the first table matching its prefix.
    /// Any unresolved role is a SourceUnavailable condition that names the
    /// tables which ARE present, so a schema mismatch is diagnosable.
    pub fn resolve(tables: &[String]) -> Result<Self> {
        let find = |prefix: &str, role: &'static str| -> Result<String> {
            tables
                .iter()
                .find(|t| t.starts_with(prefix))
                .cloned()
                .ok_or_else(|| AnalysisError::MissingTable {
                    role,
                    available: tables.iter().join(", "),
                })
        };

        Ok(Self {
            kernel_dispatch: find(DISPATCH_PREFIX, "kernel dispatch")?,
            string: find(STRING_PREFIX, "string")?,
            kernel_symbol: find(SYMBOL_PREFIX, "kernel symbol")?,
        })
    }
}

/// List table names in deterministic (sorted) order
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tables)
}

/// Record source over a rocpd results database
pub struct RocpdSource {
    conn: Connection,
    roles: TableRoles,
}

impl RocpdSource {
    /// Open the database read-only and resolve table roles up front
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let tables = list_tables(&conn)?;
        let roles = TableRoles::resolve(&tables)?;
        debug!(
            dispatch = %roles.kernel_dispatch,
            string = %roles.string,
            symbol = %roles.kernel_symbol,
            "resolved rocpd table roles"
        );
        Ok(Self { conn, roles })
    }

    pub fn roles(&self) -> &TableRoles {
        &self.roles
    }

    /// Load all dispatch records with their symbol names.
    ///
    /// An empty result set here is the normal "no data" outcome, not an
    /// error; the caller reports it as such.
    pub fn records(&self) -> Result<Vec<TimingRecord>> {
        // Table names come from sqlite_master, not user input, so
        // interpolating them is safe; they cannot be bound as parameters.
        let query = format!(
            "SELECT s.display_name, kd.start, kd.end \
             FROM {dispatch} kd \
             JOIN {symbol} s ON kd.kernel_id = s.id AND kd.guid = s.guid \
             WHERE s.display_name IS NOT NULL \
             ORDER BY kd.start",
            dispatch = self.roles.kernel_dispatch,
            symbol = self.roles.kernel_symbol,
        );

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .map(|(name, start, end)| TimingRecord::from_interval(name, start as f64, end as f64))
            .collect())
    }
}
