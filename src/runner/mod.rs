pub mod doql;

use crate::error::DoqlError;
use serde::Serialize;
use std::collections::HashMap;

/// Probe query hosts use as a connectivity check; its result is suppressed.
pub const NOOP_QUERY: &str = "SELECT 1";

/// A single result row: column name to cell value, in header order.
///
/// Values are always JSON strings; the endpoint carries no type metadata.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Metadata for a single result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Always null; the endpoint does not report column types.
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub friendly_name: String,
    pub name: String,
}

impl Column {
    /// An untyped column whose friendly name equals its raw name.
    pub fn untyped(name: impl Into<String>) -> Self {
        let name = name.into();
        Column {
            column_type: None,
            friendly_name: name.clone(),
            name,
        }
    }
}

/// The output of a successful query, before JSON serialization.
///
/// Serializes as `{"columns": ..., "rows": ...}`, with `columns` null for
/// the suppressed probe result.
#[derive(Debug, Default, Serialize)]
pub struct QueryResult {
    pub columns: Option<Vec<Column>>,
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// The empty success result returned for the connectivity probe.
    pub fn empty() -> Self {
        QueryResult::default()
    }
}

/// One table discovered by schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    pub name: String,
    pub columns: Vec<String>,
}

/// Accumulator for introspected tables, iterated in first-seen order.
///
/// Column names are appended as introspection rows arrive; duplicates are
/// kept as delivered.
#[derive(Debug, Default)]
pub struct SchemaMap {
    entries: Vec<SchemaEntry>,
    index: HashMap<String, usize>,
}

impl SchemaMap {
    pub fn new() -> Self {
        SchemaMap::default()
    }

    /// Append `column` to `table`, creating the table entry on first sight.
    pub fn add_column(&mut self, table: &str, column: &str) {
        let idx = match self.index.get(table) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push(SchemaEntry {
                    name: table.to_string(),
                    columns: Vec::new(),
                });
                self.index.insert(table.to_string(), idx);
                idx
            }
        };
        self.entries[idx].columns.push(column.to_string());
    }

    pub fn get(&self, table: &str) -> Option<&SchemaEntry> {
        self.index.get(table).map(|&idx| &self.entries[idx])
    }

    /// Entries in first-insertion order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Consume the accumulator, yielding entries in first-insertion order.
    pub fn into_entries(self) -> Vec<SchemaEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trait for query runners.
pub trait QueryRunner {
    /// Stable type identifier advertised to host registries.
    fn runner_type(&self) -> &'static str;

    /// Human-readable name for display surfaces.
    fn display_name(&self) -> &'static str;

    /// Whether the transport stack came up at load time. Hosts check this
    /// before dispatching any operation.
    fn enabled(&self) -> bool;

    /// The probe query whose successful result is suppressed.
    fn noop_query(&self) -> &'static str {
        NOOP_QUERY
    }

    fn run_query(
        &self,
        query: &str,
        user: Option<&str>,
    ) -> impl std::future::Future<Output = Result<QueryResult, DoqlError>> + Send;

    fn get_tables(
        &self,
        schema: &mut SchemaMap,
    ) -> impl std::future::Future<Output = Result<Vec<SchemaEntry>, DoqlError>> + Send;
}
