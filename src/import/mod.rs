//! Import functionality
//!
//! Recovers table structure from SQL Server DDL scripts:
//! - `preprocess`: strips `GO`, `USE`, `SET` and comments
//! - `scanner`: balanced-parenthesis span search and top-level splitting
//! - `sql`: per-statement table parsing and constraint removal
//! - `columns`: column fragment decomposition

pub mod columns;
pub mod preprocess;
pub mod scanner;
pub mod sql;

use crate::models::TableDefinition;

/// Result of an import operation
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Tables in declaration order
    pub tables: Vec<TableDefinition>,
    /// Non-fatal diagnostics for skipped tables and dropped columns
    pub errors: Vec<ImportError>,
}

impl ImportResult {
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

/// Diagnostic raised while importing
///
/// None of these abort an import; they are collected on [`ImportResult`]
/// and logged at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("Unparseable table: {reason} (near `{fragment}`)")]
    UnparseableTable { fragment: String, reason: String },
    #[error("Unparseable column in table {table}: `{fragment}`")]
    UnparseableColumn { table: String, fragment: String },
}

// Re-export for convenience
pub use columns::parse_columns;
pub use preprocess::preprocess;
pub use scanner::{find_balanced_span, split_top_level};
pub use sql::{SQLServerImporter, parse_document};

/// Shorten a fragment for inclusion in a diagnostic
pub(crate) fn excerpt(fragment: &str) -> String {
    const MAX_CHARS: usize = 60;
    let flattened = fragment.split_whitespace().collect::<Vec<_>>().join(" ");
    if flattened.chars().count() <= MAX_CHARS {
        flattened
    } else {
        let head: String = flattened.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}
