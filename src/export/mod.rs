//! Export functionality
//!
//! Provides exporters for target dialects:
//! - Databricks Delta (`CREATE TABLE ... USING DELTA`)

pub mod delta;

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
    /// Number of tables rendered
    pub table_count: usize,
}

// Re-export for convenience
pub use delta::{DeltaExporter, render_table};
