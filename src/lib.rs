//! SQL Server → Databricks DDL conversion
//!
//! Provides:
//! - Import of SQL Server `CREATE TABLE` scripts into table models
//! - SQL Server → Databricks type mapping
//! - Export of table models as Delta `CREATE TABLE ... USING DELTA` statements
//! - File-level conversion with a summary report

pub mod config;
pub mod convert;
pub mod export;
pub mod import;
pub mod models;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::{ConfigError, ConversionConfig};
pub use convert::{
    ConversionError, ConversionOutput, ConversionReport, TableSummary, convert_document,
    convert_file, map_type,
};
pub use export::{DeltaExporter, ExportResult, render_table};
pub use import::{ImportError, ImportResult, SQLServerImporter, parse_document};
pub use models::{ColumnDefinition, TableDefinition};
