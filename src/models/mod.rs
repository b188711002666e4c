//! Models module
//!
//! Structured form of the SQL Server DDL recovered by the importer and
//! consumed by the Delta exporter.

pub mod column;
pub mod table;

pub use column::ColumnDefinition;
pub use table::TableDefinition;
