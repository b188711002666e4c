//! SQL Server → Databricks conversion
//!
//! Ties the importer and the Delta exporter together, both for in-memory
//! documents ([`convert_document`]) and for files on disk ([`convert_file`]).

pub mod type_mapping;

pub use type_mapping::{DEFAULT_FALLBACK_TYPE, is_known_type, map_type, map_type_or};

use crate::config::ConversionConfig;
use crate::export::DeltaExporter;
use crate::import::{ImportError, SQLServerImporter};
use crate::models::TableDefinition;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Error raised while converting a file
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Failed to read {}: {}", .path.display(), .message)]
    ReadError { path: PathBuf, message: String },
    #[error("Failed to write {}: {}", .path.display(), .message)]
    WriteError { path: PathBuf, message: String },
}

/// Per-table line of a conversion summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    pub column_count: usize,
}

impl From<&TableDefinition> for TableSummary {
    fn from(table: &TableDefinition) -> Self {
        Self {
            schema: table.schema.clone(),
            name: table.name.clone(),
            column_count: table.columns.len(),
        }
    }
}

impl std::fmt::Display for TableSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        write!(f, "{} ({} columns)", self.name, self.column_count)
    }
}

/// Output of converting one document in memory
#[derive(Debug)]
pub struct ConversionOutput {
    /// Delta DDL, one block per table
    pub content: String,
    pub tables: Vec<TableSummary>,
    /// Diagnostics for skipped tables and dropped columns
    pub errors: Vec<ImportError>,
}

/// Outcome of converting a file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub input: PathBuf,
    /// `None` when no tables were found and nothing was written
    pub output: Option<PathBuf>,
    pub tables: Vec<TableSummary>,
    pub diagnostics: Vec<String>,
}

impl ConversionReport {
    pub fn total_tables(&self) -> usize {
        self.tables.len()
    }
}

/// Convert a SQL Server script into Delta DDL.
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::config::ConversionConfig;
/// use mssql_delta_ddl::convert::convert_document;
///
/// let output = convert_document(
///     "CREATE TABLE [dbo].[t] ([Id] int NOT NULL)",
///     &ConversionConfig::default(),
/// );
/// assert_eq!(output.tables.len(), 1);
/// assert!(output.content.contains("Id INT NOT NULL"));
/// ```
pub fn convert_document(sql: &str, config: &ConversionConfig) -> ConversionOutput {
    let imported = SQLServerImporter::new().parse(sql);
    let exported = DeltaExporter::new(config.clone()).export(&imported.tables);

    ConversionOutput {
        content: exported.content,
        tables: imported.tables.iter().map(TableSummary::from).collect(),
        errors: imported.errors,
    }
}

/// `<dir>/<stem><suffix>.sql` next to the input file
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}{}.sql", stem, suffix))
}

/// Convert a SQL Server DDL file into a Delta DDL file.
///
/// When `output` is `None` the output path is derived from the input with
/// [`default_output_path`]. A script without tables is not an error: the
/// report lists no tables and no file is written.
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, ConversionError> {
    if !input.exists() {
        return Err(ConversionError::InputNotFound(input.to_path_buf()));
    }

    let content = std::fs::read_to_string(input).map_err(|e| ConversionError::ReadError {
        path: input.to_path_buf(),
        message: e.to_string(),
    })?;

    let converted = convert_document(&content, config);
    let diagnostics = converted.errors.iter().map(|e| e.to_string()).collect();

    if converted.tables.is_empty() {
        info!(input = %input.display(), "No tables found in input");
        return Ok(ConversionReport {
            input: input.to_path_buf(),
            output: None,
            tables: Vec::new(),
            diagnostics,
        });
    }

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, &config.output_suffix));

    std::fs::write(&output_path, &converted.content).map_err(|e| ConversionError::WriteError {
        path: output_path.clone(),
        message: e.to_string(),
    })?;

    info!(
        input = %input.display(),
        output = %output_path.display(),
        tables = converted.tables.len(),
        "Conversion complete"
    );

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: Some(output_path),
        tables: converted.tables,
        diagnostics,
    })
}
