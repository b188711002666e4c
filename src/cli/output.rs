//! Output formatting for CLI

use crate::cli::error::CliError;
use crate::convert::{ConversionReport, map_type};
use crate::import::ImportResult;

/// Type mapping for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    pub source_type: String,
    pub target_type: String,
    pub table_name: Option<String>,
    pub column_name: Option<String>,
}

/// Format a file conversion report as plain text
pub fn format_conversion_summary(report: &ConversionReport) -> String {
    let mut output = String::new();

    match &report.output {
        Some(output_path) => {
            output.push_str("Conversion complete!\n");
            output.push_str(&format!("Input file: {}\n", report.input.display()));
            output.push_str(&format!("Output file: {}\n", output_path.display()));
            output.push_str(&format!(
                "Total tables converted: {}\n",
                report.total_tables()
            ));

            output.push_str("\nTables converted:\n");
            for table in &report.tables {
                output.push_str(&format!("  - {}\n", table));
            }
        }
        None => output.push_str("No tables found in the input file.\n"),
    }

    if !report.diagnostics.is_empty() {
        output.push_str("\n⚠️  Skipped during conversion:\n");
        for diagnostic in &report.diagnostics {
            output.push_str(&format!("  - {}\n", diagnostic));
        }
    }

    output
}

/// Format a file conversion report as JSON
pub fn format_conversion_json(report: &ConversionReport) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Format an import result with per-column details and type mappings
pub fn format_inspect_output(result: &ImportResult, mappings: &[TypeMapping]) -> String {
    let mut output = String::new();

    if !result.errors.is_empty() {
        output.push_str("\n⚠️  Parse Errors:\n");
        for error in &result.errors {
            output.push_str(&format!("  - {}\n", error));
        }
    }

    output.push_str(&format!("\n✅ Parsed {} table(s):\n", result.tables.len()));
    for (idx, table) in result.tables.iter().enumerate() {
        output.push_str(&format!("\nTable {}: {}\n", idx + 1, table.qualified_name()));
        output.push_str(&format!("  Columns: {}\n", table.columns.len()));
        output.push_str("  Column Details:\n");

        for col in &table.columns {
            output.push_str(&format!("    - {} ({})\n", col.name, col.source_signature()));
            if !col.nullable {
                output.push_str("      Nullable: false\n");
            }
        }
    }

    if !mappings.is_empty() {
        output.push_str("\nType Mappings:\n");
        for mapping in mappings {
            output.push_str(&format!(
                "  - {} → {}\n",
                mapping.source_type, mapping.target_type
            ));
        }
    }

    if result.errors.is_empty() {
        output.push_str("\n✅ All checks passed!\n");
    }

    output
}

/// Collect the distinct source → target type mappings used by an import
///
/// The first column using each source signature is recorded.
pub fn collect_type_mappings(result: &ImportResult) -> Vec<TypeMapping> {
    let mut mappings: Vec<TypeMapping> = Vec::new();

    for table in &result.tables {
        for col in &table.columns {
            let source_type = col.source_signature();
            if mappings.iter().any(|m| m.source_type == source_type) {
                continue;
            }
            mappings.push(TypeMapping {
                target_type: map_type(&col.source_type, col.params.as_deref()),
                source_type,
                table_name: Some(table.name.clone()),
                column_name: Some(col.name.clone()),
            });
        }
    }

    mappings
}
