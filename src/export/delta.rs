//! Delta exporter for generating Databricks CREATE TABLE statements.
//!
//! Every column type goes through the SQL Server → Databricks type mapping.
//! Identifiers that are plain words are emitted bare; anything else is
//! backtick-quoted with internal backticks doubled.

use crate::config::ConversionConfig;
use crate::convert::{is_known_type, map_type_or};
use crate::export::ExportResult;
use crate::import::columns::is_reserved_identifier;
use crate::models::{ColumnDefinition, TableDefinition};
use tracing::debug;

/// Exporter for Databricks Delta DDL.
#[derive(Debug, Clone, Default)]
pub struct DeltaExporter {
    config: ConversionConfig,
}

impl DeltaExporter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Render one table as a Delta `CREATE TABLE` block.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mssql_delta_ddl::export::DeltaExporter;
    /// use mssql_delta_ddl::models::{ColumnDefinition, TableDefinition};
    ///
    /// let table = TableDefinition::new(
    ///     "Orders",
    ///     vec![ColumnDefinition::new("Id", "int", None, false)],
    /// )
    /// .with_schema("dbo");
    ///
    /// let ddl = DeltaExporter::default().render_table(&table);
    /// assert_eq!(
    ///     ddl,
    ///     "-- Table: Orders\nCREATE TABLE IF NOT EXISTS dbo.Orders (\n  Id INT NOT NULL\n)\nUSING DELTA;"
    /// );
    /// ```
    pub fn render_table(&self, table: &TableDefinition) -> String {
        let mut lines = Vec::new();

        if self.config.emit_table_comments {
            lines.push(format!("-- Table: {}", table.name));
        }
        lines.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (",
            self.table_name(table)
        ));

        let column_defs: Vec<String> = table
            .columns
            .iter()
            .map(|column| self.column_definition(column))
            .collect();
        if !column_defs.is_empty() {
            lines.push(column_defs.join(",\n"));
        }

        lines.push(")".to_string());
        lines.push(format!("USING {};", self.config.engine));

        lines.join("\n")
    }

    /// Render all tables, blocks separated by a blank line.
    pub fn export(&self, tables: &[TableDefinition]) -> ExportResult {
        let mut content = tables
            .iter()
            .map(|table| self.render_table(table))
            .collect::<Vec<_>>()
            .join("\n\n");
        if !content.is_empty() {
            content.push('\n');
        }

        debug!(
            tables = tables.len(),
            engine = %self.config.engine,
            "Rendered Delta DDL"
        );

        ExportResult {
            content,
            format: "databricks-sql".to_string(),
            table_count: tables.len(),
        }
    }

    /// `  name TYPE[ NOT NULL]`
    pub fn column_definition(&self, column: &ColumnDefinition) -> String {
        if !is_known_type(&column.source_type) {
            debug!(
                column = %column.name,
                source_type = %column.source_type,
                fallback = %self.config.fallback_type,
                "Unknown source type, using fallback"
            );
        }
        let data_type = map_type_or(
            &column.source_type,
            column.params.as_deref(),
            &self.config.fallback_type,
        );
        let null_clause = if column.nullable { "" } else { " NOT NULL" };
        format!(
            "  {} {}{}",
            quote_identifier(&column.name),
            data_type,
            null_clause
        )
    }

    /// Table name, qualified as `[catalog.]schema.name` when a schema was
    /// parsed and qualification is enabled.
    ///
    /// The catalog is only applied together with a schema.
    fn table_name(&self, table: &TableDefinition) -> String {
        let name = quote_identifier(&table.name);
        match (&table.schema, self.config.qualify_with_schema) {
            (Some(schema), true) => match &self.config.catalog {
                Some(catalog) => format!(
                    "{}.{}.{}",
                    quote_identifier(catalog),
                    quote_identifier(schema),
                    name
                ),
                None => format!("{}.{}", quote_identifier(schema), name),
            },
            _ => name,
        }
    }
}

/// Render one table with default settings, optionally schema-qualified.
pub fn render_table(table: &TableDefinition, qualify_with_schema: bool) -> String {
    let config = ConversionConfig::builder()
        .qualify_with_schema(qualify_with_schema)
        .build();
    DeltaExporter::new(config).render_table(table)
}

/// Backtick-quote identifiers that are not plain words, or that would read
/// back as a constraint keyword.
fn quote_identifier(identifier: &str) -> String {
    let mut chars = identifier.chars();
    let is_plain = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if is_plain && !is_reserved_identifier(identifier) {
        identifier.to_string()
    } else {
        format!("`{}`", identifier.replace('`', "``"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> TableDefinition {
        TableDefinition::new(
            "Orders",
            vec![
                ColumnDefinition::new("Id", "int", None, false),
                ColumnDefinition::new("Amount", "decimal", Some("10,2"), true),
            ],
        )
        .with_schema("dbo")
    }

    #[test]
    fn test_render_qualified() {
        let ddl = render_table(&orders(), true);
        assert_eq!(
            ddl,
            "-- Table: Orders\n\
             CREATE TABLE IF NOT EXISTS dbo.Orders (\n\
             \x20 Id INT NOT NULL,\n\
             \x20 Amount DECIMAL(10,2)\n\
             )\n\
             USING DELTA;"
        );
    }

    #[test]
    fn test_render_unqualified() {
        let ddl = render_table(&orders(), false);
        assert!(ddl.contains("CREATE TABLE IF NOT EXISTS Orders ("));
        assert!(!ddl.contains("dbo."));
    }

    #[test]
    fn test_qualification_needs_schema() {
        let table = TableDefinition::new("Orders", vec![ColumnDefinition::new("Id", "int", None, true)]);
        let ddl = render_table(&table, true);
        assert!(ddl.contains("CREATE TABLE IF NOT EXISTS Orders ("));
    }

    #[test]
    fn test_catalog_prefix() {
        let exporter = DeltaExporter::new(ConversionConfig::builder().catalog("main").build());
        let ddl = exporter.render_table(&orders());
        assert!(ddl.contains("CREATE TABLE IF NOT EXISTS main.dbo.Orders ("));
    }

    #[test]
    fn test_empty_table_still_rendered() {
        let table = TableDefinition::new("Broken", Vec::new());
        let ddl = render_table(&table, true);
        assert_eq!(
            ddl,
            "-- Table: Broken\nCREATE TABLE IF NOT EXISTS Broken (\n)\nUSING DELTA;"
        );
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("OrderId"), "OrderId");
        assert_eq!(quote_identifier("_row"), "_row");
        assert_eq!(quote_identifier("Order Date"), "`Order Date`");
        assert_eq!(quote_identifier("1st"), "`1st`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_quote_constraint_keywords() {
        assert_eq!(quote_identifier("Check"), "`Check`");
        assert_eq!(quote_identifier("index"), "`index`");
        assert_eq!(quote_identifier("PRIMARY"), "`PRIMARY`");
        assert_eq!(quote_identifier("Pad_Index"), "`Pad_Index`");
        assert_eq!(quote_identifier("Checksum"), "Checksum");
    }

    #[test]
    fn test_config_fallback_engine_and_comments() {
        let exporter = DeltaExporter::new(
            ConversionConfig::builder()
                .fallback_type("VARIANT")
                .engine("ICEBERG")
                .emit_table_comments(false)
                .build(),
        );
        let table = TableDefinition::new("T", vec![ColumnDefinition::new("Phone", "udt_phone", None, true)]);
        assert_eq!(
            exporter.render_table(&table),
            "CREATE TABLE IF NOT EXISTS T (\n  Phone VARIANT\n)\nUSING ICEBERG;"
        );
    }

    #[test]
    fn test_export_joins_blocks() {
        let tables = vec![orders(), TableDefinition::new("Empty", Vec::new())];
        let result = DeltaExporter::default().export(&tables);
        assert_eq!(result.table_count, 2);
        assert_eq!(result.format, "databricks-sql");
        assert!(result.content.contains("USING DELTA;\n\n-- Table: Empty"));
        assert!(result.content.ends_with("USING DELTA;\n"));
    }

    #[test]
    fn test_export_nothing() {
        let result = DeltaExporter::default().export(&[]);
        assert!(result.content.is_empty());
        assert_eq!(result.table_count, 0);
    }
}
