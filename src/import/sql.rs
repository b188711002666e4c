//! SQL Server DDL import
//!
//! Recovers [`TableDefinition`]s from SQL Server `CREATE TABLE` scripts
//! without a full SQL grammar. The document is cleaned, split on
//! `CREATE TABLE` markers, and every statement is parsed on its own; a
//! statement that cannot be parsed is skipped and reported, never fatal.

use super::columns::parse_columns;
use super::preprocess::preprocess;
use super::scanner::{balanced_body, top_level_ranges};
use super::{ImportError, ImportResult, excerpt};
use crate::models::TableDefinition;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

/// Statement boundary used to split a document into table fragments
static CREATE_TABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bCREATE\s+TABLE\s+").unwrap());

/// Leading, possibly multi-part, table name: `[db].[schema].[table]`, `dbo.t`, `"t"`
///
/// `IF NOT EXISTS` is accepted so that rendered Delta DDL parses back.
static QUALIFIED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^\s*(?:IF\s+NOT\s+EXISTS\s+)?((?:\[[^\]]+\]|"[^"]+"|`[^`]+`|[A-Za-z_#@][\w#@$]*)(?:\s*\.\s*(?:\[[^\]]+\]|"[^"]+"|`[^`]+`|[A-Za-z_#@][\w#@$]*))*)"#,
    )
    .unwrap()
});

/// One part of a qualified name, delimiters excluded from the captures
static NAME_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\[([^\]]+)\]|"([^"]+)"|`([^`]+)`|([A-Za-z_#@][\w#@$]*)"#).unwrap()
});

/// Named table-level constraint at the start of a body fragment
static TABLE_CONSTRAINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^\s*CONSTRAINT\s+(?:\[[^\]]*\]|"[^"]*"|[^\s(]+)\s+(?:PRIMARY\s+KEY|UNIQUE|FOREIGN\s+KEY|CHECK)\b"#,
    )
    .unwrap()
});

/// SQL Server importer - parses CREATE TABLE statements
#[derive(Debug, Default, Clone, Copy)]
pub struct SQLServerImporter;

impl SQLServerImporter {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole SQL Server script.
    ///
    /// Tables are returned in declaration order. Skipped tables and dropped
    /// columns are listed in [`ImportResult::errors`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use mssql_delta_ddl::import::SQLServerImporter;
    ///
    /// let sql = "CREATE TABLE dbo.Orders ( [Id] int NOT NULL, [Amount] decimal(10,2) NULL, CONSTRAINT PK_Orders PRIMARY KEY (Id) )";
    /// let result = SQLServerImporter::new().parse(sql);
    ///
    /// assert_eq!(result.tables.len(), 1);
    /// assert_eq!(result.tables[0].schema.as_deref(), Some("dbo"));
    /// assert_eq!(result.tables[0].columns.len(), 2);
    /// ```
    pub fn parse(&self, sql: &str) -> ImportResult {
        let cleaned = preprocess(sql);
        let mut result = ImportResult::default();

        // The text before the first marker holds no table
        for fragment in CREATE_TABLE_RE.split(&cleaned).skip(1) {
            match self.parse_table(fragment) {
                Ok((table, column_errors)) => {
                    debug!(
                        table = %table.qualified_name(),
                        columns = table.columns.len(),
                        "Parsed table"
                    );
                    result.errors.extend(column_errors);
                    result.tables.push(table);
                }
                Err(err) => {
                    warn!(error = %err, "Skipping table");
                    result.errors.push(err);
                }
            }
        }

        info!(
            tables = result.tables.len(),
            columns = result.column_count(),
            diagnostics = result.errors.len(),
            "SQL Server import finished"
        );

        result
    }

    /// Parse one fragment that follows a `CREATE TABLE` marker.
    ///
    /// On success returns the table together with diagnostics for any
    /// columns that were dropped.
    pub fn parse_table(
        &self,
        fragment: &str,
    ) -> Result<(TableDefinition, Vec<ImportError>), ImportError> {
        let unparseable = |reason: &str| ImportError::UnparseableTable {
            fragment: excerpt(fragment),
            reason: reason.to_string(),
        };

        let name_match = QUALIFIED_NAME_RE
            .captures(fragment)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| unparseable("missing table name"))?;

        let (schema, name) = split_qualified_name(name_match.as_str())
            .ok_or_else(|| unparseable("missing table name"))?;

        let rest = &fragment[name_match.end()..];
        if !rest.trim_start().starts_with('(') {
            return Err(unparseable("expected column list after table name"));
        }

        let body = balanced_body(rest).ok_or_else(|| unparseable("unbalanced column list"))?;
        let body = strip_constraints(body);

        let (columns, errors) = parse_columns(&body, &name);
        let mut table = TableDefinition::new(&name, columns);
        table.schema = schema;

        if table.is_empty() {
            warn!(table = %table.qualified_name(), "No columns parsed for table");
        }
        Ok((table, errors))
    }
}

/// Parse a SQL Server script into tables, discarding diagnostics.
pub fn parse_document(sql: &str) -> Vec<TableDefinition> {
    SQLServerImporter::new().parse(sql).tables
}

/// Split `[db].[schema].[table]` into (schema, table).
///
/// A leading database part is dropped.
fn split_qualified_name(qualified: &str) -> Option<(Option<String>, String)> {
    let mut parts: Vec<String> = NAME_PART_RE
        .captures_iter(qualified)
        .filter_map(|caps| (1..=4).find_map(|i| caps.get(i)))
        .map(|m| m.as_str().trim().to_string())
        .collect();

    let name = parts.pop().filter(|n| !n.is_empty())?;
    let schema = parts.pop().filter(|s| !s.is_empty());
    Some((schema, name))
}

/// Remove named `PRIMARY KEY`, `UNIQUE`, `FOREIGN KEY` and `CHECK`
/// constraints from a table body.
///
/// Each constraint is removed up to the next top-level comma, so a trailing
/// `WITH (...)` options clause and nested `CHECK` parentheses go with it.
pub fn strip_constraints(body: &str) -> String {
    top_level_ranges(body, ',')
        .into_iter()
        .map(|range| &body[range])
        .filter(|fragment| {
            let is_constraint = TABLE_CONSTRAINT_RE.is_match(fragment);
            if is_constraint {
                debug!(fragment = %excerpt(fragment), "Stripping table constraint");
            }
            !is_constraint
        })
        .collect::<Vec<_>>()
        .join(",")
}
