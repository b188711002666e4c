//! Table model for parsed SQL Server DDL

use super::column::ColumnDefinition;
use serde::{Deserialize, Serialize};

/// A table recovered from one `CREATE TABLE` statement.
///
/// Columns keep their declaration order. A table whose body yielded no
/// columns is still kept so that parse failures stay visible in the output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: &str, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
            columns,
        }
    }

    pub fn with_schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    /// `schema.name` when a schema was parsed, otherwise just `name`
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let table = TableDefinition::new("Orders", Vec::new()).with_schema("dbo");
        assert_eq!(table.qualified_name(), "dbo.Orders");

        let bare = TableDefinition::new("Orders", Vec::new());
        assert_eq!(bare.qualified_name(), "Orders");
    }

    #[test]
    fn test_empty_table_is_still_a_table() {
        let table = TableDefinition::new("Broken", Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.name, "Broken");
    }
}
