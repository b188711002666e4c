//! Column model for parsed SQL Server DDL

use serde::{Deserialize, Serialize};

/// A single column recovered from a SQL Server `CREATE TABLE` body.
///
/// The source type is kept lower-cased and the parameter text is kept raw
/// (e.g. `"19,4"`), so the target type is only decided at render time.
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::models::ColumnDefinition;
///
/// let column = ColumnDefinition::new("Amount", "DECIMAL", Some("10,2"), true);
/// assert_eq!(column.source_type, "decimal");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Column name with identifier delimiters stripped
    pub name: String,
    /// Base type name, lower-cased (e.g. "nvarchar")
    pub source_type: String,
    /// Raw parameter text between the type's parentheses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    /// Whether the column allows NULL values (default: true)
    #[serde(default = "default_true")]
    pub nullable: bool,
}

fn default_true() -> bool {
    true
}

impl ColumnDefinition {
    pub fn new(name: &str, source_type: &str, params: Option<&str>, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            source_type: source_type.to_lowercase(),
            params: params.map(|p| p.trim().to_string()),
            nullable,
        }
    }

    /// Source type as written in SQL Server, e.g. `decimal(10,2)`
    pub fn source_signature(&self) -> String {
        match &self.params {
            Some(params) => format!("{}({})", self.source_type, params),
            None => self.source_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lowercases_type_and_trims_params() {
        let column = ColumnDefinition::new("Price", "NUMERIC", Some(" 19, 4 "), false);
        assert_eq!(column.source_type, "numeric");
        assert_eq!(column.params.as_deref(), Some("19, 4"));
        assert!(!column.nullable);
    }

    #[test]
    fn test_source_signature() {
        let with_params = ColumnDefinition::new("Name", "nvarchar", Some("50"), true);
        assert_eq!(with_params.source_signature(), "nvarchar(50)");

        let bare = ColumnDefinition::new("Id", "int", None, false);
        assert_eq!(bare.source_signature(), "int");
    }

    #[test]
    fn test_nullable_defaults_to_true_when_deserializing() {
        let column: ColumnDefinition =
            serde_json::from_str(r#"{"name":"Id","source_type":"int"}"#).unwrap();
        assert!(column.nullable);
        assert!(column.params.is_none());
    }
}
