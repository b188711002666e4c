//! SQL Server to Databricks type mapping
//!
//! The static table covers every SQL Server base type with a 1:1 Delta
//! equivalent. `decimal`, `numeric` and `float` depend on their parameters
//! and are resolved by explicit rules in [`map_type_or`].

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Target type used for any source type missing from the table
pub const DEFAULT_FALLBACK_TYPE: &str = "STRING";

/// Lower-cased SQL Server base type -> Databricks type
static TYPE_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Numeric types
        ("int", "INT"),
        ("bigint", "BIGINT"),
        ("smallint", "SMALLINT"),
        ("tinyint", "TINYINT"),
        ("bit", "BOOLEAN"),
        ("decimal", "DECIMAL"),
        ("numeric", "DECIMAL"),
        ("float", "DOUBLE"),
        ("real", "FLOAT"),
        ("money", "DECIMAL(19,4)"),
        ("smallmoney", "DECIMAL(10,4)"),
        // String types; Delta has no bounded-length string
        ("char", "STRING"),
        ("varchar", "STRING"),
        ("text", "STRING"),
        ("nchar", "STRING"),
        ("nvarchar", "STRING"),
        ("ntext", "STRING"),
        // Date/time types
        ("date", "DATE"),
        ("datetime", "TIMESTAMP"),
        ("datetime2", "TIMESTAMP"),
        ("datetimeoffset", "TIMESTAMP"),
        ("smalldatetime", "TIMESTAMP"),
        ("time", "STRING"),
        // SQL Server timestamp is a rowversion, not a point in time
        ("timestamp", "BINARY"),
        ("rowversion", "BINARY"),
        // Binary types
        ("binary", "BINARY"),
        ("varbinary", "BINARY"),
        ("image", "BINARY"),
        // Other types
        ("uniqueidentifier", "STRING"),
        ("xml", "STRING"),
        ("sql_variant", "STRING"),
        ("geography", "STRING"),
        ("geometry", "STRING"),
        ("hierarchyid", "STRING"),
    ])
});

/// Map a SQL Server type to its Databricks equivalent.
///
/// Unknown types map to [`DEFAULT_FALLBACK_TYPE`].
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::convert::map_type;
///
/// assert_eq!(map_type("decimal", Some("10,2")), "DECIMAL(10,2)");
/// assert_eq!(map_type("money", None), "DECIMAL(19,4)");
/// assert_eq!(map_type("float", Some("10")), "FLOAT");
/// assert_eq!(map_type("nvarchar", Some("50")), "STRING");
/// ```
pub fn map_type(source_type: &str, params: Option<&str>) -> String {
    map_type_or(source_type, params, DEFAULT_FALLBACK_TYPE)
}

/// Map a SQL Server type, using `fallback` for types not in the table.
pub fn map_type_or(source_type: &str, params: Option<&str>, fallback: &str) -> String {
    let base_type = source_type.trim().to_lowercase();
    let params = params.map(str::trim).filter(|p| !p.is_empty());

    match (base_type.as_str(), params) {
        ("decimal" | "numeric", Some(params)) => format!("DECIMAL({})", params),
        ("char" | "varchar" | "nchar" | "nvarchar" | "text" | "ntext", _) => "STRING".to_string(),
        // float(1..24) is stored as real in SQL Server
        ("float", Some(params)) => match params.parse::<u32>() {
            Ok(n) if n < 25 => "FLOAT".to_string(),
            _ => "DOUBLE".to_string(),
        },
        _ => TYPE_MAPPING
            .get(base_type.as_str())
            .map(|t| t.to_string())
            .unwrap_or_else(|| fallback.to_string()),
    }
}

/// Whether the base type has an entry in the mapping table
pub fn is_known_type(source_type: &str) -> bool {
    TYPE_MAPPING.contains_key(source_type.trim().to_lowercase().as_str())
}
