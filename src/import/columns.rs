//! Column list parsing
//!
//! Splits a table body into top-level fragments, drops the ones that hold
//! constraints or index options, and decomposes the rest into
//! name / base type / parameters / modifiers.

use super::scanner::split_top_level;
use super::{ImportError, excerpt};
use crate::models::ColumnDefinition;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Keywords that open a table-level constraint or index clause
pub const CONSTRAINT_KEYWORDS: &[&str] = &[
    "CONSTRAINT",
    "PRIMARY",
    "UNIQUE",
    "FOREIGN",
    "CHECK",
    "INDEX",
];

/// Storage options of a `WITH (...)` index clause
pub const INDEX_OPTIONS: &[&str] = &[
    "PAD_INDEX",
    "STATISTICS_NORECOMPUTE",
    "IGNORE_DUP_KEY",
    "ALLOW_ROW_LOCKS",
    "ALLOW_PAGE_LOCKS",
    "OPTIMIZE_FOR_SEQUENTIAL_KEY",
];

/// Fragments that open with a table-level constraint or index option keyword
static CONSTRAINT_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let keywords = CONSTRAINT_KEYWORDS
        .iter()
        .chain(INDEX_OPTIONS)
        .copied()
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)^(?:{})\b", keywords)).unwrap()
});

/// Storage option assignments left behind by a `WITH (...)` clause
static INDEX_OPTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\s*=", INDEX_OPTIONS.join("|"))).unwrap()
});

/// Column definition: name, base type, optional `(params)`, modifiers
///
/// Name may be `[bracketed]`, `"quoted"`, `` `backticked` `` or bare.
/// The base type may itself be bracketed, as SSMS scripts it: `[decimal](18, 2)`.
static COLUMN_DEF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)^(?:\[([^\]]+)\]|"([^"]+)"|`([^`]+)`|([^\s\[\]"`(),-][^\s\[\]"`(),]*))\s+\[?([A-Za-z_][A-Za-z0-9_]*)\]?\s*(?:\(([^)]*)\))?(.*)$"#,
    )
    .unwrap()
});

/// Explicit NOT NULL marker in the modifier text
static NOT_NULL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bNOT\s+NULL\b").unwrap());

/// Whether a bare identifier would be read back as a constraint or index
/// option keyword, so it must be quoted on output.
pub fn is_reserved_identifier(identifier: &str) -> bool {
    CONSTRAINT_KEYWORDS
        .iter()
        .chain(INDEX_OPTIONS)
        .any(|keyword| keyword.eq_ignore_ascii_case(identifier))
}

/// Whether a body fragment is a constraint or index option rather than a column
pub fn is_constraint_fragment(fragment: &str) -> bool {
    let fragment = fragment.trim();
    CONSTRAINT_KEYWORD_RE.is_match(fragment) || INDEX_OPTION_RE.is_match(fragment)
}

/// Decompose a single column fragment.
///
/// Returns `None` when the fragment does not look like `name type ...`.
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::import::columns::parse_column;
///
/// let column = parse_column("[Amount] [decimal](10, 2) NOT NULL").unwrap();
/// assert_eq!(column.name, "Amount");
/// assert_eq!(column.source_type, "decimal");
/// assert_eq!(column.params.as_deref(), Some("10, 2"));
/// assert!(!column.nullable);
/// ```
pub fn parse_column(fragment: &str) -> Option<ColumnDefinition> {
    let caps = COLUMN_DEF_RE.captures(fragment.trim())?;

    let name = (1..=4).find_map(|i| caps.get(i))?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    let source_type = caps.get(5)?.as_str();
    let params = caps
        .get(6)
        .map(|m| m.as_str().trim())
        .filter(|p| !p.is_empty());
    let modifiers = caps.get(7).map(|m| m.as_str()).unwrap_or("");

    let nullable = !NOT_NULL_RE.is_match(modifiers);

    Some(ColumnDefinition::new(name, source_type, params, nullable))
}

/// Parse every column of a table body.
///
/// Constraint fragments are skipped silently. Fragments that cannot be
/// decomposed are dropped and reported as [`ImportError::UnparseableColumn`].
pub fn parse_columns(body: &str, table: &str) -> (Vec<ColumnDefinition>, Vec<ImportError>) {
    let mut columns = Vec::new();
    let mut errors = Vec::new();

    for fragment in split_top_level(body, ',') {
        if fragment.is_empty() {
            continue;
        }

        if is_constraint_fragment(&fragment) {
            debug!(table, fragment = %excerpt(&fragment), "Skipping constraint fragment");
            continue;
        }

        match parse_column(&fragment) {
            Some(column) => columns.push(column),
            None => {
                warn!(table, fragment = %excerpt(&fragment), "Dropping unparseable column");
                errors.push(ImportError::UnparseableColumn {
                    table: table.to_string(),
                    fragment: excerpt(&fragment),
                });
            }
        }
    }

    (columns, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bracketed_column() {
        let column = parse_column("[Id] int NOT NULL").unwrap();
        assert_eq!(column.name, "Id");
        assert_eq!(column.source_type, "int");
        assert!(column.params.is_none());
        assert!(!column.nullable);
    }

    #[test]
    fn test_parse_bare_column_with_params() {
        let column = parse_column("Amount decimal(10,2) NULL").unwrap();
        assert_eq!(column.name, "Amount");
        assert_eq!(column.source_type, "decimal");
        assert_eq!(column.params.as_deref(), Some("10,2"));
        assert!(column.nullable);
    }

    #[test]
    fn test_parse_ssms_bracketed_type() {
        let column = parse_column("[Price] [money] NULL").unwrap();
        assert_eq!(column.source_type, "money");

        let column = parse_column("[Name] [nvarchar](max) NOT NULL").unwrap();
        assert_eq!(column.source_type, "nvarchar");
        assert_eq!(column.params.as_deref(), Some("max"));
        assert!(!column.nullable);
    }

    #[test]
    fn test_parse_quoted_names_with_spaces() {
        let column = parse_column("[Order Date] datetime2(7)").unwrap();
        assert_eq!(column.name, "Order Date");
        assert_eq!(column.source_type, "datetime2");
        assert_eq!(column.params.as_deref(), Some("7"));

        let column = parse_column("\"Ship To\" varchar (40)").unwrap();
        assert_eq!(column.name, "Ship To");
        assert_eq!(column.params.as_deref(), Some("40"));
    }

    #[test]
    fn test_nullability_defaults_to_true() {
        assert!(parse_column("[Notes] ntext").unwrap().nullable);
        assert!(parse_column("[Flag] bit DEFAULT ((0))").unwrap().nullable);
    }

    #[test]
    fn test_not_null_after_other_modifiers() {
        let column = parse_column("[Id] int IDENTITY(1,1) NOT  NULL").unwrap();
        assert!(!column.nullable);
        assert!(column.params.is_none());

        let column =
            parse_column("[Created] datetime CONSTRAINT DF_Created DEFAULT (getdate()) not null")
                .unwrap();
        assert!(!column.nullable);
    }

    #[test]
    fn test_multiline_fragment() {
        let column = parse_column("[Total]\n    numeric(19, 0)\n    NOT NULL").unwrap();
        assert_eq!(column.name, "Total");
        assert_eq!(column.params.as_deref(), Some("19, 0"));
        assert!(!column.nullable);
    }

    #[test]
    fn test_fragment_without_type_is_rejected() {
        assert!(parse_column("[Orphan]").is_none());
        assert!(parse_column("(1, 2)").is_none());
    }

    #[test]
    fn test_dash_comment_is_not_a_column_name() {
        assert!(parse_column("-- surrogate key\n  Name varchar(10) NOT NULL").is_none());
        assert!(parse_column("-x int").is_none());
    }

    #[test]
    fn test_reserved_identifiers() {
        assert!(is_reserved_identifier("check"));
        assert!(is_reserved_identifier("Index"));
        assert!(is_reserved_identifier("ALLOW_PAGE_LOCKS"));
        assert!(!is_reserved_identifier("Checksum"));
        assert!(!is_reserved_identifier("Id"));
    }

    #[test]
    fn test_constraint_fragments() {
        assert!(is_constraint_fragment("CONSTRAINT PK_Orders PRIMARY KEY (Id)"));
        assert!(is_constraint_fragment("PRIMARY KEY CLUSTERED ([Id] ASC)"));
        assert!(is_constraint_fragment("unique ([Code])"));
        assert!(is_constraint_fragment("CHECK([Qty] > 0)"));
        assert!(is_constraint_fragment("FOREIGN KEY ([CustomerId]) REFERENCES Customers(Id)"));
        assert!(is_constraint_fragment("ALLOW_PAGE_LOCKS = ON"));
        assert!(is_constraint_fragment("OPTIMIZE_FOR_SEQUENTIAL_KEY = OFF"));
    }

    #[test]
    fn test_keyword_prefixed_column_names_are_columns() {
        assert!(!is_constraint_fragment("Primary_Contact nvarchar(50)"));
        assert!(!is_constraint_fragment("Checksum int"));
        assert!(!is_constraint_fragment("UniqueCode char(8)"));
        assert!(!is_constraint_fragment("[Check] bit"));
    }

    #[test]
    fn test_parse_columns_preserves_order_and_skips_constraints() {
        let body = "[Id] int NOT NULL, [Name] nvarchar(50), PRIMARY KEY ([Id]), [Amount] decimal(10,2) NULL";
        let (columns, errors) = parse_columns(body, "Orders");

        assert!(errors.is_empty());
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Id", "Name", "Amount"]);
    }

    #[test]
    fn test_parse_columns_reports_unparseable_fragment() {
        let (columns, errors) = parse_columns("[Id] int, [Broken], [Name] varchar(10)", "T");

        assert_eq!(columns.len(), 2);
        assert_eq!(
            errors,
            vec![ImportError::UnparseableColumn {
                table: "T".to_string(),
                fragment: "[Broken]".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_columns_empty_body() {
        let (columns, errors) = parse_columns("   ", "Empty");
        assert!(columns.is_empty());
        assert!(errors.is_empty());
    }
}
