//! Removal of SQL Server script noise ahead of structural parsing
//!
//! SSMS "Script Table as" output wraps every statement in `USE`, `SET` and
//! `GO` lines and often carries block comments. None of these carry column
//! information, so they are dropped before the document is split.

use once_cell::sync::Lazy;
use regex::Regex;

/// `GO` batch separator on a line of its own, with an optional repeat count
static BATCH_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*GO(?:[ \t]+\d+)?[ \t]*;?[ \t]*$").unwrap());

/// `USE [database]` lines
static USE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^[ \t]*USE[ \t]+.*$").unwrap());

/// `SET ANSI_NULLS ON` and friends
static SET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^[ \t]*SET[ \t]+.*$").unwrap());

/// Strip comments, batch separators and `USE`/`SET` lines from a raw SQL
/// Server script.
///
/// See [`strip_comments`] for how comments are found.
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::import::preprocess::preprocess;
///
/// let cleaned = preprocess("USE [Sales]\nGO\n/* orders */\nCREATE TABLE t (a int)\nGO\n");
/// assert!(!cleaned.contains("USE"));
/// assert!(!cleaned.contains("GO"));
/// assert!(cleaned.contains("CREATE TABLE t (a int)"));
/// ```
pub fn preprocess(sql: &str) -> String {
    let cleaned = strip_comments(sql);
    let cleaned = BATCH_SEPARATOR_RE.replace_all(&cleaned, "");
    let cleaned = USE_RE.replace_all(&cleaned, "");
    SET_RE.replace_all(&cleaned, "").into_owned()
}

/// Remove `-- ...` line comments and `/* ... */` block comments.
///
/// Single pass over the text. Comment markers inside `'strings'`,
/// `"quoted"` or `[bracketed]` identifiers are left alone. A line comment
/// ends before its newline, so the line break survives. An unterminated `/*`
/// is left in place together with the rest of the text.
pub fn strip_comments(sql: &str) -> String {
    let mut cleaned = String::with_capacity(sql.len());
    let mut closing: Option<char> = None;
    let mut rest = sql;

    while let Some(ch) = rest.chars().next() {
        if closing.is_none() {
            if rest.starts_with("--") {
                let end = rest.find('\n').unwrap_or(rest.len());
                rest = &rest[end..];
                continue;
            }
            if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(end) => {
                        rest = &rest[end + 4..];
                        continue;
                    }
                    None => {
                        cleaned.push_str(rest);
                        break;
                    }
                }
            }
            closing = match ch {
                '\'' => Some('\''),
                '"' => Some('"'),
                '[' => Some(']'),
                _ => None,
            };
        } else if closing == Some(ch) {
            closing = None;
        }

        cleaned.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    cleaned
}
