//! Balanced parenthesis scanning
//!
//! Both helpers walk the text once, left to right, tracking parenthesis
//! depth. They never panic on unbalanced input: a stray `)` at depth zero is
//! ignored, and an unclosed `(` simply means no span is found.

use std::ops::Range;

/// Locate the first top-level balanced `( ... )` span in `text`.
///
/// Returns the byte offsets of the opening `(` and its matching `)`.
/// The body between them is `&text[start + 1..end]`.
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::import::scanner::find_balanced_span;
///
/// let text = "dbo.Orders (Id int, Amount decimal(10,2))";
/// let (start, end) = find_balanced_span(text).unwrap();
/// assert_eq!(&text[start + 1..end], "Id int, Amount decimal(10,2)");
/// ```
pub fn find_balanced_span(text: &str) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut start = None;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => {
                if depth == 0 && start.is_none() {
                    start = Some(idx);
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0
                    && let Some(open) = start
                {
                    return Some((open, idx));
                }
            }
            _ => {}
        }
    }

    None
}

/// Return the text strictly inside the first top-level balanced span.
pub fn balanced_body(text: &str) -> Option<&str> {
    find_balanced_span(text).map(|(start, end)| &text[start + 1..end])
}

/// Byte ranges of the fragments between top-level occurrences of `separator`.
///
/// Ranges are untrimmed and always cover the whole input, so the last range
/// may be empty.
pub fn top_level_ranges(text: &str, separator: char) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                ranges.push(start..idx);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    ranges.push(start..text.len());

    ranges
}

/// Split `text` on `separator`, but only where parenthesis depth is zero.
///
/// Fragments are trimmed. A trailing fragment after the last separator is
/// only kept when it is non-empty.
///
/// # Example
///
/// ```rust
/// use mssql_delta_ddl::import::scanner::split_top_level;
///
/// let parts = split_top_level("Id int, Amount decimal(10,2) NULL", ',');
/// assert_eq!(parts, vec!["Id int", "Amount decimal(10,2) NULL"]);
/// ```
pub fn split_top_level(text: &str, separator: char) -> Vec<String> {
    let mut parts: Vec<String> = top_level_ranges(text, separator)
        .into_iter()
        .map(|range| text[range].trim().to_string())
        .collect();

    if parts.last().is_some_and(|tail| tail.is_empty()) {
        parts.pop();
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_span_after_table_name() {
        let text = "[dbo].[Orders] ( [Id] int NOT NULL ) ON [PRIMARY]";
        let (start, end) = find_balanced_span(text).unwrap();
        assert_eq!(&text[start..=end], "( [Id] int NOT NULL )");
    }

    #[test]
    fn test_find_span_skips_nested_parens() {
        let text = "t (a decimal(10,2), b varchar(max))";
        assert_eq!(
            balanced_body(text),
            Some("a decimal(10,2), b varchar(max)")
        );
    }

    #[test]
    fn test_find_span_returns_first_span_only() {
        let text = "t (a int) WITH (DATA_COMPRESSION = PAGE)";
        assert_eq!(balanced_body(text), Some("a int"));
    }

    #[test]
    fn test_find_span_unbalanced() {
        assert_eq!(find_balanced_span("t (a int, b decimal(10,2)"), None);
        assert_eq!(find_balanced_span("no parens at all"), None);
    }

    #[test]
    fn test_find_span_ignores_leading_close_paren() {
        let text = ") t (a int)";
        assert_eq!(balanced_body(text), Some("a int"));
    }

    #[test]
    fn test_find_span_multibyte_text() {
        let text = "Größe (Wert int)";
        assert_eq!(balanced_body(text), Some("Wert int"));
    }

    #[test]
    fn test_split_respects_nesting() {
        let parts = split_top_level("a int, b decimal(10,2) NULL, c char(3)", ',');
        assert_eq!(parts, vec!["a int", "b decimal(10,2) NULL", "c char(3)"]);
    }

    #[test]
    fn test_split_never_breaks_inner_span() {
        let parts = split_top_level("x (a,b), y ((c,d),e)", ',');
        assert_eq!(parts, vec!["x (a,b)", "y ((c,d),e)"]);
    }

    #[test]
    fn test_split_drops_empty_trailing_fragment() {
        let parts = split_top_level("a int,\n b int,\n", ',');
        assert_eq!(parts, vec!["a int", "b int"]);
    }

    #[test]
    fn test_split_unbalanced_is_best_effort() {
        let parts = split_top_level("a decimal(10,2, b int", ',');
        assert_eq!(parts, vec!["a decimal(10,2, b int"]);

        let parts = split_top_level("a int), b int", ',');
        assert_eq!(parts, vec!["a int)", "b int"]);
    }

    #[test]
    fn test_ranges_cover_whole_input() {
        let text = "a, f(b, c),";
        let ranges = top_level_ranges(text, ',');
        assert_eq!(ranges, vec![0..1, 2..10, 11..11]);
        assert_eq!(&text[ranges[1].clone()], " f(b, c)");
    }

    #[test]
    fn test_split_keeps_inner_empty_fragments() {
        let parts = split_top_level("a,,b", ',');
        assert_eq!(parts, vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_top_level("", ',').is_empty());
        assert!(split_top_level("   ", ',').is_empty());
    }
}
