//! Header/row splitting for delimited text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cell separator for uploaded text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// `,`
    #[default]
    Comma,
    /// `.`
    Period,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Period => '.',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Delimiter::Comma => "Comma",
            Delimiter::Period => "Period",
        }
    }

    /// Splits one line into cells. No trimming, no quoting.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.split(self.as_char()).collect()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ('{}')", self.label(), self.as_char())
    }
}

/// Parsed header names plus the raw, unsplit data rows.
///
/// Rows are split into cells on demand so that a delimiter change only needs
/// the header line re-split. Header count and row width are never validated
/// against each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    headers: Vec<String>,
    rows: Vec<String>,
}

impl RawRecord {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the header exactly equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell at `column` in row `row`; `None` when the row is short.
    pub fn cell(&self, row: usize, column: usize, delimiter: Delimiter) -> Option<&str> {
        let line = self.rows.get(row)?;
        delimiter.split(line).get(column).copied()
    }
}

/// Splits `text` into a header line and body at the first line break, then
/// splits the header line on `delimiter` and the body into lines.
///
/// Text without a line break yields its single header line and no rows.
/// A `\r` before each `\n` is dropped so CRLF input parses like LF input.
pub fn parse(text: &str, delimiter: Delimiter) -> RawRecord {
    let (header_line, body) = match text.find('\n') {
        Some(index) => (&text[..index], Some(&text[index + 1..])),
        None => (text, None),
    };

    let headers = delimiter
        .split(strip_carriage_return(header_line))
        .into_iter()
        .map(str::to_string)
        .collect();

    let rows = body
        .map(|body| {
            body.split('\n')
                .map(|line| strip_carriage_return(line).to_string())
                .collect()
        })
        .unwrap_or_default();

    RawRecord { headers, rows }
}

fn strip_carriage_return(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let record = parse("name,email\nAda,ada@example.com\nBob,bob@example.com", Delimiter::Comma);
        assert_eq!(record.headers(), ["name", "email"]);
        assert_eq!(record.rows(), ["Ada,ada@example.com", "Bob,bob@example.com"]);
    }

    #[test]
    fn test_parse_without_line_break_has_no_rows() {
        let record = parse("email,name", Delimiter::Comma);
        assert_eq!(record.headers(), ["email", "name"]);
        assert_eq!(record.row_count(), 0);
    }

    #[test]
    fn test_parse_period_delimiter() {
        let record = parse("id.epost\n1.kari@example.no", Delimiter::Period);
        assert_eq!(record.headers(), ["id", "epost"]);
        // Addresses containing the delimiter get split too.
        assert_eq!(record.cell(0, 1, Delimiter::Period), Some("kari@example"));
    }

    #[test]
    fn test_parse_crlf() {
        let record = parse("a,email\r\n1,x@example.com\r\n", Delimiter::Comma);
        assert_eq!(record.headers(), ["a", "email"]);
        assert_eq!(record.rows(), ["1,x@example.com", ""]);
    }

    #[test]
    fn test_parse_keeps_whitespace() {
        let record = parse(" email ,name\n a@b.c ,x", Delimiter::Comma);
        assert_eq!(record.headers(), [" email ", "name"]);
        assert_eq!(record.cell(0, 0, Delimiter::Comma), Some(" a@b.c "));
    }

    #[test]
    fn test_cell_on_short_row() {
        let record = parse("a,b,c\n1,2", Delimiter::Comma);
        assert_eq!(record.cell(0, 1, Delimiter::Comma), Some("2"));
        assert_eq!(record.cell(0, 2, Delimiter::Comma), None);
        assert_eq!(record.cell(5, 0, Delimiter::Comma), None);
    }

    #[test]
    fn test_quotes_do_not_protect_delimiters() {
        let record = parse("name,email\n\"Lovelace, Ada\",ada@example.com", Delimiter::Comma);
        assert_eq!(record.cell(0, 0, Delimiter::Comma), Some("\"Lovelace"));
        assert_eq!(record.cell(0, 1, Delimiter::Comma), Some(" Ada\""));
        assert_eq!(record.cell(0, 2, Delimiter::Comma), Some("ada@example.com"));
    }

    #[test]
    fn test_column_index_is_exact() {
        let record = parse("Email,email\n", Delimiter::Comma);
        assert_eq!(record.column_index("email"), Some(1));
        assert_eq!(record.column_index("EMAIL"), None);
    }

    #[test]
    fn test_empty_text() {
        let record = parse("", Delimiter::Comma);
        assert_eq!(record.headers(), [""]);
        assert_eq!(record.row_count(), 0);
    }
}
