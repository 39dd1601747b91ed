//! Address extraction from a parsed record.

use crate::text::{Delimiter, RawRecord};

/// Extraction behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Trim surrounding whitespace from each cell before the `@` test.
    ///
    /// Off by default: untrimmed cells are passed through as found, so
    /// `" a@example.com"` reaches the validation service with its space.
    pub trim: bool,
}

impl ExtractOptions {
    /// Options with trimming enabled.
    pub fn strict() -> Self {
        Self { trim: true }
    }
}

/// Returns the `column` cell of every row that contains `@`, in row order.
///
/// The column position is looked up by exact header name. A name that
/// matches no header, or rows too short to reach the column, contribute
/// nothing. Duplicates are kept.
pub fn extract(record: &RawRecord, column: &str, delimiter: Delimiter) -> Vec<String> {
    extract_with(record, column, delimiter, &ExtractOptions::default())
}

/// [`extract`] with explicit options.
pub fn extract_with(
    record: &RawRecord,
    column: &str,
    delimiter: Delimiter,
    options: &ExtractOptions,
) -> Vec<String> {
    let Some(index) = record.column_index(column) else {
        tracing::debug!(column, "Selected column is not a header; nothing extracted");
        return Vec::new();
    };

    record
        .rows()
        .iter()
        .filter_map(|row| delimiter.split(row).get(index).copied())
        .map(|cell| if options.trim { cell.trim() } else { cell })
        .filter(|cell| cell.contains('@'))
        .map(str::to_string)
        .collect()
}
