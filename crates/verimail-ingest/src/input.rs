//! Free-text address entry.

/// Splits typed or pasted text into address candidates.
///
/// Commas, semicolons, and whitespace separate entries; empty fragments are
/// dropped. No validation happens here: the service reports bad syntax as
/// `Invalid`.
pub fn split_address_input(text: &str) -> Vec<String> {
    text.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}
