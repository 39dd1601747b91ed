//! Stateful ingestion with the re-invocation rules of the upload dialog.

use tracing::debug;

use crate::column::{ColumnMatch, infer_email_column};
use crate::extract::{ExtractOptions, extract_with};
use crate::text::{Delimiter, RawRecord, parse};

/// Holds one uploaded text and the state derived from it.
///
/// - a new text is parsed from scratch and the column heuristic runs again
/// - a new column selection re-extracts from the parsed record
/// - a new delimiter re-splits the retained text and re-extracts, keeping the
///   selection when the new headers still contain it
#[derive(Debug, Clone, Default)]
pub struct IngestSession {
    text: Option<String>,
    delimiter: Delimiter,
    options: ExtractOptions,
    record: RawRecord,
    selected: Option<String>,
    addresses: Vec<String>,
}

impl IngestSession {
    pub fn new(delimiter: Delimiter) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the uploaded text.
    pub fn load_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.record = self.parse_current();
        self.selected = match infer_email_column(self.record.headers()) {
            ColumnMatch::Found(index) => Some(self.record.headers()[index].clone()),
            ColumnMatch::NotFound => self.selection_if_present(),
        };
        debug!(
            headers = self.record.headers().len(),
            rows = self.record.row_count(),
            selected = ?self.selected,
            "Parsed uploaded text"
        );
        self.refresh();
    }

    /// Changes the delimiter.
    pub fn set_delimiter(&mut self, delimiter: Delimiter) {
        if delimiter == self.delimiter {
            return;
        }
        self.delimiter = delimiter;
        self.record = self.parse_current();
        self.selected = self.selection_if_present().or_else(|| {
            infer_email_column(self.record.headers())
                .index()
                .map(|index| self.record.headers()[index].clone())
        });
        self.refresh();
    }

    /// Selects the source column by header name.
    ///
    /// Returns `false` when no header carries that name; the selection is
    /// still recorded and simply extracts nothing.
    pub fn select_column(&mut self, column: impl Into<String>) -> bool {
        let column = column.into();
        let known = self.record.column_index(&column).is_some();
        self.selected = Some(column);
        self.refresh();
        known
    }

    pub fn set_options(&mut self, options: ExtractOptions) {
        self.options = options;
        self.refresh();
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    pub fn headers(&self) -> &[String] {
        self.record.headers()
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Addresses extracted with the current settings.
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// The count line shown to the user, when anything was found.
    pub fn summary(&self) -> Option<String> {
        if self.record.headers().is_empty() || self.addresses.is_empty() {
            return None;
        }
        Some(format!(
            "We found {} emails ready to use.",
            self.addresses.len()
        ))
    }

    /// Hands the extracted addresses to the caller.
    pub fn take_addresses(&mut self) -> Vec<String> {
        std::mem::take(&mut self.addresses)
    }

    fn parse_current(&self) -> RawRecord {
        self.text
            .as_deref()
            .map(|text| parse(text, self.delimiter))
            .unwrap_or_default()
    }

    fn selection_if_present(&self) -> Option<String> {
        self.selected
            .as_ref()
            .filter(|name| self.record.column_index(name).is_some())
            .cloned()
    }

    fn refresh(&mut self) {
        self.addresses = match &self.selected {
            Some(column) => extract_with(&self.record, column, self.delimiter, &self.options),
            None => Vec::new(),
        };
    }
}
