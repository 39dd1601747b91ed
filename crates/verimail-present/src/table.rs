//! Filtering and sorting of the results table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;
use verimail_model::{Reachability, ResultSet, VerificationResult};

use crate::column::{Column, ColumnKind};
use crate::error::{PresentError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active single-column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn ascending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: Column) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }
}

/// A result list with the user's search, status filter, and sort applied.
///
/// The status filter runs first, then the global search, then the sort.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    items: Vec<VerificationResult>,
    global_filter: Option<String>,
    status_filter: Option<Reachability>,
    sort: Option<SortState>,
}

impl TableView {
    pub fn new(items: Vec<VerificationResult>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn from_results(results: &ResultSet) -> Self {
        Self::new(results.items.clone())
    }

    pub fn items(&self) -> &[VerificationResult] {
        &self.items
    }

    /// Sets the global search text. An empty value clears the search.
    pub fn set_global_filter(&mut self, value: &str) {
        self.global_filter = if value.is_empty() {
            None
        } else {
            Some(value.to_lowercase())
        };
        debug!(active = self.global_filter.is_some(), "Global filter changed");
    }

    pub fn global_filter(&self) -> Option<&str> {
        self.global_filter.as_deref()
    }

    /// Distinct statuses present in the data, in first-seen order.
    pub fn status_options(&self) -> Vec<Reachability> {
        let mut options = Vec::new();
        for item in &self.items {
            if !options.contains(&item.is_reachable) {
                options.push(item.is_reachable);
            }
        }
        options
    }

    /// Restricts rows to one status; `None` shows all.
    ///
    /// Only statuses from [`status_options`](Self::status_options) are
    /// accepted; anything else leaves the filter unchanged.
    pub fn set_status_filter(&mut self, status: Option<Reachability>) -> Result<()> {
        if let Some(status) = status {
            let options = self.status_options();
            if !options.contains(&status) {
                return Err(PresentError::StatusNotPresent { status, options });
            }
        }
        self.status_filter = status;
        Ok(())
    }

    pub fn status_filter(&self) -> Option<Reachability> {
        self.status_filter
    }

    /// Activates a column header.
    ///
    /// The same column cycles ascending, descending, unsorted; another
    /// column starts at ascending. Returns the new sort.
    pub fn toggle_sort(&mut self, column: Column) -> Option<SortState> {
        self.sort = match self.sort {
            Some(SortState {
                column: current,
                direction,
            }) if current == column => match direction {
                SortDirection::Ascending => Some(SortState::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(SortState::ascending(column)),
        };
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) {
        self.sort = sort;
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Rows left after the status filter, before the global search.
    pub fn pre_filter_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| self.matches_status(item))
            .count()
    }

    /// Placeholder for the search input.
    pub fn search_placeholder(&self) -> String {
        format!("{} records...", self.pre_filter_count())
    }

    /// Filtered and sorted rows.
    pub fn rows(&self) -> Vec<&VerificationResult> {
        let mut rows: Vec<&VerificationResult> = self
            .items
            .iter()
            .filter(|item| self.matches_status(item) && self.matches_search(item))
            .collect();

        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare(sort.column, a, b);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    fn matches_status(&self, item: &VerificationResult) -> bool {
        self.status_filter
            .is_none_or(|status| item.is_reachable == status)
    }

    fn matches_search(&self, item: &VerificationResult) -> bool {
        let Some(needle) = self.global_filter.as_deref() else {
            return true;
        };
        Column::ALL
            .iter()
            .any(|column| column.display(item).to_lowercase().contains(needle))
    }
}

fn compare(column: Column, a: &VerificationResult, b: &VerificationResult) -> Ordering {
    match column.kind() {
        ColumnKind::Text => column.display(a).cmp(column.display(b)),
        ColumnKind::Boolean => {
            let rank = |item: &VerificationResult| match column.flag().and_then(|f| item.flag(f)) {
                None => 0,
                Some(false) => 1,
                Some(true) => 2,
            };
            rank(a).cmp(&rank(b))
        }
    }
}
