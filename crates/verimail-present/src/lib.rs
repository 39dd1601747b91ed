//! Presentation logic for verification results.
//!
//! Everything here is renderer-agnostic state: the CLI draws it with
//! terminal widgets, but no type in this crate knows about a terminal.
//!
//! # Architecture
//!
//! - `column` - Table columns and their display text
//! - `table` - Global search, status filter, and the sort cycle ([`TableView`])
//! - `window` - Fixed-height virtual scrolling ([`VirtualWindow`])
//! - `summary` - Chart bars derived from stats ([`build_summary`])
//! - `debounce` - Trailing-edge debouncing for search input
//! - `pending` - Delayed, minimum-duration loading indicator
//! - `submission` - The single in-flight submission lifecycle

mod column;
mod debounce;
mod error;
mod pending;
mod submission;
mod summary;
mod table;
mod window;

pub use column::{Column, ColumnKind, ParseColumnError};
pub use debounce::{Debouncer, GLOBAL_FILTER_DEBOUNCE};
pub use error::{PresentError, Result};
pub use pending::{MIN_VISIBLE, PendingIndicator, SHOW_DELAY};
pub use submission::Submission;
pub use summary::{ChartBar, SummaryKey, build_summary};
pub use table::{SortDirection, SortState, TableView};
pub use window::VirtualWindow;
