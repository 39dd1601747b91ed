//! Result table columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use verimail_model::{BooleanField, VerificationResult, tri_state};

/// How a column's values compare when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Compared by display text.
    Text,
    /// Compared `N/A < No < Yes`.
    Boolean,
}

/// A column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Email,
    Status,
    Disposable,
    RoleAccount,
    Connectable,
    FullInbox,
    CatchAll,
    Deliverable,
    Disabled,
}

impl Column {
    /// Columns in display order.
    pub const ALL: [Column; 9] = [
        Column::Email,
        Column::Status,
        Column::Disposable,
        Column::RoleAccount,
        Column::Connectable,
        Column::FullInbox,
        Column::CatchAll,
        Column::Deliverable,
        Column::Disabled,
    ];

    /// The flag behind a boolean column.
    pub fn flag(&self) -> Option<BooleanField> {
        match self {
            Column::Email | Column::Status => None,
            Column::Disposable => Some(BooleanField::Disposable),
            Column::RoleAccount => Some(BooleanField::RoleAccount),
            Column::Connectable => Some(BooleanField::CanConnectSmtp),
            Column::FullInbox => Some(BooleanField::FullInbox),
            Column::CatchAll => Some(BooleanField::CatchAll),
            Column::Deliverable => Some(BooleanField::Deliverable),
            Column::Disabled => Some(BooleanField::Disabled),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        if self.flag().is_some() {
            ColumnKind::Boolean
        } else {
            ColumnKind::Text
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            Column::Email => "Email",
            Column::Status => "Status",
            other => other.flag().map_or("", |flag| flag.label()),
        }
    }

    /// Short identifier used on the command line and in stored preferences.
    pub fn key(&self) -> &'static str {
        match self {
            Column::Email => "email",
            Column::Status => "status",
            Column::Disposable => "disposable",
            Column::RoleAccount => "role_account",
            Column::Connectable => "connectable",
            Column::FullInbox => "full_inbox",
            Column::CatchAll => "catch_all",
            Column::Deliverable => "deliverable",
            Column::Disabled => "disabled",
        }
    }

    /// The text shown in this column's cell for `item`.
    pub fn display<'a>(&self, item: &'a VerificationResult) -> &'a str {
        match self {
            Column::Email => &item.email,
            Column::Status => item.is_reachable.as_str(),
            other => tri_state(other.flag().and_then(|flag| item.flag(flag))),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Error returned when a column name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColumnError(pub String);

impl fmt::Display for ParseColumnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for ParseColumnError {}

impl FromStr for Column {
    type Err = ParseColumnError;

    /// Accepts the key or the header, ignoring case; `-` and space may
    /// stand in for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Column::ALL
            .into_iter()
            .find(|column| {
                column.key() == wanted
                    || column.header().to_lowercase().replace(['-', ' '], "_") == wanted
            })
            .ok_or_else(|| ParseColumnError(s.to_string()))
    }
}
