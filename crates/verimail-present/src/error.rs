//! Presentation state errors.

use thiserror::Error;
use verimail_model::Reachability;

/// A state transition that is not allowed right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentError {
    /// Another submission has not finished yet.
    #[error("A check is already running")]
    SubmissionInFlight,

    /// A completion arrived with nothing in flight.
    #[error("No check is running")]
    NothingInFlight,

    /// A status filter for a status no row has.
    #[error("No results have status {status}; choose one of: {}", join_statuses(.options))]
    StatusNotPresent {
        status: Reachability,
        options: Vec<Reachability>,
    },
}

/// `Safe, Invalid`, or `none` for an empty list.
pub(crate) fn join_statuses(statuses: &[Reachability]) -> String {
    if statuses.is_empty() {
        return "none".to_string();
    }
    statuses
        .iter()
        .map(Reachability::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for presentation state changes.
pub type Result<T> = std::result::Result<T, PresentError>;
