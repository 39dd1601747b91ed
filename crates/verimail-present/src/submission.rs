//! The submit-and-wait lifecycle of a verification batch.

use verimail_model::ResultSet;

use crate::error::{PresentError, Result};

/// State of the one batch the user may have in flight.
///
/// `Idle -> Submitting -> Succeeded | Failed -> Idle`. A finished state
/// may also start the next submission directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submission {
    #[default]
    Idle,
    Submitting {
        count: usize,
    },
    Succeeded(ResultSet),
    Failed(String),
}

impl Submission {
    /// Starts a batch of `count` addresses.
    pub fn begin(&mut self, count: usize) -> Result<()> {
        if !self.can_submit() {
            return Err(PresentError::SubmissionInFlight);
        }
        tracing::debug!(count, "Submission started");
        *self = Submission::Submitting { count };
        Ok(())
    }

    pub fn succeed(&mut self, results: ResultSet) -> Result<()> {
        self.ensure_in_flight()?;
        tracing::debug!(items = results.items.len(), "Submission succeeded");
        *self = Submission::Succeeded(results);
        Ok(())
    }

    /// Records a failure with the message shown to the user.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.ensure_in_flight()?;
        let message = message.into();
        tracing::debug!(%message, "Submission failed");
        *self = Submission::Failed(message);
        Ok(())
    }

    /// Returns to `Idle`; rejected while a batch is in flight.
    pub fn reset(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(PresentError::SubmissionInFlight);
        }
        *self = Submission::Idle;
        Ok(())
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Submission::Submitting { .. })
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    pub fn results(&self) -> Option<&ResultSet> {
        match self {
            Submission::Succeeded(results) => Some(results),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Submission::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn ensure_in_flight(&self) -> Result<()> {
        if self.is_submitting() {
            Ok(())
        } else {
            Err(PresentError::NothingInFlight)
        }
    }
}
