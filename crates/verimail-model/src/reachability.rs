//! Deliverability verdict reported by the validation service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::display::StatusTone;

/// Overall reachability of an address.
///
/// The service serializes these as `"Safe"`, `"Risky"`, ...; the older
/// serverless handler used lowercase names, which are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reachability {
    #[serde(alias = "safe")]
    Safe,
    #[serde(alias = "risky")]
    Risky,
    #[serde(alias = "invalid")]
    Invalid,
    #[serde(alias = "unknown")]
    Unknown,
    /// Emitted by the self-hosted backend when the probing host is blocked.
    #[serde(alias = "banned")]
    Banned,
}

impl Reachability {
    /// All verdicts in the order the summary reports them.
    pub const ALL: [Reachability; 5] = [
        Reachability::Safe,
        Reachability::Risky,
        Reachability::Unknown,
        Reachability::Invalid,
        Reachability::Banned,
    ];

    /// Display label, identical to the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reachability::Safe => "Safe",
            Reachability::Risky => "Risky",
            Reachability::Invalid => "Invalid",
            Reachability::Unknown => "Unknown",
            Reachability::Banned => "Banned",
        }
    }

    /// Colour family used when rendering the status badge.
    pub fn tone(&self) -> StatusTone {
        match self {
            Reachability::Safe => StatusTone::Positive,
            Reachability::Risky => StatusTone::Caution,
            Reachability::Invalid => StatusTone::Negative,
            Reachability::Unknown | Reachability::Banned => StatusTone::Neutral,
        }
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReachabilityError(pub String);

impl fmt::Display for ParseReachabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown reachability status '{}'", self.0)
    }
}

impl std::error::Error for ParseReachabilityError {}

impl FromStr for Reachability {
    type Err = ParseReachabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reachability::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseReachabilityError(s.to_string()))
    }
}
