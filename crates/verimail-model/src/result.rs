//! Verification verdicts and the result set returned for a batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reachability::Reachability;

/// Verdict for a single submitted address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub email: String,
    pub is_reachable: Reachability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disposable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_role_account: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_connect_smtp: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_full_inbox: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_catch_all: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deliverable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_banned: Option<bool>,
}

impl VerificationResult {
    /// Creates a verdict with every flag undetermined.
    pub fn new(email: impl Into<String>, is_reachable: Reachability) -> Self {
        Self {
            email: email.into(),
            is_reachable,
            is_disposable: None,
            is_role_account: None,
            can_connect_smtp: None,
            has_full_inbox: None,
            is_catch_all: None,
            is_deliverable: None,
            is_disabled: None,
            is_banned: None,
        }
    }

    /// Reads one of the tri-state flags.
    pub fn flag(&self, field: BooleanField) -> Option<bool> {
        match field {
            BooleanField::Disposable => self.is_disposable,
            BooleanField::RoleAccount => self.is_role_account,
            BooleanField::CanConnectSmtp => self.can_connect_smtp,
            BooleanField::FullInbox => self.has_full_inbox,
            BooleanField::CatchAll => self.is_catch_all,
            BooleanField::Deliverable => self.is_deliverable,
            BooleanField::Disabled => self.is_disabled,
            BooleanField::Banned => self.is_banned,
        }
    }

    /// Sets one of the tri-state flags.
    #[must_use]
    pub fn with_flag(mut self, field: BooleanField, value: Option<bool>) -> Self {
        let slot = match field {
            BooleanField::Disposable => &mut self.is_disposable,
            BooleanField::RoleAccount => &mut self.is_role_account,
            BooleanField::CanConnectSmtp => &mut self.can_connect_smtp,
            BooleanField::FullInbox => &mut self.has_full_inbox,
            BooleanField::CatchAll => &mut self.is_catch_all,
            BooleanField::Deliverable => &mut self.is_deliverable,
            BooleanField::Disabled => &mut self.is_disabled,
            BooleanField::Banned => &mut self.is_banned,
        };
        *slot = value;
        self
    }
}

/// The tri-state flags carried by a [`VerificationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanField {
    Disposable,
    RoleAccount,
    CanConnectSmtp,
    FullInbox,
    CatchAll,
    Deliverable,
    Disabled,
    Banned,
}

impl BooleanField {
    pub const ALL: [BooleanField; 8] = [
        BooleanField::Disposable,
        BooleanField::RoleAccount,
        BooleanField::CanConnectSmtp,
        BooleanField::FullInbox,
        BooleanField::CatchAll,
        BooleanField::Deliverable,
        BooleanField::Disabled,
        BooleanField::Banned,
    ];

    /// Column header text.
    pub fn label(&self) -> &'static str {
        match self {
            BooleanField::Disposable => "Disposable",
            BooleanField::RoleAccount => "Role Account",
            BooleanField::CanConnectSmtp => "Connectable",
            BooleanField::FullInbox => "Full Inbox",
            BooleanField::CatchAll => "Catch-all",
            BooleanField::Deliverable => "Deliverable",
            BooleanField::Disabled => "Disabled",
            BooleanField::Banned => "Banned",
        }
    }
}

/// Aggregate counts per verdict.
///
/// Field order matches the service payload and drives the order of the
/// summary chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub safe: u64,
    pub risky: u64,
    pub unknown: u64,
    pub invalid: u64,
    pub total: u64,
}

impl Stats {
    /// Counts verdicts. `Banned` is folded into `invalid`.
    pub fn from_items(items: &[VerificationResult]) -> Self {
        let mut stats = Stats::default();
        for item in items {
            match item.is_reachable {
                Reachability::Safe => stats.safe += 1,
                Reachability::Risky => stats.risky += 1,
                Reachability::Unknown => stats.unknown += 1,
                Reachability::Invalid | Reachability::Banned => stats.invalid += 1,
            }
        }
        stats.total = items.len() as u64;
        stats
    }

    /// Sum of the per-status counts.
    ///
    /// Widened so counts taken from a response can never overflow.
    pub fn status_sum(&self) -> u128 {
        [self.safe, self.risky, self.unknown, self.invalid]
            .into_iter()
            .map(u128::from)
            .sum()
    }
}

/// Accepted response shapes: the documented `{stats, items}` object, or the
/// bare verdict array the self-hosted backend returns.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResultSetWire {
    Full {
        stats: Stats,
        items: Vec<VerificationResult>,
        #[serde(default)]
        checked_at: Option<DateTime<Utc>>,
    },
    Items(Vec<VerificationResult>),
}

impl From<ResultSetWire> for ResultSet {
    fn from(wire: ResultSetWire) -> Self {
        match wire {
            ResultSetWire::Full {
                stats,
                items,
                checked_at,
            } => ResultSet {
                stats,
                items,
                checked_at,
            },
            ResultSetWire::Items(items) => ResultSet::from_items(items),
        }
    }
}

/// Verdicts for one submitted batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResultSetWire")]
pub struct ResultSet {
    pub stats: Stats,
    pub items: Vec<VerificationResult>,
    /// When the batch was answered; stamped by the client, not the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_at: Option<DateTime<Utc>>,
}

impl ResultSet {
    /// Builds a result set, deriving stats by counting.
    pub fn from_items(items: Vec<VerificationResult>) -> Self {
        Self {
            stats: Stats::from_items(&items),
            items,
            checked_at: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn with_checked_at(mut self, at: DateTime<Utc>) -> Self {
        self.checked_at = Some(at);
        self
    }

    /// Describes violations of `total == items.len()` and
    /// `safe + risky + unknown + invalid == total`.
    ///
    /// The presenter trusts the service's stats, so these are informational.
    pub fn consistency_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let item_count = self.items.len() as u64;
        if self.stats.total != item_count {
            warnings.push(format!(
                "stats.total is {} but {} items were returned",
                self.stats.total, item_count
            ));
        }
        if self.stats.status_sum() != u128::from(self.stats.total) {
            warnings.push(format!(
                "status counts sum to {} but stats.total is {}",
                self.stats.status_sum(),
                self.stats.total
            ));
        }
        warnings
    }
}
