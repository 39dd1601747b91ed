//! Summary chart derivation.

use std::fmt;

use verimail_model::{Stats, StatusTone};

/// Identifies a bar of the summary chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKey {
    Total,
    Safe,
    Risky,
    Unknown,
    Invalid,
}

impl SummaryKey {
    /// Bars in chart order.
    pub const ALL: [SummaryKey; 5] = [
        SummaryKey::Total,
        SummaryKey::Safe,
        SummaryKey::Risky,
        SummaryKey::Unknown,
        SummaryKey::Invalid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SummaryKey::Total => "Total",
            SummaryKey::Safe => "Safe",
            SummaryKey::Risky => "Risky",
            SummaryKey::Unknown => "Unknown",
            SummaryKey::Invalid => "Invalid",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            SummaryKey::Total => StatusTone::Accent,
            SummaryKey::Safe => StatusTone::Positive,
            SummaryKey::Risky => StatusTone::Caution,
            SummaryKey::Unknown => StatusTone::Neutral,
            SummaryKey::Invalid => StatusTone::Negative,
        }
    }

    fn value(&self, stats: &Stats) -> u64 {
        match self {
            SummaryKey::Total => stats.total,
            SummaryKey::Safe => stats.safe,
            SummaryKey::Risky => stats.risky,
            SummaryKey::Unknown => stats.unknown,
            SummaryKey::Invalid => stats.invalid,
        }
    }
}

impl fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bar of the summary chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBar {
    pub key: SummaryKey,
    pub value: u64,
    /// Share of `stats.total`, 0 to 100 for consistent stats.
    pub percentage: f64,
}

impl ChartBar {
    /// The share as printed under the bar, e.g. `(50.0 %)`.
    pub fn percentage_label(&self) -> String {
        format!("({:.1} %)", self.percentage)
    }

    /// Bar length for a chart whose full height is `max` cells.
    pub fn scaled(&self, max: u16) -> u16 {
        let cells = (f64::from(max) * self.percentage / 100.0).round();
        cells.clamp(0.0, f64::from(max)) as u16
    }
}

/// Builds the chart bars: total first at 100 %, then each status.
///
/// With `total == 0` every bar, total included, is 0 %.
pub fn build_summary(stats: &Stats) -> Vec<ChartBar> {
    SummaryKey::ALL
        .into_iter()
        .map(|key| {
            let value = key.value(stats);
            let percentage = match (key, stats.total) {
                (_, 0) => 0.0,
                (SummaryKey::Total, _) => 100.0,
                _ => value as f64 / stats.total as f64 * 100.0,
            };
            ChartBar {
                key,
                value,
                percentage,
            }
        })
        .collect()
}
