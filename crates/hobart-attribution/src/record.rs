//! The per-period attribution record.

use chrono::NaiveDate;
use hobart_series::{AssetId, Granularity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One period's decomposition of portfolio return.
///
/// `total_return` is the portfolio's realized return over the period;
/// `asset_contributions` explains it through prior-weight price moves and
/// `rebalancing_impact` through weight changes. At daily granularity the
/// identity `total_return ≈ Σ contributions + weight_change_impact` holds
/// up to the residual the summary reports as `attribution_accuracy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionRecord {
    /// Period end date (the date the return was realized).
    pub date: NaiveDate,
    /// Portfolio return over the period.
    pub total_return: f64,
    /// Per-asset price contribution: prior weight × realized return.
    pub asset_contributions: BTreeMap<AssetId, f64>,
    /// Per-asset rebalancing impact: weight change × realized return.
    pub rebalancing_impact: BTreeMap<AssetId, f64>,
    /// Sum of all per-asset rebalancing impacts.
    pub weight_change_impact: f64,
    /// Reporting granularity this record was produced at.
    pub granularity: Granularity,
}

impl AttributionRecord {
    /// Sum of all per-asset price contributions.
    pub fn contribution_total(&self) -> f64 {
        self.asset_contributions.values().sum()
    }

    /// Return explained by the decomposition: contributions plus
    /// rebalancing impact.
    pub fn explained_return(&self) -> f64 {
        self.contribution_total() + self.weight_change_impact
    }
}

impl fmt::Display for AttributionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: total {:.4}%, explained {:.4}%, rebalancing {:.4}%",
            self.date,
            self.granularity,
            self.total_return * 100.0,
            self.explained_return() * 100.0,
            self.weight_change_impact * 100.0
        )
    }
}
