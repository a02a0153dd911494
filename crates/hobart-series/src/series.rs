//! Typed input series for the attribution pipeline.
//!
//! All series are ordered maps keyed by [`AssetId`] and `chrono::NaiveDate`,
//! so dates are unique and ascending by construction and every iteration is
//! deterministic. Inputs stamped with a time of day or timezone are
//! normalized to calendar dates at insertion.

use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonical asset identifier.
///
/// A value of this type is an asset by definition, so stray metadata
/// columns can never enter the asset universe.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct AssetId(String);

impl AssetId {
    /// Create an identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Periodic returns per asset: `asset → date → return`.
///
/// Values are stored as supplied; NaN/∞ observations survive insertion and
/// are coerced (and counted) only where the engines consume them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    series: BTreeMap<AssetId, BTreeMap<NaiveDate, f64>>,
}

impl ReturnSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the periodic return of `asset` realized at `date`.
    ///
    /// Re-inserting the same (asset, date) overwrites the prior value.
    pub fn insert(&mut self, asset: impl Into<AssetId>, date: NaiveDate, value: f64) {
        self.series.entry(asset.into()).or_default().insert(date, value);
    }

    /// Record a return stamped with time/timezone, normalized to its
    /// calendar date.
    pub fn insert_datetime(
        &mut self,
        asset: impl Into<AssetId>,
        stamp: DateTime<Utc>,
        value: f64,
    ) {
        self.insert(asset, stamp.date_naive(), value);
    }

    /// Assets present in the series, in sorted order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.series.keys()
    }

    /// The return of `asset` at `date`, if observed.
    pub fn value(&self, asset: &AssetId, date: NaiveDate) -> Option<f64> {
        self.series.get(asset).and_then(|dates| dates.get(&date)).copied()
    }

    /// Union of all per-asset date axes.
    pub fn date_axis(&self) -> BTreeSet<NaiveDate> {
        self.series.values().flat_map(|dates| dates.keys().copied()).collect()
    }

    /// True when no asset has any observation.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(BTreeMap::is_empty)
    }
}

/// Portfolio weights per asset: `asset → date → weight`.
///
/// Beginning-of-period convention: the weight recorded at date *d* is the
/// weight held going into the return realized at the next aligned date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightSeries {
    series: BTreeMap<AssetId, BTreeMap<NaiveDate, f64>>,
}

impl WeightSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the weight of `asset` held from `date`.
    ///
    /// Re-inserting the same (asset, date) overwrites the prior value.
    pub fn insert(&mut self, asset: impl Into<AssetId>, date: NaiveDate, weight: f64) {
        self.series.entry(asset.into()).or_default().insert(date, weight);
    }

    /// Record a weight stamped with time/timezone, normalized to its
    /// calendar date.
    pub fn insert_datetime(
        &mut self,
        asset: impl Into<AssetId>,
        stamp: DateTime<Utc>,
        weight: f64,
    ) {
        self.insert(asset, stamp.date_naive(), weight);
    }

    /// Assets present in the series, in sorted order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.series.keys()
    }

    /// The weight of `asset` at `date`, if recorded.
    pub fn value(&self, asset: &AssetId, date: NaiveDate) -> Option<f64> {
        self.series.get(asset).and_then(|dates| dates.get(&date)).copied()
    }

    /// Union of all per-asset date axes.
    pub fn date_axis(&self) -> BTreeSet<NaiveDate> {
        self.series.values().flat_map(|dates| dates.keys().copied()).collect()
    }

    /// True when no asset has any observation.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(BTreeMap::is_empty)
    }
}

/// One portfolio observation: end-of-period value plus the periodic return
/// when the producer supplies it directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPoint {
    /// Portfolio value at the date.
    pub value: f64,
    /// Periodic return supplied by the producer, if any. When absent or
    /// non-finite the engine derives the return from consecutive values.
    pub periodic_return: Option<f64>,
}

impl PortfolioPoint {
    /// Observation with a value only.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            periodic_return: None,
        }
    }

    /// Observation with both a value and a supplied periodic return.
    pub const fn with_return(value: f64, periodic_return: f64) -> Self {
        Self {
            value,
            periodic_return: Some(periodic_return),
        }
    }
}

/// Ordered portfolio observations: `date → (value, return?)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSeries {
    points: BTreeMap<NaiveDate, PortfolioPoint>,
}

impl PortfolioSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation at `date`, overwriting any prior one.
    pub fn insert(&mut self, date: NaiveDate, point: PortfolioPoint) {
        self.points.insert(date, point);
    }

    /// Record an observation stamped with time/timezone, normalized to its
    /// calendar date.
    pub fn insert_datetime(&mut self, stamp: DateTime<Utc>, point: PortfolioPoint) {
        self.insert(stamp.date_naive(), point);
    }

    /// The observation at `date`, if present.
    pub fn point(&self, date: NaiveDate) -> Option<PortfolioPoint> {
        self.points.get(&date).copied()
    }

    /// The series' date axis.
    pub fn date_axis(&self) -> BTreeSet<NaiveDate> {
        self.points.keys().copied().collect()
    }

    /// True when the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }
}
