//! Time alignment of portfolio, return, and weight series.
//!
//! Alignment restricts every input to the common intersection of their
//! date axes and to a shared asset universe, validating structure once at
//! this boundary so the engines downstream can assume well-formed tables.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{AlignmentError, Result};
use crate::series::{AssetId, PortfolioPoint, PortfolioSeries, ReturnSeries, WeightSeries};

/// Minimum number of common dates required to attribute anything.
pub const MIN_ALIGNED_DATES: usize = 5;

/// Return and weight tables restricted to common dates and assets.
///
/// Tables are date-major: each aligned date maps to the per-asset values
/// observed there. Per-asset gaps at an aligned date stay absent and are
/// coerced (and counted) only where consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    dates: Vec<NaiveDate>,
    assets: Vec<AssetId>,
    returns: BTreeMap<NaiveDate, BTreeMap<AssetId, f64>>,
    weights: BTreeMap<NaiveDate, BTreeMap<AssetId, f64>>,
}

impl AlignedPair {
    /// Aligned dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The shared asset universe, sorted.
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// The return of `asset` realized at `date`, if observed.
    pub fn asset_return(&self, date: NaiveDate, asset: &AssetId) -> Option<f64> {
        self.returns.get(&date).and_then(|row| row.get(asset)).copied()
    }

    /// The weight of `asset` recorded at `date`, if observed.
    pub fn weight(&self, date: NaiveDate, asset: &AssetId) -> Option<f64> {
        self.weights.get(&date).and_then(|row| row.get(asset)).copied()
    }
}

/// Portfolio, return, and weight series on a common date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedData {
    series: AlignedPair,
    portfolio: BTreeMap<NaiveDate, PortfolioPoint>,
}

impl AlignedData {
    /// Aligned dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        self.series.dates()
    }

    /// The shared asset universe, sorted.
    pub fn assets(&self) -> &[AssetId] {
        self.series.assets()
    }

    /// The aligned return/weight tables.
    pub const fn series(&self) -> &AlignedPair {
        &self.series
    }

    /// The portfolio observation at an aligned date.
    pub fn portfolio_point(&self, date: NaiveDate) -> Option<PortfolioPoint> {
        self.portfolio.get(&date).copied()
    }
}

/// Align returns and weights onto their common dates and assets.
///
/// The date axis of each input is the union of its per-asset axes; the
/// aligned axis is the intersection of the two. The asset universe keeps
/// assets present in **both** inputs whose weight is usable (finite and
/// non-zero) on at least one aligned date.
///
/// # Errors
///
/// - [`AlignmentError::MalformedInput`] when an input has no dates at all
///   or no common asset universe can be formed.
/// - [`AlignmentError::InsufficientData`] when fewer than
///   [`MIN_ALIGNED_DATES`] common dates remain.
pub fn align_pair(returns: &ReturnSeries, weights: &WeightSeries) -> Result<AlignedPair> {
    build_pair(returns, weights, None)
}

/// Align a portfolio series together with returns and weights.
///
/// Same rules as [`align_pair`], with the portfolio's date axis joining
/// the intersection. All surviving values are preserved unchanged.
///
/// # Errors
///
/// As [`align_pair`], plus [`AlignmentError::MalformedInput`] when the
/// portfolio series is empty.
pub fn align(
    portfolio: &PortfolioSeries,
    returns: &ReturnSeries,
    weights: &WeightSeries,
) -> Result<AlignedData> {
    let portfolio_axis = portfolio.date_axis();
    if portfolio_axis.is_empty() {
        return Err(AlignmentError::MalformedInput {
            input: "portfolio".to_string(),
            reason: "no dated observations".to_string(),
        });
    }

    let series = build_pair(returns, weights, Some(&portfolio_axis))?;
    let portfolio_points = series
        .dates
        .iter()
        .filter_map(|&date| portfolio.point(date).map(|point| (date, point)))
        .collect();

    Ok(AlignedData {
        series,
        portfolio: portfolio_points,
    })
}

fn build_pair(
    returns: &ReturnSeries,
    weights: &WeightSeries,
    extra_axis: Option<&BTreeSet<NaiveDate>>,
) -> Result<AlignedPair> {
    let return_axis = returns.date_axis();
    if return_axis.is_empty() {
        return Err(AlignmentError::MalformedInput {
            input: "returns".to_string(),
            reason: "no dated observations".to_string(),
        });
    }
    let weight_axis = weights.date_axis();
    if weight_axis.is_empty() {
        return Err(AlignmentError::MalformedInput {
            input: "weights".to_string(),
            reason: "no dated observations".to_string(),
        });
    }

    let mut dates: BTreeSet<NaiveDate> =
        return_axis.intersection(&weight_axis).copied().collect();
    if let Some(axis) = extra_axis {
        dates = dates.intersection(axis).copied().collect();
    }
    if dates.len() < MIN_ALIGNED_DATES {
        return Err(AlignmentError::InsufficientData {
            required: MIN_ALIGNED_DATES,
            actual: dates.len(),
        });
    }

    let weight_assets: BTreeSet<&AssetId> = weights.assets().collect();
    let assets: Vec<AssetId> = returns
        .assets()
        .filter(|asset| weight_assets.contains(asset))
        .filter(|asset| {
            dates.iter().any(|&date| {
                weights
                    .value(asset, date)
                    .is_some_and(|w| w.is_finite() && w != 0.0)
            })
        })
        .cloned()
        .collect();
    if assets.is_empty() {
        return Err(AlignmentError::MalformedInput {
            input: "weights".to_string(),
            reason: "no common asset universe with returns (after zero/NaN weight filtering)"
                .to_string(),
        });
    }

    let mut return_table = BTreeMap::new();
    let mut weight_table = BTreeMap::new();
    for &date in &dates {
        let mut return_row = BTreeMap::new();
        let mut weight_row = BTreeMap::new();
        for asset in &assets {
            if let Some(value) = returns.value(asset, date) {
                return_row.insert(asset.clone(), value);
            }
            if let Some(value) = weights.value(asset, date) {
                weight_row.insert(asset.clone(), value);
            }
        }
        return_table.insert(date, return_row);
        weight_table.insert(date, weight_row);
    }

    Ok(AlignedPair {
        dates: dates.into_iter().collect(),
        assets,
        returns: return_table,
        weights: weight_table,
    })
}
