//! Sector classification and benchmark configuration.
//!
//! Both types are plain immutable configuration injected into the engine:
//! the engine reads them and never mutates or derives them from portfolio
//! state, so a classification change can never leak from one computation
//! into the next.

use derive_more::{Display, From, Into};
use hobart_series::AssetId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the bucket that collects assets without a sector mapping.
pub const OTHER_SECTOR: &str = "Other";

/// A sector label.
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
pub struct Sector(String);

impl Sector {
    /// Create a sector label from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The catch-all bucket for unmapped assets.
    pub fn other() -> Self {
        Self(OTHER_SECTOR.to_string())
    }
}

impl From<&str> for Sector {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

/// Immutable asset → sector classification.
///
/// Lookups for unmapped assets resolve to [`Sector::other`], so every
/// asset in the aligned universe lands in exactly one bucket and totals
/// stay complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorMap {
    assignments: BTreeMap<AssetId, Sector>,
}

impl SectorMap {
    /// Create an empty classification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `asset` to `sector`, replacing any prior assignment.
    pub fn assign(&mut self, asset: impl Into<AssetId>, sector: impl Into<Sector>) {
        self.assignments.insert(asset.into(), sector.into());
    }

    /// The sector of `asset`, falling back to [`Sector::other`].
    pub fn sector_of(&self, asset: &AssetId) -> Sector {
        self.assignments
            .get(asset)
            .cloned()
            .unwrap_or_else(Sector::other)
    }

    /// Number of explicit assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// True when no assignments exist.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl<A: Into<AssetId>, S: Into<Sector>> FromIterator<(A, S)> for SectorMap {
    fn from_iter<I: IntoIterator<Item = (A, S)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (asset, sector) in iter {
            map.assign(asset, sector);
        }
        map
    }
}

/// Exogenous benchmark sector weights.
///
/// A constant supplied by configuration, never derived from the portfolio.
/// Sectors absent from the table weigh zero in the benchmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkWeights {
    weights: BTreeMap<Sector, f64>,
}

impl BenchmarkWeights {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the benchmark weight of `sector`.
    pub fn set(&mut self, sector: impl Into<Sector>, weight: f64) {
        self.weights.insert(sector.into(), weight);
    }

    /// The benchmark weight of `sector`, zero when unconfigured.
    pub fn weight(&self, sector: &Sector) -> f64 {
        self.weights.get(sector).copied().unwrap_or(0.0)
    }

    /// Configured (sector, weight) pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&Sector, f64)> {
        self.weights.iter().map(|(sector, &weight)| (sector, weight))
    }

    /// Sum of configured weights.
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }
}

impl<S: Into<Sector>> FromIterator<(S, f64)> for BenchmarkWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut weights = Self::new();
        for (sector, weight) in iter {
            weights.set(sector, weight);
        }
        weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_asset_falls_into_other() {
        let map: SectorMap = [("SP500", "US Equity"), ("TLT", "Fixed Income")]
            .into_iter()
            .collect();
        assert_eq!(map.sector_of(&AssetId::from("SP500")), Sector::from("US Equity"));
        assert_eq!(map.sector_of(&AssetId::from("GLD")), Sector::other());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_reassignment_replaces() {
        let mut map = SectorMap::new();
        map.assign("GLD", "Other");
        map.assign("GLD", "Commodities");
        assert_eq!(map.sector_of(&AssetId::from("GLD")), Sector::from("Commodities"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_benchmark_weight_lookup() {
        let weights: BenchmarkWeights =
            [("US Equity", 0.6), ("Fixed Income", 0.4)].into_iter().collect();
        assert_eq!(weights.weight(&Sector::from("US Equity")), 0.6);
        assert_eq!(weights.weight(&Sector::from("Commodities")), 0.0);
        assert!((weights.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let weights: BenchmarkWeights =
            [("Zeta", 0.1), ("Alpha", 0.9)].into_iter().collect();
        let order: Vec<&str> = weights.iter().map(|(sector, _)| sector.as_str()).collect();
        assert_eq!(order, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn test_sector_display() {
        assert_eq!(Sector::from("US Equity").to_string(), "US Equity");
        assert_eq!(Sector::other().as_str(), OTHER_SECTOR);
    }
}
