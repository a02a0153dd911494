//! Daily Brinson decomposition over aligned series.
//!
//! Each period uses the **prior** date's weights (beginning-of-period
//! convention, matching the asset-level engine) and the current date's
//! returns. The benchmark's sector return is proxied by the equal-weight
//! average of the sector's constituent returns.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hobart_series::{AlignedPair, AssetId, NumericAnomaly, coerce_finite, safe_divide};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{BenchmarkWeights, Sector, SectorMap};

/// One period's Brinson decomposition for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAttributionRecord {
    /// Period end date (the date the returns were realized).
    pub date: NaiveDate,
    /// The sector this row describes.
    pub sector: Sector,
    /// Portfolio weight of the sector going into the period.
    pub portfolio_weight: f64,
    /// Configured benchmark weight of the sector.
    pub benchmark_weight: f64,
    /// Weighted average return of the sector's holdings.
    pub portfolio_return: f64,
    /// Equal-weight proxy benchmark return of the sector.
    pub benchmark_return: f64,
    /// `(wp − wb) · rb` — impact of over/under-weighting the sector.
    pub allocation_effect: f64,
    /// `wb · (rp − rb)` — impact of security selection within the sector.
    pub selection_effect: f64,
    /// `(wp − wb) · (rp − rb)` — the cross term.
    pub interaction_effect: f64,
    /// Sum of the three effects.
    pub total_effect: f64,
}

impl SectorAttributionRecord {
    /// The active contribution `wp·rp − wb·rb`.
    ///
    /// Algebraically identical to `total_effect`; the two are computed
    /// independently so tests can assert the Brinson identity holds.
    pub fn active_contribution(&self) -> f64 {
        self.portfolio_weight * self.portfolio_return
            - self.benchmark_weight * self.benchmark_return
    }
}

impl fmt::Display for SectorAttributionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: allocation {:.4}%, selection {:.4}%, interaction {:.4}%, total {:.4}%",
            self.date,
            self.sector,
            self.allocation_effect * 100.0,
            self.selection_effect * 100.0,
            self.interaction_effect * 100.0,
            self.total_effect * 100.0
        )
    }
}

/// Daily sector records plus the trail of coerced values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySectorAttribution {
    /// One record per (period, sector), ascending by date then sector.
    pub records: Vec<SectorAttributionRecord>,
    /// Every value that had to be coerced to zero, deduplicated and sorted.
    pub anomalies: Vec<NumericAnomaly>,
}

/// Decompose each aligned period into per-sector Brinson effects.
///
/// Sectors are derived from the aligned asset universe under the map;
/// unmapped assets attribute to the [`Sector::other`] bucket so the sum of
/// sector rows accounts for the whole book. A sector with zero prior
/// weight reports a zero portfolio return rather than dividing by zero.
pub fn compute_daily(
    aligned: &AlignedPair,
    sector_map: &SectorMap,
    benchmark: &BenchmarkWeights,
) -> DailySectorAttribution {
    let mut sectors: BTreeMap<Sector, Vec<&AssetId>> = BTreeMap::new();
    for asset in aligned.assets() {
        sectors.entry(sector_map.sector_of(asset)).or_default().push(asset);
    }

    let mut records = Vec::new();
    let mut anomalies = Vec::new();

    for window in aligned.dates().windows(2) {
        let (prev, curr) = (window[0], window[1]);

        for (sector, assets) in &sectors {
            let mut portfolio_weight = 0.0;
            let mut weighted_return = 0.0;
            let mut return_sum = 0.0;

            for asset in assets {
                let (weight, weight_anomaly) = coerce_finite(aligned.weight(prev, asset));
                if let Some(reason) = weight_anomaly {
                    anomalies.push(NumericAnomaly {
                        date: prev,
                        asset: Some((*asset).clone()),
                        reason,
                    });
                }
                let (asset_return, return_anomaly) =
                    coerce_finite(aligned.asset_return(curr, asset));
                if let Some(reason) = return_anomaly {
                    anomalies.push(NumericAnomaly {
                        date: curr,
                        asset: Some((*asset).clone()),
                        reason,
                    });
                }

                portfolio_weight += weight;
                weighted_return += weight * asset_return;
                return_sum += asset_return;
            }

            let portfolio_return = safe_divide(weighted_return, portfolio_weight).unwrap_or(0.0);
            let benchmark_return = safe_divide(return_sum, assets.len() as f64).unwrap_or(0.0);
            let benchmark_weight = benchmark.weight(sector);

            let allocation_effect = (portfolio_weight - benchmark_weight) * benchmark_return;
            let selection_effect = benchmark_weight * (portfolio_return - benchmark_return);
            let interaction_effect =
                (portfolio_weight - benchmark_weight) * (portfolio_return - benchmark_return);

            records.push(SectorAttributionRecord {
                date: curr,
                sector: sector.clone(),
                portfolio_weight,
                benchmark_weight,
                portfolio_return,
                benchmark_return,
                allocation_effect,
                selection_effect,
                interaction_effect,
                total_effect: allocation_effect + selection_effect + interaction_effect,
            });
        }
    }

    anomalies.sort_unstable();
    anomalies.dedup();

    DailySectorAttribution { records, anomalies }
}
