//! Daily asset-level attribution over aligned series.
//!
//! Weighting is beginning-of-period: each period (prev, curr) applies the
//! weights recorded at `prev` to the returns realized at `curr`, so no
//! period ever sees information from its own close.

use std::collections::BTreeMap;

use hobart_series::{
    AlignedData, AnomalyReason, Granularity, NumericAnomaly, coerce_finite, safe_divide,
};
use serde::{Deserialize, Serialize};

use crate::record::AttributionRecord;

/// Daily records plus the trail of coerced values that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAttribution {
    /// One record per usable consecutive date pair, ascending.
    pub records: Vec<AttributionRecord>,
    /// Every value that had to be coerced to zero, deduplicated and sorted.
    pub anomalies: Vec<NumericAnomaly>,
}

/// Decompose each aligned period's return into per-asset contributions.
///
/// For every consecutive date pair the portfolio's supplied return is used
/// when finite, otherwise the return is derived from consecutive values;
/// when neither is usable the period is skipped and a portfolio-level
/// anomaly is recorded. A corrupt value for one asset is coerced to zero
/// (and recorded) without invalidating the rest of the period.
pub fn compute_daily(aligned: &AlignedData) -> DailyAttribution {
    let mut records = Vec::new();
    let mut anomalies = Vec::new();

    for window in aligned.dates().windows(2) {
        let (prev, curr) = (window[0], window[1]);

        let total_return = match period_total_return(aligned, prev, curr) {
            Ok(value) => value,
            Err(reason) => {
                anomalies.push(NumericAnomaly {
                    date: curr,
                    asset: None,
                    reason,
                });
                continue;
            }
        };

        let series = aligned.series();
        let mut asset_contributions = BTreeMap::new();
        let mut rebalancing_impact = BTreeMap::new();
        let mut weight_change_impact = 0.0;

        for asset in aligned.assets() {
            let (weight_prev, weight_prev_anomaly) = coerce_finite(series.weight(prev, asset));
            if let Some(reason) = weight_prev_anomaly {
                anomalies.push(NumericAnomaly {
                    date: prev,
                    asset: Some(asset.clone()),
                    reason,
                });
            }
            let (asset_return, return_anomaly) = coerce_finite(series.asset_return(curr, asset));
            if let Some(reason) = return_anomaly {
                anomalies.push(NumericAnomaly {
                    date: curr,
                    asset: Some(asset.clone()),
                    reason,
                });
            }
            let (weight_curr, weight_curr_anomaly) = coerce_finite(series.weight(curr, asset));
            if let Some(reason) = weight_curr_anomaly {
                anomalies.push(NumericAnomaly {
                    date: curr,
                    asset: Some(asset.clone()),
                    reason,
                });
            }

            asset_contributions.insert(asset.clone(), weight_prev * asset_return);
            let impact = (weight_curr - weight_prev) * asset_return;
            rebalancing_impact.insert(asset.clone(), impact);
            weight_change_impact += impact;
        }

        records.push(AttributionRecord {
            date: curr,
            total_return,
            asset_contributions,
            rebalancing_impact,
            weight_change_impact,
            granularity: Granularity::Daily,
        });
    }

    // The same underlying gap can be observed as both a period's current
    // weight and the next period's prior weight.
    anomalies.sort_unstable();
    anomalies.dedup();

    DailyAttribution { records, anomalies }
}

/// The portfolio's return over (prev, curr]: supplied if finite, otherwise
/// derived from consecutive values.
fn period_total_return(
    aligned: &AlignedData,
    prev: chrono::NaiveDate,
    curr: chrono::NaiveDate,
) -> Result<f64, AnomalyReason> {
    let Some(point) = aligned.portfolio_point(curr) else {
        return Err(AnomalyReason::Missing);
    };
    if let Some(supplied) = point.periodic_return {
        if supplied.is_finite() {
            return Ok(supplied);
        }
    }
    let Some(prev_point) = aligned.portfolio_point(prev) else {
        return Err(AnomalyReason::Missing);
    };
    safe_divide(point.value, prev_point.value)
        .map(|ratio| ratio - 1.0)
        .ok_or(AnomalyReason::NotFinite)
}
