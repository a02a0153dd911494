//! Rolling daily records up to weekly/monthly granularity.

use std::collections::BTreeMap;

use hobart_series::{AssetId, Granularity, PeriodKey, compound};

use crate::record::AttributionRecord;

/// Bucket daily records into the target granularity.
///
/// Total returns compound within a bucket (`Π(1+r) − 1`); per-asset
/// contributions, rebalancing impacts, and the weight-change impact sum
/// linearly. The two conventions diverge over multi-day buckets — that gap
/// is deliberate and shows up in the summary's `attribution_accuracy`.
/// Each emitted record carries the last date observed in its bucket; empty
/// buckets emit nothing. `Daily` re-tags the input unchanged.
pub fn aggregate(daily: &[AttributionRecord], granularity: Granularity) -> Vec<AttributionRecord> {
    if granularity == Granularity::Daily {
        return daily
            .iter()
            .cloned()
            .map(|mut record| {
                record.granularity = Granularity::Daily;
                record
            })
            .collect();
    }

    let mut buckets: BTreeMap<PeriodKey, Vec<&AttributionRecord>> = BTreeMap::new();
    for record in daily {
        buckets
            .entry(granularity.key_for(record.date))
            .or_default()
            .push(record);
    }

    buckets
        .into_values()
        .filter_map(|bucket| combine(&bucket, granularity))
        .collect()
}

fn combine(bucket: &[&AttributionRecord], granularity: Granularity) -> Option<AttributionRecord> {
    let last = bucket.last()?;

    let total_return = compound(bucket.iter().map(|record| record.total_return));

    let mut asset_contributions: BTreeMap<AssetId, f64> = BTreeMap::new();
    let mut rebalancing_impact: BTreeMap<AssetId, f64> = BTreeMap::new();
    let mut weight_change_impact = 0.0;
    for record in bucket {
        for (asset, value) in &record.asset_contributions {
            *asset_contributions.entry(asset.clone()).or_insert(0.0) += value;
        }
        for (asset, value) in &record.rebalancing_impact {
            *rebalancing_impact.entry(asset.clone()).or_insert(0.0) += value;
        }
        weight_change_impact += record.weight_change_impact;
    }

    Some(AttributionRecord {
        date: last.date,
        total_return,
        asset_contributions,
        rebalancing_impact,
        weight_change_impact,
        granularity,
    })
}
