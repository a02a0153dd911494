//! Rolling daily sector records up to weekly/monthly granularity.

use std::collections::BTreeMap;

use hobart_series::{Granularity, PeriodKey, compound, mean};

use crate::config::Sector;
use crate::engine::SectorAttributionRecord;

/// Bucket daily sector records into the target granularity.
///
/// Within a bucket, weights average arithmetically, returns compound, and
/// the three effects sum linearly — the same additive convention as the
/// asset-level aggregator, with the same documented approximation. Each
/// emitted record carries the last date observed in its bucket; `Daily`
/// returns the input unchanged.
pub fn aggregate(
    daily: &[SectorAttributionRecord],
    granularity: Granularity,
) -> Vec<SectorAttributionRecord> {
    if granularity == Granularity::Daily {
        return daily.to_vec();
    }

    let mut buckets: BTreeMap<(PeriodKey, Sector), Vec<&SectorAttributionRecord>> =
        BTreeMap::new();
    for record in daily {
        buckets
            .entry((granularity.key_for(record.date), record.sector.clone()))
            .or_default()
            .push(record);
    }

    buckets.into_values().filter_map(|bucket| combine(&bucket)).collect()
}

fn combine(bucket: &[&SectorAttributionRecord]) -> Option<SectorAttributionRecord> {
    let last = bucket.last()?;

    let portfolio_weights: Vec<f64> = bucket.iter().map(|r| r.portfolio_weight).collect();
    let benchmark_weights: Vec<f64> = bucket.iter().map(|r| r.benchmark_weight).collect();
    let allocation_effect: f64 = bucket.iter().map(|r| r.allocation_effect).sum();
    let selection_effect: f64 = bucket.iter().map(|r| r.selection_effect).sum();
    let interaction_effect: f64 = bucket.iter().map(|r| r.interaction_effect).sum();
    let total_effect: f64 = bucket.iter().map(|r| r.total_effect).sum();

    Some(SectorAttributionRecord {
        date: last.date,
        sector: last.sector.clone(),
        portfolio_weight: mean(&portfolio_weights),
        benchmark_weight: mean(&benchmark_weights),
        portfolio_return: compound(bucket.iter().map(|r| r.portfolio_return)),
        benchmark_return: compound(bucket.iter().map(|r| r.benchmark_return)),
        allocation_effect,
        selection_effect,
        interaction_effect,
        total_effect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn record(date: NaiveDate, sector: &str, wp: f64, rp: f64) -> SectorAttributionRecord {
        let wb = 0.3;
        let rb = rp / 2.0;
        let allocation_effect = (wp - wb) * rb;
        let selection_effect = wb * (rp - rb);
        let interaction_effect = (wp - wb) * (rp - rb);
        SectorAttributionRecord {
            date,
            sector: Sector::from(sector),
            portfolio_weight: wp,
            benchmark_weight: wb,
            portfolio_return: rp,
            benchmark_return: rb,
            allocation_effect,
            selection_effect,
            interaction_effect,
            total_effect: allocation_effect + selection_effect + interaction_effect,
        }
    }

    #[test]
    fn test_weekly_bucket_averages_weights_and_compounds_returns() {
        // Mon..Wed of one ISO week.
        let daily = vec![
            record(d(9, 2), "Tech", 0.5, 0.02),
            record(d(9, 3), "Tech", 0.6, 0.01),
            record(d(9, 4), "Tech", 0.4, -0.01),
        ];
        let weekly = aggregate(&daily, Granularity::Weekly);

        assert_eq!(weekly.len(), 1);
        let week = &weekly[0];
        assert_eq!(week.date, d(9, 4));
        assert_abs_diff_eq!(week.portfolio_weight, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(week.benchmark_weight, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(
            week.portfolio_return,
            1.02 * 1.01 * 0.99 - 1.0,
            epsilon = 1e-12
        );
        let expected_total: f64 = daily.iter().map(|r| r.total_effect).sum();
        assert_abs_diff_eq!(week.total_effect, expected_total, epsilon = 1e-12);
    }

    #[test]
    fn test_sectors_bucket_independently() {
        let daily = vec![
            record(d(9, 2), "Tech", 0.5, 0.02),
            record(d(9, 2), "Bonds", 0.5, 0.001),
            record(d(9, 3), "Tech", 0.5, 0.01),
            record(d(9, 3), "Bonds", 0.5, 0.002),
        ];
        let weekly = aggregate(&daily, Granularity::Weekly);
        assert_eq!(weekly.len(), 2);
        // Buckets come out ordered by period then sector.
        assert_eq!(weekly[0].sector, Sector::from("Bonds"));
        assert_eq!(weekly[1].sector, Sector::from("Tech"));
    }

    #[test]
    fn test_monthly_split() {
        let daily = vec![
            record(d(9, 30), "Tech", 0.5, 0.02),
            record(d(10, 1), "Tech", 0.5, 0.01),
        ];
        let monthly = aggregate(&daily, Granularity::Monthly);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].date, d(9, 30));
        assert_eq!(monthly[1].date, d(10, 1));
    }

    #[test]
    fn test_daily_is_identity() {
        let daily = vec![record(d(9, 2), "Tech", 0.5, 0.02)];
        assert_eq!(aggregate(&daily, Granularity::Daily), daily);
    }

    #[rstest]
    #[case(Granularity::Daily)]
    #[case(Granularity::Weekly)]
    #[case(Granularity::Monthly)]
    fn test_empty_input_emits_nothing(#[case] granularity: Granularity) {
        assert!(aggregate(&[], granularity).is_empty());
    }
}
