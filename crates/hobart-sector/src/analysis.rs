//! End-to-end sector attribution over raw input series.

use hobart_series::{Granularity, NumericAnomaly, ReturnSeries, Result, WeightSeries, align_pair};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::config::{BenchmarkWeights, SectorMap};
use crate::engine::{SectorAttributionRecord, compute_daily};
use crate::summary::{SectorAttributionSummary, summarize};

/// Sector records and summary at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAttributionReport {
    /// Granularity the records were produced at.
    pub granularity: Granularity,
    /// One record per (period, sector), ascending by date then sector.
    pub records: Vec<SectorAttributionRecord>,
    /// Window summary, absent when no records were produced.
    pub summary: Option<SectorAttributionSummary>,
    /// Values coerced during the daily computation.
    pub anomalies: Vec<NumericAnomaly>,
}

/// Align weights and returns, then attribute per sector versus the
/// configured benchmark at the requested granularity.
///
/// The underlying computation is always daily; coarser granularities are
/// aggregations of it. Sector membership and benchmark weights are read
/// as-is and never mutated.
///
/// # Errors
///
/// Propagates [`hobart_series::AlignmentError`] from alignment; once the
/// inputs align, attribution itself cannot fail.
pub fn compute_sector_attribution(
    weights: &WeightSeries,
    returns: &ReturnSeries,
    sector_map: &SectorMap,
    benchmark_weights: &BenchmarkWeights,
    granularity: Granularity,
) -> Result<SectorAttributionReport> {
    let aligned = align_pair(returns, weights)?;
    let daily = compute_daily(&aligned, sector_map, benchmark_weights);
    let records = aggregate(&daily.records, granularity);
    let summary = summarize(&records);

    Ok(SectorAttributionReport {
        granularity,
        records,
        summary,
        anomalies: daily.anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hobart_series::AlignmentError;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    fn inputs() -> (ReturnSeries, WeightSeries, SectorMap, BenchmarkWeights) {
        let mut returns = ReturnSeries::new();
        let mut weights = WeightSeries::new();
        for day in [2, 3, 4, 5, 6, 9] {
            returns.insert("AAPL", d(day), 0.01);
            returns.insert("TLT", d(day), 0.004);
            weights.insert("AAPL", d(day), 0.6);
            weights.insert("TLT", d(day), 0.4);
        }
        let sector_map: SectorMap = [("AAPL", "Tech"), ("TLT", "Bonds")].into_iter().collect();
        let benchmark: BenchmarkWeights = [("Tech", 0.5), ("Bonds", 0.5)].into_iter().collect();
        (returns, weights, sector_map, benchmark)
    }

    #[test]
    fn test_daily_report() {
        let (returns, weights, sector_map, benchmark) = inputs();
        let report = compute_sector_attribution(
            &weights,
            &returns,
            &sector_map,
            &benchmark,
            Granularity::Daily,
        )
        .unwrap();

        assert_eq!(report.granularity, Granularity::Daily);
        assert_eq!(report.records.len(), 2 * 5);
        let summary = report.summary.unwrap();
        assert_eq!(summary.periods, 5);
        assert!(report.anomalies.is_empty());
    }

    #[test]
    fn test_weekly_report() {
        let (returns, weights, sector_map, benchmark) = inputs();
        let report = compute_sector_attribution(
            &weights,
            &returns,
            &sector_map,
            &benchmark,
            Granularity::Weekly,
        )
        .unwrap();

        // Two ISO weeks, two sectors each.
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.summary.unwrap().periods, 2);
    }

    #[test]
    fn test_alignment_error_propagates() {
        let (returns, _, sector_map, benchmark) = inputs();
        let err = compute_sector_attribution(
            &WeightSeries::new(),
            &returns,
            &sector_map,
            &benchmark,
            Granularity::Daily,
        )
        .unwrap_err();
        assert!(matches!(err, AlignmentError::MalformedInput { .. }));
    }
}
