//! End-to-end asset attribution over raw input series.

use std::collections::BTreeMap;

use hobart_series::{
    Granularity, NumericAnomaly, PortfolioSeries, ReturnSeries, Result, WeightSeries, align,
};
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate;
use crate::engine::compute_daily;
use crate::record::AttributionRecord;
use crate::summary::{AttributionSummary, summarize};

/// Records and summaries per requested granularity.
///
/// A granularity with no records carries no summary entry; callers can
/// tell "no data" apart from "data that reconciles poorly" by checking
/// `summaries` versus `attribution_accuracy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAttributionReport {
    /// Attribution records per granularity, ascending by date.
    pub records: BTreeMap<Granularity, Vec<AttributionRecord>>,
    /// Window summaries for granularities that produced records.
    pub summaries: BTreeMap<Granularity, AttributionSummary>,
    /// Values coerced during the daily computation.
    pub anomalies: Vec<NumericAnomaly>,
}

/// Align the inputs and attribute at each requested granularity.
///
/// Duplicate granularities are computed once. The underlying computation
/// is always daily; coarser granularities are aggregations of it.
///
/// # Errors
///
/// Propagates [`hobart_series::AlignmentError`] from alignment; once the
/// inputs align, attribution itself cannot fail.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hobart_attribution::compute_asset_attribution;
/// use hobart_series::{Granularity, PortfolioPoint, PortfolioSeries, ReturnSeries, WeightSeries};
///
/// let mut portfolio = PortfolioSeries::new();
/// let mut returns = ReturnSeries::new();
/// let mut weights = WeightSeries::new();
/// for day in 2..=6 {
///     let date = NaiveDate::from_ymd_opt(2024, 9, day).unwrap();
///     portfolio.insert(date, PortfolioPoint::with_return(100_000.0, 0.0076));
///     returns.insert("SP500", date, 0.01);
///     weights.insert("SP500", date, 1.0);
/// }
///
/// let report =
///     compute_asset_attribution(&portfolio, &returns, &weights, &[Granularity::Daily]).unwrap();
/// assert_eq!(report.records[&Granularity::Daily].len(), 4);
/// ```
pub fn compute_asset_attribution(
    portfolio: &PortfolioSeries,
    returns: &ReturnSeries,
    weights: &WeightSeries,
    granularities: &[Granularity],
) -> Result<AssetAttributionReport> {
    let aligned = align(portfolio, returns, weights)?;
    let daily = compute_daily(&aligned);

    let mut records = BTreeMap::new();
    let mut summaries = BTreeMap::new();
    for &granularity in granularities {
        if records.contains_key(&granularity) {
            continue;
        }
        let series = aggregate(&daily.records, granularity);
        if let Some(summary) = summarize(&series) {
            summaries.insert(granularity, summary);
        }
        records.insert(granularity, series);
    }

    Ok(AssetAttributionReport {
        records,
        summaries,
        anomalies: daily.anomalies,
    })
}
