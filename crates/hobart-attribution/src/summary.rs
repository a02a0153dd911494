//! Window summaries: totals, reconciliation, and contributor rankings.

use chrono::NaiveDate;
use hobart_series::{AssetId, Granularity, mean, sample_std};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::record::AttributionRecord;

/// Number of assets reported in each of the top/bottom rankings.
const RANKING_LEN: usize = 5;

/// Per-asset rollup over a summarized window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBreakdown {
    /// Sum of the asset's price contributions.
    pub total_contribution: f64,
    /// Mean per-period price contribution.
    pub average_contribution: f64,
    /// Sample standard deviation of per-period contributions.
    pub contribution_volatility: f64,
    /// Sum of the asset's rebalancing impacts.
    pub total_rebalancing_impact: f64,
    /// Mean per-period rebalancing impact.
    pub average_rebalancing_impact: f64,
    /// Sample standard deviation of per-period rebalancing impacts.
    pub rebalancing_volatility: f64,
    /// Total contribution plus total rebalancing impact.
    pub net_impact: f64,
}

/// One entry of a top/bottom contributor ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAsset {
    /// The ranked asset.
    pub asset: AssetId,
    /// Its net impact over the window.
    pub net_impact: f64,
}

/// Summary of an attribution window at one granularity.
///
/// `total_portfolio_return` is the *additive* sum of per-record returns
/// (not compounded), so `attribution_accuracy` — the absolute gap between
/// it and the explained total — is a like-for-like reconciliation
/// diagnostic: near zero means the decomposition accounts for the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionSummary {
    /// Granularity of the summarized records.
    pub granularity: Granularity,
    /// Number of records summarized.
    pub periods: usize,
    /// First record date.
    pub period_start: NaiveDate,
    /// Last record date.
    pub period_end: NaiveDate,
    /// Sum of per-record total returns.
    pub total_portfolio_return: f64,
    /// Sum of all per-asset price contributions.
    pub total_asset_contribution: f64,
    /// Sum of all per-asset rebalancing impacts.
    pub total_rebalancing_impact: f64,
    /// `|total_portfolio_return − (contribution + rebalancing)|`.
    pub attribution_accuracy: f64,
    /// Per-asset rollups, sorted by asset.
    pub assets: BTreeMap<AssetId, AssetBreakdown>,
    /// Up to five best assets by net impact, best first.
    pub top_contributors: Vec<RankedAsset>,
    /// Up to five worst assets by net impact, worst first.
    pub bottom_contributors: Vec<RankedAsset>,
}

/// Summarize a window of records at one granularity.
///
/// Returns `None` for empty input — the structured "no data" result —
/// rather than an error or a summary full of zeros.
pub fn summarize(records: &[AttributionRecord]) -> Option<AttributionSummary> {
    let first = records.first()?;
    let last = records.last()?;

    let mut contributions: BTreeMap<&AssetId, Vec<f64>> = BTreeMap::new();
    let mut impacts: BTreeMap<&AssetId, Vec<f64>> = BTreeMap::new();
    for record in records {
        for (asset, value) in &record.asset_contributions {
            contributions.entry(asset).or_default().push(*value);
        }
        for (asset, value) in &record.rebalancing_impact {
            impacts.entry(asset).or_default().push(*value);
        }
    }

    let universe: Vec<&AssetId> = contributions
        .keys()
        .chain(impacts.keys())
        .copied()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let empty = Vec::new();
    let mut assets = BTreeMap::new();
    for asset in universe {
        let contribution_series = contributions.get(asset).unwrap_or(&empty);
        let impact_series = impacts.get(asset).unwrap_or(&empty);
        let total_contribution: f64 = contribution_series.iter().sum();
        let total_rebalancing_impact: f64 = impact_series.iter().sum();
        assets.insert(
            asset.clone(),
            AssetBreakdown {
                total_contribution,
                average_contribution: mean(contribution_series),
                contribution_volatility: sample_std(contribution_series),
                total_rebalancing_impact,
                average_rebalancing_impact: mean(impact_series),
                rebalancing_volatility: sample_std(impact_series),
                net_impact: total_contribution + total_rebalancing_impact,
            },
        );
    }

    let total_portfolio_return: f64 = records.iter().map(|r| r.total_return).sum();
    let total_asset_contribution: f64 = assets.values().map(|b| b.total_contribution).sum();
    let total_rebalancing_impact: f64 = assets.values().map(|b| b.total_rebalancing_impact).sum();
    let attribution_accuracy =
        (total_portfolio_return - (total_asset_contribution + total_rebalancing_impact)).abs();

    let mut ranked: Vec<RankedAsset> = assets
        .iter()
        .map(|(asset, breakdown)| RankedAsset {
            asset: asset.clone(),
            net_impact: breakdown.net_impact,
        })
        .collect();

    let mut top_contributors = ranked.clone();
    top_contributors.sort_by(|a, b| {
        b.net_impact
            .partial_cmp(&a.net_impact)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.asset.cmp(&b.asset))
    });
    top_contributors.truncate(RANKING_LEN);

    ranked.sort_by(|a, b| {
        a.net_impact
            .partial_cmp(&b.net_impact)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.asset.cmp(&b.asset))
    });
    ranked.truncate(RANKING_LEN);

    Some(AttributionSummary {
        granularity: first.granularity,
        periods: records.len(),
        period_start: first.date,
        period_end: last.date,
        total_portfolio_return,
        total_asset_contribution,
        total_rebalancing_impact,
        attribution_accuracy,
        assets,
        top_contributors,
        bottom_contributors: ranked,
    })
}

impl AttributionSummary {
    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nAttribution Summary ({})\n", self.granularity));
        output.push_str(&format!(
            "Period: {} to {} ({} periods)\n",
            self.period_start, self.period_end, self.periods
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "  Total Portfolio Return:   {:.4}%\n",
            self.total_portfolio_return * 100.0
        ));
        output.push_str(&format!(
            "  Asset Contribution:       {:.4}%\n",
            self.total_asset_contribution * 100.0
        ));
        output.push_str(&format!(
            "  Rebalancing Impact:       {:.4}%\n",
            self.total_rebalancing_impact * 100.0
        ));
        output.push_str(&format!(
            "  Reconciliation Gap:       {:.6}%\n",
            self.attribution_accuracy * 100.0
        ));

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<12} {:>14} {:>14} {:>14} {:>14}\n",
            "Asset", "Contribution", "Volatility", "Rebalancing", "Net Impact"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');
        for (asset, breakdown) in &self.assets {
            output.push_str(&format!(
                "{:<12} {:>13.4}% {:>13.4}% {:>13.4}% {:>13.4}%\n",
                asset.as_str(),
                breakdown.total_contribution * 100.0,
                breakdown.contribution_volatility * 100.0,
                breakdown.total_rebalancing_impact * 100.0,
                breakdown.net_impact * 100.0
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str("Top contributors: ");
        output.push_str(&render_ranking(&self.top_contributors));
        output.push_str("\nBottom contributors: ");
        output.push_str(&render_ranking(&self.bottom_contributors));
        output.push('\n');
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output
    }
}

fn render_ranking(ranking: &[RankedAsset]) -> String {
    ranking
        .iter()
        .map(|entry| format!("{} ({:.4}%)", entry.asset, entry.net_impact * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for AttributionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Attribution summary ({}, {} to {}):",
            self.granularity, self.period_start, self.period_end
        )?;
        writeln!(
            f,
            "  Total Return: {:.4}%",
            self.total_portfolio_return * 100.0
        )?;
        writeln!(
            f,
            "  Contribution: {:.4}%",
            self.total_asset_contribution * 100.0
        )?;
        writeln!(
            f,
            "  Rebalancing: {:.4}%",
            self.total_rebalancing_impact * 100.0
        )?;
        writeln!(
            f,
            "  Reconciliation Gap: {:.6}%",
            self.attribution_accuracy * 100.0
        )?;
        Ok(())
    }
}
