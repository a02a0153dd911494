//! Sector-level window summaries and rankings.

use chrono::NaiveDate;
use hobart_series::{mean, sample_std};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::config::Sector;
use crate::engine::SectorAttributionRecord;

/// Number of sectors reported in each of the top/bottom rankings.
const RANKING_LEN: usize = 5;

/// Per-sector rollup over a summarized window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBreakdown {
    /// Sum of the sector's allocation effects.
    pub total_allocation: f64,
    /// Sum of the sector's selection effects.
    pub total_selection: f64,
    /// Sum of the sector's interaction effects.
    pub total_interaction: f64,
    /// Sum of the sector's total effects.
    pub total_effect: f64,
    /// Mean per-period total effect.
    pub average_effect: f64,
    /// Sample standard deviation of per-period total effects.
    pub effect_volatility: f64,
    /// Mean portfolio weight over the window.
    pub average_portfolio_weight: f64,
    /// Mean benchmark weight over the window.
    pub average_benchmark_weight: f64,
}

/// One entry of a top/bottom sector ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSector {
    /// The ranked sector.
    pub sector: Sector,
    /// Its total effect over the window.
    pub total_effect: f64,
}

/// Summary of a sector attribution window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAttributionSummary {
    /// Number of distinct periods summarized.
    pub periods: usize,
    /// First record date.
    pub period_start: NaiveDate,
    /// Last record date.
    pub period_end: NaiveDate,
    /// Sum of allocation effects across sectors and periods.
    pub total_allocation_effect: f64,
    /// Sum of selection effects across sectors and periods.
    pub total_selection_effect: f64,
    /// Sum of interaction effects across sectors and periods.
    pub total_interaction_effect: f64,
    /// Sum of total effects — the window's explained active result.
    pub total_active_effect: f64,
    /// Per-sector rollups, sorted by sector.
    pub sectors: BTreeMap<Sector, SectorBreakdown>,
    /// Up to five best sectors by total effect, best first.
    pub top_sectors: Vec<RankedSector>,
    /// Up to five worst sectors by total effect, worst first.
    pub bottom_sectors: Vec<RankedSector>,
}

/// Summarize a window of sector records.
///
/// Returns `None` for empty input — the structured "no data" result.
pub fn summarize(records: &[SectorAttributionRecord]) -> Option<SectorAttributionSummary> {
    let first = records.first()?;
    let last = records.last()?;

    let mut by_sector: BTreeMap<&Sector, Vec<&SectorAttributionRecord>> = BTreeMap::new();
    for record in records {
        by_sector.entry(&record.sector).or_default().push(record);
    }

    let mut sectors = BTreeMap::new();
    for (sector, rows) in &by_sector {
        let effects: Vec<f64> = rows.iter().map(|r| r.total_effect).collect();
        let portfolio_weights: Vec<f64> = rows.iter().map(|r| r.portfolio_weight).collect();
        let benchmark_weights: Vec<f64> = rows.iter().map(|r| r.benchmark_weight).collect();
        sectors.insert(
            (*sector).clone(),
            SectorBreakdown {
                total_allocation: rows.iter().map(|r| r.allocation_effect).sum(),
                total_selection: rows.iter().map(|r| r.selection_effect).sum(),
                total_interaction: rows.iter().map(|r| r.interaction_effect).sum(),
                total_effect: effects.iter().sum(),
                average_effect: mean(&effects),
                effect_volatility: sample_std(&effects),
                average_portfolio_weight: mean(&portfolio_weights),
                average_benchmark_weight: mean(&benchmark_weights),
            },
        );
    }

    let total_allocation_effect: f64 = sectors.values().map(|b| b.total_allocation).sum();
    let total_selection_effect: f64 = sectors.values().map(|b| b.total_selection).sum();
    let total_interaction_effect: f64 = sectors.values().map(|b| b.total_interaction).sum();
    let total_active_effect: f64 = sectors.values().map(|b| b.total_effect).sum();

    let mut ranked: Vec<RankedSector> = sectors
        .iter()
        .map(|(sector, breakdown)| RankedSector {
            sector: sector.clone(),
            total_effect: breakdown.total_effect,
        })
        .collect();

    let mut top_sectors = ranked.clone();
    top_sectors.sort_by(|a, b| {
        b.total_effect
            .partial_cmp(&a.total_effect)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    top_sectors.truncate(RANKING_LEN);

    ranked.sort_by(|a, b| {
        a.total_effect
            .partial_cmp(&b.total_effect)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    ranked.truncate(RANKING_LEN);

    let periods = records.iter().map(|r| r.date).collect::<BTreeSet<_>>().len();

    Some(SectorAttributionSummary {
        periods,
        period_start: first.date,
        period_end: last.date,
        total_allocation_effect,
        total_selection_effect,
        total_interaction_effect,
        total_active_effect,
        sectors,
        top_sectors,
        bottom_sectors: ranked,
    })
}

impl SectorAttributionSummary {
    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str("\nSector Attribution Summary\n");
        output.push_str(&format!(
            "Period: {} to {} ({} periods)\n",
            self.period_start, self.period_end, self.periods
        ));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "  Allocation Effect:   {:.4}%\n",
            self.total_allocation_effect * 100.0
        ));
        output.push_str(&format!(
            "  Selection Effect:    {:.4}%\n",
            self.total_selection_effect * 100.0
        ));
        output.push_str(&format!(
            "  Interaction Effect:  {:.4}%\n",
            self.total_interaction_effect * 100.0
        ));
        output.push_str(&format!(
            "  Total Active Effect: {:.4}%\n",
            self.total_active_effect * 100.0
        ));

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>10} {:>10} {:>12} {:>12} {:>10}\n",
            "Sector", "Avg Wp", "Avg Wb", "Allocation", "Selection", "Total"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');
        for (sector, breakdown) in &self.sectors {
            output.push_str(&format!(
                "{:<20} {:>9.2}% {:>9.2}% {:>11.4}% {:>11.4}% {:>9.4}%\n",
                sector.as_str(),
                breakdown.average_portfolio_weight * 100.0,
                breakdown.average_benchmark_weight * 100.0,
                breakdown.total_allocation * 100.0,
                breakdown.total_selection * 100.0,
                breakdown.total_effect * 100.0
            ));
        }
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output
    }
}

impl fmt::Display for SectorAttributionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sector attribution summary ({} to {}):",
            self.period_start, self.period_end
        )?;
        writeln!(
            f,
            "  Allocation: {:.4}%",
            self.total_allocation_effect * 100.0
        )?;
        writeln!(f, "  Selection: {:.4}%", self.total_selection_effect * 100.0)?;
        writeln!(
            f,
            "  Interaction: {:.4}%",
            self.total_interaction_effect * 100.0
        )?;
        writeln!(f, "  Total: {:.4}%", self.total_active_effect * 100.0)?;
        Ok(())
    }
}
