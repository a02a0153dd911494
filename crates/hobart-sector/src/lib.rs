#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod engine;
pub mod summary;

pub use aggregate::aggregate;
pub use analysis::{SectorAttributionReport, compute_sector_attribution};
pub use config::{BenchmarkWeights, Sector, SectorMap};
pub use engine::{DailySectorAttribution, SectorAttributionRecord, compute_daily};
pub use summary::{RankedSector, SectorAttributionSummary, SectorBreakdown, summarize};
