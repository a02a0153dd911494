#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod analysis;
pub mod engine;
pub mod record;
pub mod summary;

pub use aggregate::aggregate;
pub use analysis::{AssetAttributionReport, compute_asset_attribution};
pub use engine::{DailyAttribution, compute_daily};
pub use record::AttributionRecord;
pub use summary::{AssetBreakdown, AttributionSummary, RankedAsset, summarize};
