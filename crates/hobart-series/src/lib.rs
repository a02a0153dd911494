#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod align;
pub mod error;
pub mod numeric;
pub mod period;
pub mod series;

pub use align::{AlignedData, AlignedPair, MIN_ALIGNED_DATES, align, align_pair};
pub use error::{AlignmentError, Result};
pub use numeric::{
    AnomalyReason, NumericAnomaly, coerce_finite, compound, mean, safe_divide, sample_std,
};
pub use period::{Granularity, PeriodKey};
pub use series::{AssetId, PortfolioPoint, PortfolioSeries, ReturnSeries, WeightSeries};
