#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use hobart_attribution as attribution;
pub use hobart_sector as sector;
pub use hobart_series as series;

// Re-export the primary entry points and their vocabulary
pub use hobart_attribution::{AssetAttributionReport, compute_asset_attribution};
pub use hobart_sector::{
    BenchmarkWeights, Sector, SectorAttributionReport, SectorMap, compute_sector_attribution,
};
pub use hobart_series::{AlignmentError, AssetId, Granularity};

// Re-export common universe types
pub use universe::{AssetClass, EtfUniverse, Universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
