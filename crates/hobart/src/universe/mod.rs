//! Universe management for Hobart attribution.
//!
//! Provides the built-in ETF universe and its asset-class
//! classifications, usable as ready-made sector configuration.

pub mod asset_class;
pub mod etf;

pub use asset_class::AssetClass;
pub use etf::{EtfConstituent, EtfUniverse};

use hobart_sector::SectorMap;

/// Trait for asset universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().contains(&symbol.to_string())
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for EtfUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }
}

/// The built-in ETF classification as a [`SectorMap`].
///
/// Convenience for callers without their own configuration; the engines
/// never consult it implicitly.
pub fn builtin_sector_map() -> SectorMap {
    EtfUniverse::new().sector_map()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_trait() {
        let universe = EtfUniverse::new();

        assert!(universe.contains("SPY"));
        assert!(!universe.contains("NOTREAL"));
        assert!(universe.size() >= 30);
    }

    #[test]
    fn test_builtin_sector_map() {
        let map = builtin_sector_map();
        assert!(!map.is_empty());
    }
}
