//! Built-in ETF universe with asset-class classifications.

use crate::universe::asset_class::AssetClass;
use hobart_sector::SectorMap;
use std::collections::HashMap;

/// An ETF constituent with its asset class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtfConstituent {
    /// Ticker symbol.
    pub symbol: String,
    /// Asset class.
    pub class: AssetClass,
}

impl EtfConstituent {
    /// Create a new constituent.
    pub fn new(symbol: impl Into<String>, class: AssetClass) -> Self {
        Self {
            symbol: symbol.into(),
            class,
        }
    }
}

/// The built-in universe of common US-listed ETFs.
///
/// An ordinary immutable value: a caller may turn it into a [`SectorMap`]
/// and pass it in explicitly, or ignore it entirely in favor of their own
/// configuration. The engines never consult it on their own.
#[derive(Debug, Clone)]
pub struct EtfUniverse {
    constituents: Vec<EtfConstituent>,
    symbol_to_class: HashMap<String, AssetClass>,
}

impl EtfUniverse {
    /// Create the universe with its default constituents.
    pub fn new() -> Self {
        let constituents = Self::default_constituents();
        let symbol_to_class = constituents
            .iter()
            .map(|c| (c.symbol.clone(), c.class))
            .collect();

        Self {
            constituents,
            symbol_to_class,
        }
    }

    /// Get all constituents.
    pub fn constituents(&self) -> &[EtfConstituent] {
        &self.constituents
    }

    /// Get all symbols.
    pub fn symbols(&self) -> Vec<String> {
        self.constituents.iter().map(|c| c.symbol.clone()).collect()
    }

    /// Get the asset class for a symbol.
    pub fn class_of(&self, symbol: &str) -> Option<AssetClass> {
        self.symbol_to_class.get(symbol).copied()
    }

    /// Get all symbols in a specific class.
    pub fn symbols_in_class(&self, class: AssetClass) -> Vec<String> {
        self.constituents
            .iter()
            .filter(|c| c.class == class)
            .map(|c| c.symbol.clone())
            .collect()
    }

    /// Build a [`SectorMap`] assigning each constituent to its class's
    /// sector label.
    pub fn sector_map(&self) -> SectorMap {
        self.constituents
            .iter()
            .map(|c| (c.symbol.as_str(), c.class.sector()))
            .collect()
    }

    fn default_constituents() -> Vec<EtfConstituent> {
        use AssetClass::*;

        vec![
            // US equity
            EtfConstituent::new("SPY", UsEquity),
            EtfConstituent::new("VOO", UsEquity),
            EtfConstituent::new("IVV", UsEquity),
            EtfConstituent::new("VTI", UsEquity),
            EtfConstituent::new("QQQ", UsEquity),
            EtfConstituent::new("IWM", UsEquity),
            EtfConstituent::new("DIA", UsEquity),
            EtfConstituent::new("SP500", UsEquity),
            // International equity
            EtfConstituent::new("EFA", InternationalEquity),
            EtfConstituent::new("IEFA", InternationalEquity),
            EtfConstituent::new("VEA", InternationalEquity),
            EtfConstituent::new("EEM", InternationalEquity),
            EtfConstituent::new("VWO", InternationalEquity),
            // Fixed income
            EtfConstituent::new("AGG", FixedIncome),
            EtfConstituent::new("BND", FixedIncome),
            EtfConstituent::new("TLT", FixedIncome),
            EtfConstituent::new("IEF", FixedIncome),
            EtfConstituent::new("SHY", FixedIncome),
            EtfConstituent::new("LQD", FixedIncome),
            EtfConstituent::new("HYG", FixedIncome),
            EtfConstituent::new("TIP", FixedIncome),
            // Commodities
            EtfConstituent::new("GLD", Commodities),
            EtfConstituent::new("IAU", Commodities),
            EtfConstituent::new("SLV", Commodities),
            EtfConstituent::new("DBC", Commodities),
            EtfConstituent::new("USO", Commodities),
            // Real estate
            EtfConstituent::new("VNQ", RealEstate),
            EtfConstituent::new("IYR", RealEstate),
            EtfConstituent::new("SCHH", RealEstate),
            // Cash & equivalents
            EtfConstituent::new("BIL", Cash),
            EtfConstituent::new("SHV", Cash),
            EtfConstituent::new("SGOV", Cash),
        ]
    }
}

impl Default for EtfUniverse {
    fn default() -> Self {
        Self::new()
    }
}
