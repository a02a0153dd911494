//! Asset-class definitions for the built-in ETF universe.

use hobart_sector::Sector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad asset classes used to bucket ETF positions (6 classes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    /// US Equity
    UsEquity,

    /// International Equity
    InternationalEquity,

    /// Fixed Income
    FixedIncome,

    /// Commodities
    Commodities,

    /// Real Estate
    RealEstate,

    /// Cash & Equivalents
    Cash,
}

impl AssetClass {
    /// Returns all asset classes.
    pub fn all() -> Vec<Self> {
        vec![
            Self::UsEquity,
            Self::InternationalEquity,
            Self::FixedIncome,
            Self::Commodities,
            Self::RealEstate,
            Self::Cash,
        ]
    }

    /// Returns the class code.
    pub const fn code(&self) -> u8 {
        match self {
            Self::UsEquity => 10,
            Self::InternationalEquity => 20,
            Self::FixedIncome => 30,
            Self::Commodities => 40,
            Self::RealEstate => 50,
            Self::Cash => 60,
        }
    }

    /// Returns the full class name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::UsEquity => "US Equity",
            Self::InternationalEquity => "International Equity",
            Self::FixedIncome => "Fixed Income",
            Self::Commodities => "Commodities",
            Self::RealEstate => "Real Estate",
            Self::Cash => "Cash & Equivalents",
        }
    }

    /// Parse a class from its code.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            10 => Some(Self::UsEquity),
            20 => Some(Self::InternationalEquity),
            30 => Some(Self::FixedIncome),
            40 => Some(Self::Commodities),
            50 => Some(Self::RealEstate),
            60 => Some(Self::Cash),
            _ => None,
        }
    }

    /// The sector label used for this class in attribution records.
    pub fn sector(&self) -> Sector {
        Sector::from(self.name())
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
