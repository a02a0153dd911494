//! Reporting granularities and period bucketing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reporting period length for attribution records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Granularity {
    /// One record per aligned date pair.
    Daily,
    /// Records bucketed by ISO week.
    Weekly,
    /// Records bucketed by calendar month.
    Monthly,
}

impl Granularity {
    /// All supported granularities, coarsest last.
    pub const fn all() -> [Self; 3] {
        [Self::Daily, Self::Weekly, Self::Monthly]
    }

    /// Lowercase name for display and report headers.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// The bucket a date falls into at this granularity.
    ///
    /// Weekly bucketing uses the ISO week (and ISO week-based year, so
    /// year-boundary weeks stay whole); monthly bucketing uses the
    /// calendar month.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use hobart_series::Granularity;
    ///
    /// let mon = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    /// let fri = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    /// assert_eq!(
    ///     Granularity::Weekly.key_for(mon),
    ///     Granularity::Weekly.key_for(fri)
    /// );
    /// assert_ne!(
    ///     Granularity::Daily.key_for(mon),
    ///     Granularity::Daily.key_for(fri)
    /// );
    /// ```
    pub fn key_for(&self, date: NaiveDate) -> PeriodKey {
        match self {
            Self::Daily => PeriodKey::Day(date),
            Self::Weekly => {
                let week = date.iso_week();
                PeriodKey::Week {
                    year: week.year(),
                    week: week.week(),
                }
            }
            Self::Monthly => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bucket identifier produced by [`Granularity::key_for`].
///
/// Keys order chronologically within a granularity, so grouping records
/// into a `BTreeMap<PeriodKey, _>` preserves time order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PeriodKey {
    /// A single calendar date.
    Day(NaiveDate),
    /// An ISO week within an ISO week-based year.
    Week {
        /// ISO week-based year.
        year: i32,
        /// ISO week number (1–53).
        week: u32,
    },
    /// A calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Calendar month (1–12).
        month: u32,
    },
}
