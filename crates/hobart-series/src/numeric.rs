//! Guarded numeric helpers and the anomaly trail.
//!
//! Every place the engine consumes a raw floating-point value goes through
//! these helpers: a NaN, infinity, or missing observation is coerced to 0
//! and the coercion is reported back to the caller as a [`NumericAnomaly`]
//! rather than silently swallowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::series::AssetId;

/// Why a raw value was coerced to zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AnomalyReason {
    /// No observation was present for the asset at the date.
    Missing,
    /// The observation was NaN or infinite.
    NotFinite,
}

impl fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::NotFinite => write!(f, "not finite"),
        }
    }
}

/// A single coerced value, observable on every engine result.
///
/// `asset` is `None` for portfolio-level values (an unusable total return
/// that forced a period to be skipped).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NumericAnomaly {
    /// Date of the affected observation.
    pub date: NaiveDate,
    /// Affected asset, or `None` for portfolio-level values.
    pub asset: Option<AssetId>,
    /// Why the value was unusable.
    pub reason: AnomalyReason,
}

impl fmt::Display for NumericAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.asset {
            Some(asset) => write!(f, "{} {}: {}", self.date, asset, self.reason),
            None => write!(f, "{} portfolio: {}", self.date, self.reason),
        }
    }
}

/// Coerce an optional observation to a finite value.
///
/// Returns the value unchanged when it is present and finite; otherwise
/// returns `0.0` together with the reason the original was unusable.
///
/// # Examples
///
/// ```
/// use hobart_series::{AnomalyReason, coerce_finite};
///
/// assert_eq!(coerce_finite(Some(0.01)), (0.01, None));
/// assert_eq!(coerce_finite(None), (0.0, Some(AnomalyReason::Missing)));
/// assert_eq!(
///     coerce_finite(Some(f64::NAN)),
///     (0.0, Some(AnomalyReason::NotFinite))
/// );
/// ```
pub fn coerce_finite(value: Option<f64>) -> (f64, Option<AnomalyReason>) {
    match value {
        Some(v) if v.is_finite() => (v, None),
        Some(_) => (0.0, Some(AnomalyReason::NotFinite)),
        None => (0.0, Some(AnomalyReason::Missing)),
    }
}

/// Divide, returning `None` when the quotient would be meaningless.
///
/// `None` is returned for a zero or non-finite denominator and for any
/// non-finite quotient.
///
/// # Examples
///
/// ```
/// use hobart_series::safe_divide;
///
/// assert_eq!(safe_divide(1.0, 4.0), Some(0.25));
/// assert_eq!(safe_divide(1.0, 0.0), None);
/// assert_eq!(safe_divide(f64::NAN, 2.0), None);
/// ```
pub fn safe_divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    let quotient = numerator / denominator;
    quotient.is_finite().then_some(quotient)
}

/// Compound a sequence of periodic returns: `Π(1 + r_i) - 1`.
///
/// # Examples
///
/// ```
/// use hobart_series::compound;
///
/// let total = compound([0.10, 0.10]);
/// assert!((total - 0.21).abs() < 1e-12);
/// ```
pub fn compound<I>(returns: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    returns.into_iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1), `0.0` for fewer than two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_coerce_finite_passthrough() {
        assert_eq!(coerce_finite(Some(-0.05)), (-0.05, None));
        assert_eq!(coerce_finite(Some(0.0)), (0.0, None));
    }

    #[test]
    fn test_coerce_finite_infinite() {
        assert_eq!(
            coerce_finite(Some(f64::INFINITY)),
            (0.0, Some(AnomalyReason::NotFinite))
        );
        assert_eq!(
            coerce_finite(Some(f64::NEG_INFINITY)),
            (0.0, Some(AnomalyReason::NotFinite))
        );
    }

    #[test]
    fn test_safe_divide_guards() {
        assert_eq!(safe_divide(1.0, f64::NAN), None);
        assert_eq!(safe_divide(1.0, f64::INFINITY), None);
        assert_eq!(safe_divide(f64::INFINITY, 2.0), None);
        assert_eq!(safe_divide(-3.0, 2.0), Some(-1.5));
    }

    #[test]
    fn test_compound_empty_is_zero() {
        assert_eq!(compound(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_compound_negative_returns() {
        let total = compound([0.10, -0.10]);
        assert_abs_diff_eq!(total, -0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_and_sample_std() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(mean(&values), 2.5, epsilon = 1e-12);
        // Sample variance of 1..4 is 5/3.
        assert_abs_diff_eq!(
            sample_std(&values),
            (5.0_f64 / 3.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_sample_std_degenerate() {
        assert_eq!(sample_std(&[]), 0.0);
        assert_eq!(sample_std(&[0.42]), 0.0);
    }

    #[test]
    fn test_anomaly_display() {
        let anomaly = NumericAnomaly {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            asset: Some(AssetId::from("TLT")),
            reason: AnomalyReason::NotFinite,
        };
        assert_eq!(anomaly.to_string(), "2024-03-04 TLT: not finite");

        let portfolio_level = NumericAnomaly {
            date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            asset: None,
            reason: AnomalyReason::Missing,
        };
        assert!(portfolio_level.to_string().contains("portfolio"));
    }
}
