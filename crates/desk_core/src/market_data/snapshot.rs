//! Immutable market snapshot for one evaluation run.

use super::{MarketDataError, ZeroCurve};
use crate::types::time::Date;

/// Market state observed at one evaluation date.
///
/// Bundles the evaluation date, underlying spot, continuous dividend yield
/// and the zero-coupon curve. Constructed once per run and threaded by
/// reference through every valuation call; nothing mutates it.
///
/// # Example
///
/// ```
/// use desk_core::market_data::{MarketState, ZeroCurve};
/// use desk_core::types::time::Date;
///
/// let curve = ZeroCurve::new(&[(30, 0.0010), (365, 0.0030)]).unwrap();
/// let state = MarketState::new(
///     Date::from_ymd(2021, 3, 1).unwrap(),
///     3500.0,
///     0.02,
///     curve,
/// )
/// .unwrap();
/// assert_eq!(state.spot(), 3500.0);
/// ```
#[derive(Debug, Clone)]
pub struct MarketState {
    evaluation_date: Date,
    spot: f64,
    dividend_yield: f64,
    curve: ZeroCurve,
}

impl MarketState {
    /// Creates a snapshot, validating the spot price.
    ///
    /// # Errors
    /// `MarketDataError::InvalidSpot` if `spot <= 0`.
    pub fn new(
        evaluation_date: Date,
        spot: f64,
        dividend_yield: f64,
        curve: ZeroCurve,
    ) -> Result<Self, MarketDataError> {
        if spot <= 0.0 || !spot.is_finite() {
            return Err(MarketDataError::InvalidSpot { spot });
        }
        Ok(Self {
            evaluation_date,
            spot,
            dividend_yield,
            curve,
        })
    }

    /// Evaluation date of the snapshot.
    #[inline]
    pub fn evaluation_date(&self) -> Date {
        self.evaluation_date
    }

    /// Underlying spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Continuous dividend yield (annualised decimal).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Zero-coupon curve.
    #[inline]
    pub fn curve(&self) -> &ZeroCurve {
        &self.curve
    }
}
