//! Zero-coupon yield curve over (tenor-in-days, rate) pillars.

use super::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::time::DAYS_PER_YEAR;

/// Zero-coupon yield curve.
///
/// Holds an ascending sequence of `(tenor_days, rate)` pillars and returns
/// the linearly interpolated zero rate for an arbitrary tenor. Rates are
/// annualised decimals (0.0015 = 15 basis points).
///
/// Tenors outside the pillar range are a hard error: no extrapolation is
/// defined, and a book holding an option longer-dated than the last pillar
/// is a data problem to surface, not to paper over.
///
/// # Example
///
/// ```
/// use desk_core::market_data::ZeroCurve;
///
/// let curve = ZeroCurve::new(&[(30, 0.0010), (90, 0.0015), (365, 0.0030)]).unwrap();
///
/// // Pillar lookups are exact.
/// assert!((curve.rate_for_days(90.0).unwrap() - 0.0015).abs() < 1e-15);
///
/// // Interior lookups interpolate linearly.
/// assert!((curve.rate_for_days(60.0).unwrap() - 0.00125).abs() < 1e-15);
///
/// // Beyond the last pillar is an error.
/// assert!(curve.rate_for_days(1000.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCurve {
    interp: LinearInterpolator<f64>,
}

impl ZeroCurve {
    /// Constructs a curve from ascending `(tenor_days, rate)` pillars.
    ///
    /// # Errors
    ///
    /// `MarketDataError::Interpolation` if fewer than two pillars are given
    /// or the tenors are not strictly increasing.
    pub fn new(pillars: &[(u32, f64)]) -> Result<Self, MarketDataError> {
        let tenors: Vec<f64> = pillars.iter().map(|&(d, _)| d as f64).collect();
        let rates: Vec<f64> = pillars.iter().map(|&(_, r)| r).collect();
        let interp = LinearInterpolator::new(&tenors, &rates)?;
        Ok(Self { interp })
    }

    /// Zero rate for a tenor expressed in calendar days.
    ///
    /// # Errors
    /// `MarketDataError::TenorOutOfRange` if `days` falls outside the pillar
    /// range.
    pub fn rate_for_days(&self, days: f64) -> Result<f64, MarketDataError> {
        let (min, max) = self.interp.domain();
        if days < min || days > max {
            return Err(MarketDataError::TenorOutOfRange { days, min, max });
        }
        Ok(self.interp.interpolate(days)?)
    }

    /// Zero rate for a tenor expressed as an ACT/365 year fraction.
    ///
    /// # Errors
    /// Same conditions as [`rate_for_days`](Self::rate_for_days).
    pub fn rate_for_year_fraction(&self, t: f64) -> Result<f64, MarketDataError> {
        self.rate_for_days(t * DAYS_PER_YEAR)
    }

    /// First pillar tenor in days.
    #[inline]
    pub fn min_tenor_days(&self) -> f64 {
        self.interp.domain().0
    }

    /// Last pillar tenor in days.
    #[inline]
    pub fn max_tenor_days(&self) -> f64 {
        self.interp.domain().1
    }
}
