//! Market data error types.

use crate::types::InterpolationError;
use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `TenorOutOfRange`: Requested tenor beyond the curve pillars (no
///   extrapolation is defined)
/// - `InvalidSpot`: Non-positive spot price
/// - `Interpolation`: Wrapped interpolation/construction error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Requested tenor lies outside the curve pillars.
    #[error("Tenor {days} days outside curve range [{min}, {max}]")]
    TenorOutOfRange {
        /// The requested tenor in days
        days: f64,
        /// First pillar tenor in days
        min: f64,
        /// Last pillar tenor in days
        max: f64,
    },

    /// Spot price must be positive.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Curve construction or interpolation failed.
    #[error("Curve interpolation: {0}")]
    Interpolation(#[from] InterpolationError),
}
