//! Interpolation methods for numerical computation.
//!
//! The curve layer needs exactly one scheme: piecewise-linear interpolation
//! over strictly increasing abscissae with hard domain bounds (no
//! extrapolation). [`LinearInterpolator`] provides it behind the
//! [`Interpolator`] trait so curve code does not depend on the scheme.
//!
//! # Example
//!
//! ```
//! use desk_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
//! let y = interp.interpolate(0.5).unwrap();
//! assert!((y - 1.0).abs() < 1e-12);
//!
//! // Queries outside the data range are an error, not an extrapolation.
//! assert!(interp.interpolate(2.5).is_err());
//! ```

mod linear;

use crate::types::InterpolationError;
use num_traits::Float;

pub use linear::LinearInterpolator;

/// One-dimensional interpolation over a fixed set of data points.
pub trait Interpolator<T: Float> {
    /// Interpolates a value at point `x`.
    ///
    /// # Errors
    /// `InterpolationError::OutOfBounds` if `x` lies outside [`domain`](Self::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Returns the valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);
}
