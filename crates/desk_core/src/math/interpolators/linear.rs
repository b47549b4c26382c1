//! Piecewise-linear interpolation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator over strictly increasing abscissae.
///
/// Stores `(x, y)` pillars and interpolates linearly between adjacent
/// pillars. Construction requires the x-values to already be strictly
/// increasing; unsorted data is rejected rather than silently reordered so
/// that a malformed curve feed surfaces at the boundary.
///
/// # Example
///
/// ```
/// use desk_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 3.0], &[10.0, 20.0, 40.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
/// assert!((interp.interpolate(2.0).unwrap() - 30.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    /// Strictly increasing x-coordinates
    xs: Vec<T>,
    /// Corresponding y-values
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Constructs a linear interpolator from x and y pillars.
    ///
    /// # Errors
    ///
    /// * `InterpolationError::InvalidInput` - mismatched slice lengths
    /// * `InterpolationError::InsufficientData` - fewer than 2 pillars
    /// * `InterpolationError::NonMonotonicData` - x-values not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }

        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }

        for i in 1..xs.len() {
            if xs[i] <= xs[i - 1] {
                return Err(InterpolationError::NonMonotonicData { index: i });
            }
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Returns the x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the y-values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Returns the number of pillars.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the interpolator holds no pillars (never the case for
    /// a successfully constructed instance).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `i` of the segment with `xs[i] <= x <= xs[i+1]`, assuming `x`
    /// is inside the domain.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        if pos == 0 {
            0
        } else if pos >= self.xs.len() {
            self.xs.len() - 2
        } else {
            pos - 1
        }
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// Interpolates at `x` via `y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)`.
    ///
    /// Segment lookup is a binary search, so queries cost O(log n).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let (x_min, x_max) = self.domain();
        if x < x_min || x > x_max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: x_min.to_f64().unwrap_or(f64::NAN),
                max: x_max.to_f64().unwrap_or(f64::NAN),
            });
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + (y1 - y0) * t)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exact_at_pillars() {
        let interp = LinearInterpolator::new(&[1.0, 2.0, 4.0], &[10.0, 30.0, 20.0]).unwrap();
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 10.0);
        assert_relative_eq!(interp.interpolate(2.0).unwrap(), 30.0);
        assert_relative_eq!(interp.interpolate(4.0).unwrap(), 20.0);
    }

    #[test]
    fn midpoint_is_average() {
        let interp = LinearInterpolator::new(&[0.0, 2.0], &[1.0, 3.0]).unwrap();
        assert_relative_eq!(interp.interpolate(1.0).unwrap(), 2.0);
    }

    #[test]
    fn rejects_out_of_domain_query() {
        let interp = LinearInterpolator::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            interp.interpolate(1.5),
            Err(InterpolationError::OutOfBounds { .. })
        ));
        assert!(matches!(
            interp.interpolate(-0.5),
            Err(InterpolationError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_single_point() {
        let result = LinearInterpolator::new(&[1.0], &[1.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::InsufficientData { got: 1, need: 2 }
        );
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = LinearInterpolator::new(&[1.0, 2.0], &[1.0]);
        assert!(matches!(
            result,
            Err(InterpolationError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_unsorted_data() {
        let result = LinearInterpolator::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonMonotonicData { index: 2 }
        );
    }

    #[test]
    fn rejects_duplicate_abscissae() {
        let result = LinearInterpolator::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]);
        assert_eq!(
            result.unwrap_err(),
            InterpolationError::NonMonotonicData { index: 2 }
        );
    }

    #[test]
    fn interior_segment_lookup() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x).collect();
        let interp = LinearInterpolator::new(&xs, &ys).unwrap();
        for q in [0.5, 3.25, 7.75, 8.999] {
            assert_relative_eq!(interp.interpolate(q).unwrap(), 2.0 * q, epsilon = 1e-12);
        }
    }
}
