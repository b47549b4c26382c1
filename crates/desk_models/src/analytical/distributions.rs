//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function
//! - `norm_pdf`: Probability density function
//! - `norm_inv_cdf`: Quantile function (inverse CDF)
//!
//! All functions are generic over `T: Float`. The CDF uses the Abramowitz
//! and Stegun erfc approximation (formula 7.1.26, maximum error 1.5e-7);
//! the quantile inverts it with Newton-Raphson, using the density as the
//! exact derivative, so both directions stay consistent to solver
//! tolerance.

use desk_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
use num_traits::Float;

use super::error::AnalyticalError;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function via the Abramowitz and Stegun 7.1.26
/// polynomial, evaluated with Horner's method. Maximum error 1.5e-7.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let zero = T::zero();

    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    let two = T::from(2.0).unwrap();
    if x < zero {
        two - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes `P(X <= x)` for `X ~ N(0, 1)` via `Φ(x) = erfc(-x/√2) / 2`.
/// Accurate to 1.5e-7 for all finite x.
///
/// # Examples
/// ```
/// use desk_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// Computes `φ(x) = exp(-x²/2) / √(2π)`.
///
/// # Examples
/// ```
/// use desk_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Standard normal quantile function (inverse CDF).
///
/// Solves `norm_cdf(z) = p` with Newton-Raphson, seeding at zero and using
/// `norm_pdf` as the exact derivative, so the result is consistent with
/// [`norm_cdf`] to solver tolerance. Used for the one-sided confidence
/// quantile in parametric VaR.
///
/// # Errors
/// `AnalyticalError::InvalidProbability` if `p` lies outside (0, 1).
///
/// # Examples
/// ```
/// use desk_models::analytical::distributions::norm_inv_cdf;
///
/// let z = norm_inv_cdf(0.05_f64).unwrap();
/// assert!((z + 1.6449).abs() < 1e-3);
/// ```
pub fn norm_inv_cdf<T: Float>(p: T) -> Result<T, AnalyticalError> {
    let zero = T::zero();
    let one = T::one();
    if !(p > zero && p < one) {
        return Err(AnalyticalError::InvalidProbability {
            p: p.to_f64().unwrap_or(f64::NAN),
        });
    }

    let solver = NewtonRaphsonSolver::new(SolverConfig::new(T::from(1e-12).unwrap(), 200));
    let z = solver.find_root(|z| norm_cdf(z) - p, norm_pdf, zero)?;
    Ok(z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn cdf_symmetry() {
        for x in [-3.0, -1.5, -0.5, 0.5, 1.5, 3.0] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-6);
        assert_relative_eq!(norm_cdf(2.0_f64), 0.9772498680518208, epsilon = 1e-6);
    }

    #[test]
    fn cdf_is_monotonic() {
        let mut prev = norm_cdf(-5.0_f64);
        for i in -49..=50 {
            let x = i as f64 * 0.1;
            let cur = norm_cdf(x);
            assert!(cur > prev, "CDF not monotonic at x = {}", x);
            prev = cur;
        }
    }

    #[test]
    fn cdf_bounded() {
        for i in -100..=100 {
            let v = norm_cdf(i as f64 * 0.1);
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn pdf_at_zero() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
    }

    #[test]
    fn pdf_symmetry() {
        for x in [0.5, 1.0, 2.0, 3.0] {
            assert_relative_eq!(norm_pdf(x), norm_pdf(-x), epsilon = 1e-12);
        }
    }

    #[test]
    fn pdf_is_derivative_of_cdf() {
        let h = 1e-4;
        for x in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let numeric = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            assert_relative_eq!(numeric, norm_pdf(x), epsilon = 1e-4);
        }
    }

    #[test]
    fn inv_cdf_reference_values() {
        // One-sided 5% and 1% quantiles.
        assert_relative_eq!(norm_inv_cdf(0.05_f64).unwrap(), -1.6449, epsilon = 1e-3);
        assert_relative_eq!(norm_inv_cdf(0.01_f64).unwrap(), -2.3263, epsilon = 1e-3);
        assert_relative_eq!(norm_inv_cdf(0.5_f64).unwrap(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn inv_cdf_round_trip() {
        for p in [0.01, 0.05, 0.25, 0.5, 0.75, 0.95, 0.99] {
            let z = norm_inv_cdf(p).unwrap();
            assert_relative_eq!(norm_cdf(z), p, epsilon = 1e-9);
        }
    }

    #[test]
    fn inv_cdf_rejects_degenerate_probability() {
        assert!(norm_inv_cdf(0.0_f64).is_err());
        assert!(norm_inv_cdf(1.0_f64).is_err());
        assert!(norm_inv_cdf(-0.5_f64).is_err());
        assert!(norm_inv_cdf(f64::NAN).is_err());
    }
}
