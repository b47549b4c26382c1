//! DCC(1,1) conditional correlation recursion.
//!
//! ## Mathematical Formulas
//!
//! Correlation-targeted recursion on the pseudo-covariance matrix Q (Engle,
//! 2002), for two factors with standardised residuals z1, z2 and
//! unconditional correlation rho-bar:
//!
//! ```text
//! q11_t = 1       + a*(z1² - 1)          + b*(q11_{t-1} - 1)
//! q22_t = 1       + a*(z2² - 1)          + b*(q22_{t-1} - 1)
//! q12_t = rho-bar + a*(z1*z2 - rho-bar)  + b*(q12_{t-1} - rho-bar)
//! rho_t = q12_t / sqrt(q11_t * q22_t)
//! ```
//!
//! With a, b >= 0 and a + b < 1 this is a convex combination of
//! positive-semidefinite matrices, so Q stays positive semidefinite and
//! rho_t stays inside [-1, 1] up to floating-point noise. Violations beyond
//! tolerance are surfaced as errors, never propagated.

use num_traits::Float;

use super::error::VolatilityError;

/// Tolerance band inside which an out-of-range correlation is treated as
/// floating-point noise and clamped.
const RHO_CLAMP_TOL: f64 = 1e-12;

/// Fitted DCC(1,1) coefficients.
///
/// # Examples
/// ```
/// use desk_models::volatility::{DccCoefficients, PseudoCorrelation};
///
/// let dcc = DccCoefficients::new(0.05_f64, 0.90).unwrap();
/// let q0 = PseudoCorrelation::identity();
///
/// let (q1, rho) = dcc.step(0.6, &q0, 1.2, -0.4).unwrap();
/// assert!(rho.abs() <= 1.0);
/// assert!(q1.q11 > 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DccCoefficients<T> {
    /// Shock loading (a >= 0)
    pub a: T,
    /// Persistence loading (b >= 0, a + b < 1)
    pub b: T,
}

/// Pseudo-covariance state of the DCC recursion.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PseudoCorrelation<T> {
    /// First diagonal entry (q11 > 0)
    pub q11: T,
    /// Second diagonal entry (q22 > 0)
    pub q22: T,
    /// Off-diagonal entry
    pub q12: T,
}

impl<T: Float> PseudoCorrelation<T> {
    /// Creates a state, validating the diagonal.
    ///
    /// # Errors
    /// `VolatilityError::NonPositivePseudoVariance` if `q11 <= 0` or
    /// `q22 <= 0`.
    pub fn new(q11: T, q22: T, q12: T) -> Result<Self, VolatilityError> {
        if q11 <= T::zero() || q22 <= T::zero() {
            return Err(VolatilityError::NonPositivePseudoVariance {
                q11: q11.to_f64().unwrap_or(f64::NAN),
                q22: q22.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { q11, q22, q12 })
    }

    /// The uncorrelated unit state (q11 = q22 = 1, q12 = 0).
    pub fn identity() -> Self {
        Self {
            q11: T::one(),
            q22: T::one(),
            q12: T::zero(),
        }
    }

    /// Correlation implied by this state: q12 / sqrt(q11 * q22).
    #[inline]
    pub fn correlation(&self) -> T {
        self.q12 / (self.q11 * self.q22).sqrt()
    }
}

impl<T: Float> DccCoefficients<T> {
    /// Creates DCC coefficients.
    ///
    /// # Errors
    /// `VolatilityError::InvalidCoefficient` if either loading is negative
    /// or a + b >= 1 (the recursion would not mean-revert).
    pub fn new(a: T, b: T) -> Result<Self, VolatilityError> {
        let zero = T::zero();
        if a < zero {
            return Err(VolatilityError::InvalidCoefficient {
                name: "a",
                value: a.to_f64().unwrap_or(f64::NAN),
                constraint: "must be non-negative",
            });
        }
        if b < zero {
            return Err(VolatilityError::InvalidCoefficient {
                name: "b",
                value: b.to_f64().unwrap_or(f64::NAN),
                constraint: "must be non-negative",
            });
        }
        if a + b >= T::one() {
            return Err(VolatilityError::InvalidCoefficient {
                name: "a + b",
                value: (a + b).to_f64().unwrap_or(f64::NAN),
                constraint: "must be below one",
            });
        }
        Ok(Self { a, b })
    }

    /// One step of the DCC recursion.
    ///
    /// Pure function of the fitted loadings, the unconditional correlation
    /// `rho_bar`, last period's state `prev` and last period's standardised
    /// residual pair `(z1, z2)`. Returns the new state and its correlation.
    ///
    /// # Errors
    ///
    /// * `VolatilityError::NonPositivePseudoVariance` - recursion drove a
    ///   diagonal entry to zero or below
    /// * `VolatilityError::CorrelationDiverged` - correlation left [-1, 1]
    ///   by more than floating-point tolerance
    pub fn step(
        &self,
        rho_bar: T,
        prev: &PseudoCorrelation<T>,
        z1: T,
        z2: T,
    ) -> Result<(PseudoCorrelation<T>, T), VolatilityError> {
        let one = T::one();

        let q11 = one + self.a * (z1 * z1 - one) + self.b * (prev.q11 - one);
        let q22 = one + self.a * (z2 * z2 - one) + self.b * (prev.q22 - one);
        let q12 = rho_bar + self.a * (z1 * z2 - rho_bar) + self.b * (prev.q12 - rho_bar);

        let next = PseudoCorrelation::new(q11, q22, q12)?;

        let raw_rho = next.correlation();
        let tol = T::from(RHO_CLAMP_TOL).unwrap();
        if raw_rho.abs() > one + tol || !raw_rho.is_finite() {
            return Err(VolatilityError::CorrelationDiverged {
                rho: raw_rho.to_f64().unwrap_or(f64::NAN),
            });
        }
        let rho = raw_rho.min(one).max(-one);

        Ok((next, rho))
    }
}

/// Unconditional correlation of two standardised-residual series: the mean
/// of their elementwise products over the estimation window.
///
/// # Errors
///
/// * `VolatilityError::EmptySeries` - either series is empty
/// * `VolatilityError::SeriesLengthMismatch` - lengths differ
pub fn unconditional_correlation<T: Float>(z1: &[T], z2: &[T]) -> Result<T, VolatilityError> {
    if z1.is_empty() || z2.is_empty() {
        return Err(VolatilityError::EmptySeries { factor: "dcc" });
    }
    if z1.len() != z2.len() {
        return Err(VolatilityError::SeriesLengthMismatch {
            left_len: z1.len(),
            right_len: z2.len(),
        });
    }

    let sum = z1
        .iter()
        .zip(z2.iter())
        .fold(T::zero(), |acc, (&a, &b)| acc + a * b);
    Ok(sum / T::from(z1.len()).unwrap())
}
