//! GARCH(1,1) conditional mean/variance forecasting.
//!
//! ## Mathematical Formulas
//!
//! Conditional mean (AR(1), zero for factors fitted without a mean
//! equation):
//!
//! ```text
//! mu_t = mu + ar1 * r_{t-1}
//! ```
//!
//! Conditional variance (Bollerslev, 1986):
//!
//! ```text
//! sigma²_t = omega + alpha * r²_{t-1} + beta * sigma²_{t-1}
//! ```
//!
//! Covariance stationarity requires alpha + beta < 1; the fitting collaborator
//! is expected to deliver stationary coefficients and [`is_stationary`]
//! reports whether it did, but the recursion itself never rejects a
//! persistence at or above one.
//!
//! [`is_stationary`]: GarchCoefficients::is_stationary

use num_traits::Float;

use super::error::VolatilityError;

/// Fitted GARCH(1,1) coefficients with an optional AR(1) mean equation.
///
/// # Examples
/// ```
/// use desk_models::volatility::GarchCoefficients;
///
/// // Variance-only fit (zero-mean factor)
/// let g = GarchCoefficients::new(1e-6_f64, 0.10, 0.85).unwrap();
/// assert!(g.is_stationary());
///
/// // Factor with a fitted mean equation
/// let g = g.with_mean(1e-4, -0.05);
/// let f = g.forecast(0.02, 1.5e-4);
/// assert!(f.variance > 0.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GarchCoefficients<T> {
    /// Long-run variance weight (omega > 0)
    pub omega: T,
    /// Shock (ARCH) coefficient (alpha >= 0)
    pub alpha: T,
    /// Persistence (GARCH) coefficient (beta >= 0)
    pub beta: T,
    /// Constant term of the conditional mean
    pub mu: T,
    /// AR(1) term of the conditional mean
    pub ar1: T,
}

/// One-step-ahead conditional forecast.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GarchForecast<T> {
    /// Conditional mean of the next-period return
    pub mean: T,
    /// Conditional variance of the next-period return
    pub variance: T,
}

impl<T: Float> GarchForecast<T> {
    /// Conditional standard deviation.
    #[inline]
    pub fn volatility(&self) -> T {
        self.variance.sqrt()
    }
}

impl<T: Float> GarchCoefficients<T> {
    /// Creates variance-equation coefficients with a zero mean equation.
    ///
    /// # Errors
    /// `VolatilityError::InvalidCoefficient` if `omega <= 0` or
    /// `alpha`/`beta` is negative.
    pub fn new(omega: T, alpha: T, beta: T) -> Result<Self, VolatilityError> {
        let zero = T::zero();
        if omega <= zero {
            return Err(VolatilityError::InvalidCoefficient {
                name: "omega",
                value: omega.to_f64().unwrap_or(f64::NAN),
                constraint: "must be positive",
            });
        }
        if alpha < zero {
            return Err(VolatilityError::InvalidCoefficient {
                name: "alpha",
                value: alpha.to_f64().unwrap_or(f64::NAN),
                constraint: "must be non-negative",
            });
        }
        if beta < zero {
            return Err(VolatilityError::InvalidCoefficient {
                name: "beta",
                value: beta.to_f64().unwrap_or(f64::NAN),
                constraint: "must be non-negative",
            });
        }
        Ok(Self {
            omega,
            alpha,
            beta,
            mu: zero,
            ar1: zero,
        })
    }

    /// Attaches an AR(1) conditional mean equation.
    pub fn with_mean(mut self, mu: T, ar1: T) -> Self {
        self.mu = mu;
        self.ar1 = ar1;
        self
    }

    /// alpha + beta, the variance persistence.
    #[inline]
    pub fn persistence(&self) -> T {
        self.alpha + self.beta
    }

    /// Whether the fit is covariance stationary (alpha + beta < 1).
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.persistence() < T::one()
    }

    /// Long-run (unconditional) variance omega / (1 - alpha - beta).
    ///
    /// Returns `None` for non-stationary coefficients, where no long-run
    /// variance exists.
    pub fn long_run_variance(&self) -> Option<T> {
        if self.is_stationary() {
            Some(self.omega / (T::one() - self.persistence()))
        } else {
            None
        }
    }

    /// One-step-ahead conditional mean and variance.
    ///
    /// Pure function of the supplied last-period state:
    ///
    /// ```text
    /// mean     = mu + ar1 * last_return
    /// variance = omega + alpha * last_return² + beta * last_variance
    /// ```
    ///
    /// Used both for the single one-step forecast feeding parametric VaR and
    /// as the per-day update inside multi-day simulation, where the caller
    /// passes the previous *simulated* return and variance.
    #[inline]
    pub fn forecast(&self, last_return: T, last_variance: T) -> GarchForecast<T> {
        GarchForecast {
            mean: self.mu + self.ar1 * last_return,
            variance: self.omega + self.alpha * last_return * last_return
                + self.beta * last_variance,
        }
    }
}

/// A fitted risk factor: coefficients plus the filtered history the
/// simulation engine bootstraps from.
///
/// The residual series holds standardised residuals z_t = (r_t - mu_t) /
/// sigma_t over the estimation window; the variance series holds the
/// matching conditional variances. Both come from the estimation
/// collaborator and are immutable here.
#[derive(Clone, Debug)]
pub struct GarchFactor<T> {
    coefficients: GarchCoefficients<T>,
    residuals: Vec<T>,
    variances: Vec<T>,
    last_return: T,
}

impl<T: Float> GarchFactor<T> {
    /// Bundles a factor's fitted coefficients and filtered history.
    ///
    /// # Arguments
    /// * `coefficients` - fitted GARCH coefficients
    /// * `residuals` - standardised residuals over the estimation window
    /// * `variances` - conditional variances over the same window
    /// * `last_return` - most recent observed return of the factor
    ///
    /// # Errors
    /// * `VolatilityError::EmptySeries` - either series is empty
    /// * `VolatilityError::SeriesLengthMismatch` - lengths differ
    pub fn new(
        coefficients: GarchCoefficients<T>,
        residuals: Vec<T>,
        variances: Vec<T>,
        last_return: T,
    ) -> Result<Self, VolatilityError> {
        if residuals.is_empty() || variances.is_empty() {
            return Err(VolatilityError::EmptySeries { factor: "garch" });
        }
        if residuals.len() != variances.len() {
            return Err(VolatilityError::SeriesLengthMismatch {
                left_len: residuals.len(),
                right_len: variances.len(),
            });
        }
        Ok(Self {
            coefficients,
            residuals,
            variances,
            last_return,
        })
    }

    /// Fitted coefficients.
    #[inline]
    pub fn coefficients(&self) -> &GarchCoefficients<T> {
        &self.coefficients
    }

    /// Standardised residuals over the estimation window.
    #[inline]
    pub fn residuals(&self) -> &[T] {
        &self.residuals
    }

    /// Conditional variances over the estimation window.
    #[inline]
    pub fn variances(&self) -> &[T] {
        &self.variances
    }

    /// Most recent observed return.
    #[inline]
    pub fn last_return(&self) -> T {
        self.last_return
    }

    /// Most recent fitted conditional variance.
    #[inline]
    pub fn last_variance(&self) -> T {
        *self.variances.last().expect("non-empty by construction")
    }

    /// One-step forecast from the last observed return and variance.
    #[inline]
    pub fn one_step(&self) -> GarchForecast<T> {
        self.coefficients
            .forecast(self.last_return, self.last_variance())
    }

    /// Length of the estimation window.
    #[inline]
    pub fn window(&self) -> usize {
        self.residuals.len()
    }
}
