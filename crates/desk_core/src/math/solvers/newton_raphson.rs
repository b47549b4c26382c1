//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method `x_{n+1} = x_n - f(x_n) / f'(x_n)` for fast
/// quadratic convergence on smooth functions with a known derivative.
///
/// # Convergence
///
/// The number of correct digits approximately doubles per iteration near a
/// root, but the method may fail when the derivative is near zero or the
/// initial guess is far from the root. Callers needing a guaranteed result
/// should prefer [`BrentSolver`](super::BrentSolver) with a valid bracket.
///
/// # Example
///
/// ```
/// use desk_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// // Solve x² - 2 = 0 (find √2)
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
/// let root = solver
///     .find_root(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0)
///     .unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Creates a solver with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Finds a root of `f` using the explicit derivative `f_prime`.
    ///
    /// # Errors
    ///
    /// * `SolverError::MaxIterationsExceeded` - failed to converge
    /// * `SolverError::DerivativeNearZero` - derivative too small to divide by
    /// * `SolverError::NumericalInstability` - iteration left the finite range
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let mut x = x0;
        let epsilon = T::from(1e-30).unwrap();

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);

            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < epsilon {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = x - f_val / f_prime_val;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_sqrt_two() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let root = solver
            .find_root(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0)
            .unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn finds_log_two() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let root = solver
            .find_root(|x: f64| x.exp() - 2.0, |x| x.exp(), 0.5)
            .unwrap();
        assert!((root - 2.0_f64.ln()).abs() < 1e-10);
    }

    #[test]
    fn reports_vanishing_derivative() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let result = solver.find_root(|x: f64| x * x * x, |_| 0.0, 0.5);
        assert!(matches!(
            result,
            Err(SolverError::DerivativeNearZero { .. })
        ));
    }

    #[test]
    fn reports_iteration_exhaustion() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-100, 3));
        let result = solver.find_root(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0);
        assert_eq!(
            result.unwrap_err(),
            SolverError::MaxIterationsExceeded { iterations: 3 }
        );
    }

    #[test]
    fn works_with_f32() {
        let solver: NewtonRaphsonSolver<f32> =
            NewtonRaphsonSolver::new(SolverConfig::new(1e-6, 100));
        let root = solver
            .find_root(|x: f32| x * x - 2.0, |x| 2.0 * x, 1.0)
            .unwrap();
        assert!((root - std::f32::consts::SQRT_2).abs() < 1e-5);
    }
}
