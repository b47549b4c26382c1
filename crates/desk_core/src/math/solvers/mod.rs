//! Root-finding solvers for numerical computation.
//!
//! This module provides the two root finders the valuation layer needs:
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives,
//!   used where an analytic derivative is available (e.g. inverting the
//!   standard-normal CDF, whose derivative is the density).
//! - [`BrentSolver`]: Robust bracketing method without derivative
//!   requirement, used for implied-volatility inversion where a reliable
//!   bracket is known.
//!
//! Both share [`SolverConfig`] for tolerance and iteration limits.
//!
//! # Examples
//!
//! ```
//! use desk_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 in bracket [0, 2]
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;
mod newton_raphson;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
