//! Conditional volatility and correlation dynamics.
//!
//! Both models consume coefficients fitted upstream and recurse forward
//! from supplied state; no estimation happens here.
//!
//! - [`GarchCoefficients`]: GARCH(1,1) with optional AR(1) conditional mean,
//!   one-step mean/variance forecast per risk factor
//! - [`DccCoefficients`]: correlation-targeted DCC(1,1) recursion coupling
//!   two GARCH-filtered factors
//! - [`GarchFactor`]: a fitted factor's coefficients plus the historical
//!   standardised-residual and conditional-variance series

mod dcc;
mod error;
mod garch;

pub use dcc::{unconditional_correlation, DccCoefficients, PseudoCorrelation};
pub use error::VolatilityError;
pub use garch::{GarchCoefficients, GarchFactor, GarchForecast};
