//! Filtered Historical Simulation (FHS) VaR engine.
//!
//! FHS combines the historical standardised residuals of the two risk
//! factors with their fitted GARCH dynamics: residuals supply the shape of
//! the shock distribution, the GARCH recursion supplies today's volatility
//! level. Two horizons are supported:
//!
//! - **One day**: one P&L outcome per historical residual pair, driven by
//!   the one-step forecast. Deterministic: no random sampling.
//! - **Multi day**: Monte-Carlo draws, each bootstrapping one shock pair
//!   per day (jointly, preserving the factors' contemporaneous
//!   correlation) and recursing the GARCH state on the simulated path.
//!
//! Draws are embarrassingly parallel over immutable inputs and run on
//! Rayon; per-draw RNG streams are derived from the configured seed and
//! the draw index, so results are reproducible regardless of thread
//! scheduling.

mod cancel;
mod config;
mod engine;
mod error;
mod pool;
mod result;
mod sampler;

pub use cancel::CancelToken;
pub use config::{FhsConfig, FhsConfigBuilder, MAX_DRAWS, MAX_HORIZON_DAYS};
pub use engine::FhsEngine;
pub use error::{ConfigError, FhsError};
pub use pool::ResidualPool;
pub use result::SimulationOutcome;
