//! Simulation configuration.

use super::error::ConfigError;

/// Maximum number of Monte-Carlo draws allowed.
pub const MAX_DRAWS: usize = 1_000_000;

/// Maximum simulation horizon in days.
pub const MAX_HORIZON_DAYS: usize = 365;

/// Filtered Historical Simulation configuration.
///
/// Immutable once built. Use [`FhsConfig::builder`] to construct.
///
/// # Examples
///
/// ```rust
/// use desk_risk::fhs::FhsConfig;
///
/// let config = FhsConfig::builder()
///     .n_draws(5_000)
///     .horizon_days(21)
///     .alpha(0.05)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_draws(), 5_000);
/// assert_eq!(config.horizon_days(), 21);
/// ```
#[derive(Clone, Debug)]
pub struct FhsConfig {
    /// Number of Monte-Carlo draws for the multi-day horizon.
    n_draws: usize,
    /// Simulation horizon in days.
    horizon_days: usize,
    /// Tail probability for the VaR quantile.
    alpha: f64,
    /// Seed for reproducible bootstrap sampling.
    seed: u64,
}

impl FhsConfig {
    /// Creates a configuration builder with the desk defaults
    /// (5000 draws, 21 days, 5% tail, seed 0).
    #[inline]
    pub fn builder() -> FhsConfigBuilder {
        FhsConfigBuilder::default()
    }

    /// Number of Monte-Carlo draws for the multi-day horizon.
    #[inline]
    pub fn n_draws(&self) -> usize {
        self.n_draws
    }

    /// Simulation horizon in days.
    #[inline]
    pub fn horizon_days(&self) -> usize {
        self.horizon_days
    }

    /// Tail probability for the VaR quantile.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Bootstrap seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// * `ConfigError::InvalidDrawCount` - draws outside [1, 1_000_000]
    /// * `ConfigError::InvalidHorizon` - horizon outside [1, 365]
    /// * `ConfigError::InvalidConfidence` - alpha outside (0, 1)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_draws == 0 || self.n_draws > MAX_DRAWS {
            return Err(ConfigError::InvalidDrawCount(self.n_draws));
        }
        if self.horizon_days == 0 || self.horizon_days > MAX_HORIZON_DAYS {
            return Err(ConfigError::InvalidHorizon(self.horizon_days));
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidConfidence(self.alpha));
        }
        Ok(())
    }
}

/// Builder for [`FhsConfig`].
#[derive(Clone, Debug)]
pub struct FhsConfigBuilder {
    n_draws: usize,
    horizon_days: usize,
    alpha: f64,
    seed: u64,
}

impl Default for FhsConfigBuilder {
    fn default() -> Self {
        Self {
            n_draws: 5_000,
            horizon_days: 21,
            alpha: 0.05,
            seed: 0,
        }
    }
}

impl FhsConfigBuilder {
    /// Sets the number of Monte-Carlo draws.
    #[inline]
    pub fn n_draws(mut self, n_draws: usize) -> Self {
        self.n_draws = n_draws;
        self
    }

    /// Sets the simulation horizon in days.
    #[inline]
    pub fn horizon_days(mut self, horizon_days: usize) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Sets the tail probability for the VaR quantile (0.05 = 95% VaR).
    #[inline]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the bootstrap seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// Any [`ConfigError`] from [`FhsConfig::validate`].
    pub fn build(self) -> Result<FhsConfig, ConfigError> {
        let config = FhsConfig {
            n_draws: self.n_draws,
            horizon_days: self.horizon_days,
            alpha: self.alpha,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
