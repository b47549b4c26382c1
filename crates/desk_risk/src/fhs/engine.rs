//! The Filtered Historical Simulation engine.

use desk_core::math::stats::{lower_tail_mean, quantile};
use desk_core::types::time::DAYS_PER_YEAR;
use desk_models::volatility::GarchFactor;
use rand::Rng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::cancel::CancelToken;
use super::config::FhsConfig;
use super::error::{ConfigError, FhsError};
use super::pool::ResidualPool;
use super::result::SimulationOutcome;
use super::sampler::draw_rng;
use crate::portfolio::PricedPortfolio;

/// Per-draw outcome before aggregation.
enum DrawResult {
    /// The draw repriced; P&L relative to the initial book value.
    Value(f64),
    /// The draw hit a numerical breakdown and is discarded.
    Failed,
    /// The draw was skipped because cancellation was requested.
    Skipped,
}

/// Filtered Historical Simulation engine.
///
/// Holds only the immutable run configuration; all market inputs are
/// passed per call, so one engine serves any number of books.
///
/// # Examples
///
/// ```no_run
/// use desk_risk::fhs::{CancelToken, FhsConfig, FhsEngine};
/// # fn run(
/// #     portfolio: &desk_risk::portfolio::PricedPortfolio,
/// #     index_factor: &desk_models::volatility::GarchFactor<f64>,
/// #     vol_factor: &desk_models::volatility::GarchFactor<f64>,
/// #     pool: &desk_risk::fhs::ResidualPool,
/// # ) -> Result<(), desk_risk::fhs::FhsError> {
/// let engine = FhsEngine::new(FhsConfig::builder().seed(42).build()?)?;
/// let cancel = CancelToken::new();
///
/// let one_day = engine.simulate_one_day(portfolio, index_factor, vol_factor, pool, &cancel)?;
/// let monthly = engine.simulate_horizon(portfolio, index_factor, vol_factor, pool, &cancel)?;
/// println!("1d VaR {} / 21d VaR {}", one_day.value_at_risk(), monthly.value_at_risk());
/// # Ok(())
/// # }
/// ```
pub struct FhsEngine {
    config: FhsConfig,
}

impl FhsEngine {
    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    /// `ConfigError` if the configuration is invalid.
    pub fn new(config: FhsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the engine configuration.
    #[inline]
    pub fn config(&self) -> &FhsConfig {
        &self.config
    }

    /// One-day FHS: one P&L outcome per historical residual pair.
    ///
    /// Every outcome uses the same one-step mean/variance forecast; only
    /// the shock differs. The spot moves by `exp(r_index)`, every implied
    /// volatility scales by `exp(r_vol)`, and expiries shorten by one day.
    /// Deterministic: the seed is not consulted.
    ///
    /// # Errors
    ///
    /// * `FhsError::HorizonExceedsExpiry` - a position expires within a day
    /// * `FhsError::AllDrawsFailed` - nothing repriced
    /// * `FhsError::Cancelled` - the token was flipped mid-run
    pub fn simulate_one_day(
        &self,
        portfolio: &PricedPortfolio,
        index_factor: &GarchFactor<f64>,
        vol_factor: &GarchFactor<f64>,
        pool: &ResidualPool,
        cancel: &CancelToken,
    ) -> Result<SimulationOutcome, FhsError> {
        self.check_expiries(portfolio, 1)?;
        let started = Instant::now();

        let index_forecast = index_factor.one_step();
        let vol_forecast = vol_factor.one_step();
        let index_sigma = index_forecast.variance.sqrt();
        let vol_sigma = vol_forecast.variance.sqrt();

        debug!(
            window = pool.len(),
            index_mean = index_forecast.mean,
            index_variance = index_forecast.variance,
            vol_mean = vol_forecast.mean,
            vol_variance = vol_forecast.variance,
            "one-day simulation start"
        );

        let initial_value = portfolio.value_at(portfolio.spot(), 1.0, 0.0)?;
        let decay = 1.0 / DAYS_PER_YEAR;

        let draws: Vec<DrawResult> = (0..pool.len())
            .into_par_iter()
            .map(|i| {
                if cancel.is_cancelled() {
                    return DrawResult::Skipped;
                }
                if !(index_forecast.variance > 0.0) || !(vol_forecast.variance > 0.0) {
                    return DrawResult::Failed;
                }

                let (z_index, z_vol) = pool.pair(i);
                let r_index = index_forecast.mean + index_sigma * z_index;
                let r_vol = vol_forecast.mean + vol_sigma * z_vol;

                let spot = portfolio.spot() * r_index.exp();
                match portfolio.value_at(spot, r_vol.exp(), decay) {
                    Ok(value) => DrawResult::Value(value - initial_value),
                    Err(_) => DrawResult::Failed,
                }
            })
            .collect();

        self.reduce(draws, pool.len(), cancel, started, "one-day")
    }

    /// Multi-day FHS over the configured horizon and draw count.
    ///
    /// Each draw bootstraps one shock pair per day (jointly, with
    /// replacement, uniform over the pool) and recurses the conditional
    /// mean/variance on the previous *simulated* return and variance. The
    /// cumulative log returns reprice the book once per draw, with
    /// expiries shortened by the horizon.
    ///
    /// Reproducible: each draw's shock stream is a pure function of
    /// `(seed, draw_index)`.
    ///
    /// # Errors
    ///
    /// * `FhsError::HorizonExceedsExpiry` - a position expires mid-horizon
    /// * `FhsError::AllDrawsFailed` - nothing repriced
    /// * `FhsError::Cancelled` - the token was flipped mid-run
    pub fn simulate_horizon(
        &self,
        portfolio: &PricedPortfolio,
        index_factor: &GarchFactor<f64>,
        vol_factor: &GarchFactor<f64>,
        pool: &ResidualPool,
        cancel: &CancelToken,
    ) -> Result<SimulationOutcome, FhsError> {
        let horizon = self.config.horizon_days();
        let n_draws = self.config.n_draws();
        self.check_expiries(portfolio, horizon)?;
        let started = Instant::now();

        let index_one_step = index_factor.one_step();
        let vol_one_step = vol_factor.one_step();

        debug!(
            n_draws,
            horizon,
            window = pool.len(),
            seed = self.config.seed(),
            "multi-day simulation start"
        );

        let initial_value = portfolio.value_at(portfolio.spot(), 1.0, 0.0)?;
        let decay = horizon as f64 / DAYS_PER_YEAR;
        let window = pool.len();

        let draws: Vec<DrawResult> = (0..n_draws)
            .into_par_iter()
            .map(|draw| {
                if cancel.is_cancelled() {
                    return DrawResult::Skipped;
                }

                let mut rng = draw_rng(self.config.seed(), draw as u64);

                // Day 1 starts from the observed state; later days recurse
                // on the simulated path.
                let mut index_forecast = index_one_step;
                let mut vol_forecast = vol_one_step;
                let mut cum_index = 0.0;
                let mut cum_vol = 0.0;

                for _ in 0..horizon {
                    if !(index_forecast.variance > 0.0) || !(vol_forecast.variance > 0.0) {
                        return DrawResult::Failed;
                    }

                    let (z_index, z_vol) = pool.pair(rng.gen_range(0..window));
                    let r_index = index_forecast.mean + index_forecast.variance.sqrt() * z_index;
                    let r_vol = vol_forecast.mean + vol_forecast.variance.sqrt() * z_vol;
                    cum_index += r_index;
                    cum_vol += r_vol;

                    index_forecast = index_factor
                        .coefficients()
                        .forecast(r_index, index_forecast.variance);
                    vol_forecast = vol_factor
                        .coefficients()
                        .forecast(r_vol, vol_forecast.variance);
                }

                let spot = portfolio.spot() * cum_index.exp();
                match portfolio.value_at(spot, cum_vol.exp(), decay) {
                    Ok(value) => DrawResult::Value(value - initial_value),
                    Err(_) => DrawResult::Failed,
                }
            })
            .collect();

        self.reduce(draws, n_draws, cancel, started, "multi-day")
    }

    /// Rejects books holding positions that expire inside the horizon.
    fn check_expiries(
        &self,
        portfolio: &PricedPortfolio,
        horizon_days: usize,
    ) -> Result<(), FhsError> {
        for (index, position) in portfolio.positions().iter().enumerate() {
            let expiry_days = position.time_to_expiry() * DAYS_PER_YEAR;
            if expiry_days <= horizon_days as f64 {
                return Err(FhsError::HorizonExceedsExpiry {
                    index,
                    horizon_days,
                    expiry_days,
                });
            }
        }
        Ok(())
    }

    /// Folds per-draw outcomes into the run result.
    fn reduce(
        &self,
        draws: Vec<DrawResult>,
        requested: usize,
        cancel: &CancelToken,
        started: Instant,
        label: &str,
    ) -> Result<SimulationOutcome, FhsError> {
        if cancel.is_cancelled() {
            info!(label, "simulation cancelled");
            return Err(FhsError::Cancelled);
        }

        let mut pnl = Vec::with_capacity(draws.len());
        let mut discarded = 0usize;
        for draw in draws {
            match draw {
                DrawResult::Value(v) => pnl.push(v),
                DrawResult::Failed => discarded += 1,
                // Unreachable without cancellation, handled above.
                DrawResult::Skipped => discarded += 1,
            }
        }

        if pnl.is_empty() {
            return Err(FhsError::AllDrawsFailed {
                attempted: requested,
            });
        }
        if discarded > 0 {
            warn!(
                label,
                discarded,
                requested,
                "simulation draws discarded for numerical breakdown"
            );
        }

        let alpha = self.config.alpha();
        let value_at_risk = -quantile(&pnl, alpha)?;
        let expected_shortfall = -lower_tail_mean(&pnl, alpha)?;

        info!(
            label,
            draws = pnl.len(),
            discarded,
            value_at_risk,
            expected_shortfall,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "simulation complete"
        );

        Ok(SimulationOutcome::new(
            pnl,
            value_at_risk,
            expected_shortfall,
            alpha,
            requested,
            discarded,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use desk_core::market_data::{MarketState, ZeroCurve};
    use desk_core::types::time::{Date, ExpirySession};
    use desk_models::analytical::OptionType;
    use desk_models::volatility::GarchCoefficients;
    use crate::portfolio::OptionPosition;

    fn market() -> MarketState {
        let curve = ZeroCurve::new(&[(1, 0.0008), (90, 0.0012), (365, 0.0025)]).unwrap();
        MarketState::new(Date::from_ymd(2021, 3, 1).unwrap(), 3500.0, 0.02, curve).unwrap()
    }

    fn book() -> PricedPortfolio {
        let positions = vec![
            OptionPosition {
                option_type: OptionType::Call,
                strike: 3500.0,
                quantity: 1.0,
                multiplier: 100.0,
                expiry: Date::from_ymd(2021, 6, 18).unwrap(),
                session: ExpirySession::Close,
                market_price: 120.0,
            },
            OptionPosition {
                option_type: OptionType::Put,
                strike: 3400.0,
                quantity: 2.0,
                multiplier: 100.0,
                expiry: Date::from_ymd(2021, 6, 18).unwrap(),
                session: ExpirySession::Close,
                market_price: 90.0,
            },
        ];
        PricedPortfolio::enrich(&positions, &market())
            .unwrap()
            .portfolio
    }

    fn factor(last_return: f64) -> GarchFactor<f64> {
        let coefficients = GarchCoefficients::new(2e-6, 0.08, 0.90).unwrap();
        // Alternating synthetic residual history.
        let residuals: Vec<f64> = (0..32)
            .map(|i| ((i % 5) as f64 - 2.0) * 0.8)
            .collect();
        let variances = vec![1.2e-4; 32];
        GarchFactor::new(coefficients, residuals, variances, last_return).unwrap()
    }

    fn vol_factor() -> GarchFactor<f64> {
        let coefficients = GarchCoefficients::new(1e-4, 0.10, 0.80)
            .unwrap()
            .with_mean(-1e-3, -0.08);
        let residuals: Vec<f64> = (0..32)
            .map(|i| ((i % 7) as f64 - 3.0) * 0.6)
            .collect();
        let variances = vec![4e-3; 32];
        GarchFactor::new(coefficients, residuals, variances, 0.02).unwrap()
    }

    fn pool() -> ResidualPool {
        ResidualPool::from_factors(&factor(0.01), &vol_factor()).unwrap()
    }

    fn engine(seed: u64) -> FhsEngine {
        FhsEngine::new(
            FhsConfig::builder()
                .n_draws(200)
                .horizon_days(21)
                .alpha(0.05)
                .seed(seed)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn one_day_produces_one_outcome_per_residual() {
        let outcome = engine(1)
            .simulate_one_day(
                &book(),
                &factor(0.01),
                &vol_factor(),
                &pool(),
                &CancelToken::new(),
            )
            .unwrap();

        assert_eq!(outcome.pnl().len(), 32);
        assert_eq!(outcome.requested(), 32);
        assert_eq!(outcome.discarded(), 0);
        // Both tail measures are positive losses for this long book.
        assert!(outcome.value_at_risk() > 0.0);
        assert!(outcome.expected_shortfall() >= outcome.value_at_risk());
    }

    #[test]
    fn one_day_is_deterministic() {
        let run = |seed| {
            engine(seed)
                .simulate_one_day(
                    &book(),
                    &factor(0.01),
                    &vol_factor(),
                    &pool(),
                    &CancelToken::new(),
                )
                .unwrap()
        };
        // Seed is irrelevant for the one-day loop.
        let a = run(1);
        let b = run(2);
        assert_eq!(a.pnl(), b.pnl());
        assert_eq!(a.value_at_risk(), b.value_at_risk());
    }

    #[test]
    fn multi_day_same_seed_reproduces_exactly() {
        let run = || {
            engine(42)
                .simulate_horizon(
                    &book(),
                    &factor(0.01),
                    &vol_factor(),
                    &pool(),
                    &CancelToken::new(),
                )
                .unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.pnl(), b.pnl());
        assert_eq!(a.value_at_risk(), b.value_at_risk());
        assert_eq!(a.expected_shortfall(), b.expected_shortfall());
    }

    #[test]
    fn multi_day_seeds_change_the_distribution() {
        let run = |seed| {
            engine(seed)
                .simulate_horizon(
                    &book(),
                    &factor(0.01),
                    &vol_factor(),
                    &pool(),
                    &CancelToken::new(),
                )
                .unwrap()
        };
        let a = run(1);
        let b = run(2);
        assert_ne!(a.pnl(), b.pnl());
    }

    #[test]
    fn multi_day_respects_draw_count() {
        let outcome = engine(7)
            .simulate_horizon(
                &book(),
                &factor(0.01),
                &vol_factor(),
                &pool(),
                &CancelToken::new(),
            )
            .unwrap();
        assert_eq!(outcome.pnl().len(), 200);
        assert_eq!(outcome.requested(), 200);
        assert_eq!(outcome.discard_rate(), 0.0);
    }

    #[test]
    fn pre_cancelled_run_is_rejected() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let result = engine(1).simulate_horizon(
            &book(),
            &factor(0.01),
            &vol_factor(),
            &pool(),
            &cancel,
        );
        assert!(matches!(result, Err(FhsError::Cancelled)));
    }

    #[test]
    fn horizon_longer_than_expiry_is_rejected() {
        let config = FhsConfig::builder()
            .n_draws(10)
            .horizon_days(200)
            .seed(1)
            .build()
            .unwrap();
        let engine = FhsEngine::new(config).unwrap();

        let result = engine.simulate_horizon(
            &book(),
            &factor(0.01),
            &vol_factor(),
            &pool(),
            &CancelToken::new(),
        );
        match result {
            Err(FhsError::HorizonExceedsExpiry {
                index,
                horizon_days,
                ..
            }) => {
                assert_eq!(index, 0);
                assert_eq!(horizon_days, 200);
            }
            other => panic!("expected horizon rejection, got {:?}", other),
        }
    }

    #[test]
    fn larger_shocks_widen_the_tail() {
        // Doubling the residuals should not shrink the loss tail.
        let base = engine(3)
            .simulate_one_day(
                &book(),
                &factor(0.01),
                &vol_factor(),
                &pool(),
                &CancelToken::new(),
            )
            .unwrap();

        let doubled_pool = ResidualPool::new(
            pool().index_residuals().iter().map(|z| z * 2.0).collect(),
            pool().vol_residuals().iter().map(|z| z * 2.0).collect(),
        )
        .unwrap();
        let wide = engine(3)
            .simulate_one_day(
                &book(),
                &factor(0.01),
                &vol_factor(),
                &doubled_pool,
                &CancelToken::new(),
            )
            .unwrap();

        assert!(wide.value_at_risk() >= base.value_at_risk());
    }

    #[test]
    fn one_day_var_matches_manual_quantile() {
        let outcome = engine(1)
            .simulate_one_day(
                &book(),
                &factor(0.01),
                &vol_factor(),
                &pool(),
                &CancelToken::new(),
            )
            .unwrap();
        let manual = desk_core::math::stats::quantile(outcome.pnl(), 0.05).unwrap();
        assert_relative_eq!(outcome.value_at_risk(), -manual, epsilon = 1e-12);
    }
}
