//! Portfolio-level aggregation and repricing.

use desk_core::market_data::MarketState;
use tracing::{debug, warn};

use super::error::{PortfolioError, PositionError};
use super::position::{OptionPosition, PricedPosition};

/// Quantity- and multiplier-weighted sums of position Greeks.
///
/// Each entry is `sum(quantity_i * multiplier_i * greek_i)` over the book,
/// in currency terms per unit move of the underlying input.
#[derive(Copy, Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PortfolioGreeks {
    /// Aggregate ∂V/∂S
    pub delta: f64,
    /// Aggregate ∂²V/∂S²
    pub gamma: f64,
    /// Aggregate annualised ∂V/∂t
    pub theta: f64,
    /// Aggregate ∂V/∂σ
    pub vega: f64,
    /// Aggregate ∂V/∂r
    pub rho: f64,
}

/// One position that failed enrichment, with its index in the feed order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFailure {
    /// Index of the position within the feed
    pub index: usize,
    /// Why enrichment failed
    pub error: PositionError,
}

/// Result of enriching a position feed: the book that priced plus the
/// positions that did not.
#[derive(Debug, Clone)]
pub struct EnrichmentOutcome {
    /// The successfully priced book
    pub portfolio: PricedPortfolio,
    /// Positions dropped from the book, with reasons
    pub failures: Vec<PositionFailure>,
}

/// The enriched option book.
///
/// Holds the priced positions together with the spot they were priced
/// against. All aggregation is a fold over the positions; nothing here is
/// cached or mutated after construction.
#[derive(Debug, Clone)]
pub struct PricedPortfolio {
    positions: Vec<PricedPosition>,
    spot: f64,
}

impl PricedPortfolio {
    /// Enriches a position feed against a market snapshot.
    ///
    /// Individual position failures do not abort the book: they are
    /// collected (with feed indices) in the returned
    /// [`EnrichmentOutcome::failures`] and logged at `warn`.
    ///
    /// # Errors
    ///
    /// * `PortfolioError::EmptyBook` - the feed held no positions
    /// * `PortfolioError::AllPositionsFailed` - nothing survived enrichment
    pub fn enrich(
        positions: &[OptionPosition],
        market: &MarketState,
    ) -> Result<EnrichmentOutcome, PortfolioError> {
        if positions.is_empty() {
            return Err(PortfolioError::EmptyBook);
        }

        let mut priced = Vec::with_capacity(positions.len());
        let mut failures = Vec::new();

        for (index, position) in positions.iter().enumerate() {
            match PricedPosition::enrich(position.clone(), market) {
                Ok(p) => priced.push(p),
                Err(error) => {
                    warn!(index, %error, "position dropped from book");
                    failures.push(PositionFailure { index, error });
                }
            }
        }

        if priced.is_empty() {
            let first = failures.remove(0);
            return Err(PortfolioError::AllPositionsFailed {
                failures: positions.len(),
                first_index: first.index,
                first_error: first.error,
            });
        }

        debug!(
            priced = priced.len(),
            dropped = failures.len(),
            "book enriched"
        );

        Ok(EnrichmentOutcome {
            portfolio: PricedPortfolio {
                positions: priced,
                spot: market.spot(),
            },
            failures,
        })
    }

    /// The priced positions, in feed order (minus dropped ones).
    #[inline]
    pub fn positions(&self) -> &[PricedPosition] {
        &self.positions
    }

    /// Number of priced positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the book holds no positions (never the case for a
    /// successfully enriched book).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Spot the book was priced against.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Shortest session-adjusted time to expiry in the book, in years.
    pub fn min_time_to_expiry(&self) -> f64 {
        self.positions
            .iter()
            .map(PricedPosition::time_to_expiry)
            .fold(f64::INFINITY, f64::min)
    }

    /// Quantity- and multiplier-weighted portfolio Greeks.
    pub fn greeks(&self) -> PortfolioGreeks {
        self.positions
            .iter()
            .fold(PortfolioGreeks::default(), |mut acc, p| {
                let w = p.position().quantity * p.position().multiplier;
                let g = p.greeks();
                acc.delta += w * g.delta;
                acc.gamma += w * g.gamma;
                acc.theta += w * g.theta;
                acc.vega += w * g.vega;
                acc.rho += w * g.rho;
                acc
            })
    }

    /// Current book value: sum of signed position values at observed market
    /// prices.
    pub fn value(&self) -> f64 {
        self.positions.iter().map(PricedPosition::value).sum()
    }

    /// Reprices the whole book at a shifted spot, proportionally scaled
    /// implied-volatility vector and reduced expiries.
    ///
    /// # Errors
    /// `PortfolioError::Reprice` with the index of the first position whose
    /// inputs left their domain.
    pub fn value_at(
        &self,
        spot: f64,
        vol_scale: f64,
        time_decay_years: f64,
    ) -> Result<f64, PortfolioError> {
        let mut total = 0.0;
        for (index, position) in self.positions.iter().enumerate() {
            total += position
                .reprice(spot, vol_scale, time_decay_years)
                .map_err(|source| PortfolioError::Reprice { index, source })?;
        }
        Ok(total)
    }

    /// Book value over a grid of spot shifts, for the value-vs-spot curve.
    ///
    /// Scans `steps + 1` evenly spaced points from `lo_factor * spot` to
    /// `hi_factor * spot` (e.g. 0.8 to 1.2) and returns
    /// `(pct_change, value)` pairs, holding implied volatilities and
    /// expiries fixed.
    ///
    /// # Errors
    /// `PortfolioError::Reprice` if any scan point fails to price.
    pub fn value_curve(
        &self,
        lo_factor: f64,
        hi_factor: f64,
        steps: usize,
    ) -> Result<Vec<(f64, f64)>, PortfolioError> {
        let mut points = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let factor = lo_factor + (hi_factor - lo_factor) * i as f64 / steps as f64;
            let value = self.value_at(self.spot * factor, 1.0, 0.0)?;
            points.push((factor - 1.0, value));
        }
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use desk_core::market_data::ZeroCurve;
    use desk_core::types::time::{Date, ExpirySession};
    use desk_models::analytical::OptionType;

    fn market() -> MarketState {
        let curve = ZeroCurve::new(&[(1, 0.0008), (90, 0.0012), (365, 0.0025)]).unwrap();
        MarketState::new(
            Date::from_ymd(2021, 3, 1).unwrap(),
            3500.0,
            0.02,
            curve,
        )
        .unwrap()
    }

    fn call(strike: f64, quantity: f64, market_price: f64) -> OptionPosition {
        OptionPosition {
            option_type: OptionType::Call,
            strike,
            quantity,
            multiplier: 100.0,
            expiry: Date::from_ymd(2021, 6, 18).unwrap(),
            session: ExpirySession::Close,
            market_price,
        }
    }

    fn book() -> PricedPortfolio {
        let positions = vec![
            call(3500.0, 1.0, 120.0),
            call(3600.0, -2.0, 80.0),
            call(3700.0, 3.0, 50.0),
        ];
        PricedPortfolio::enrich(&positions, &market())
            .unwrap()
            .portfolio
    }

    #[test]
    fn empty_feed_is_rejected() {
        assert!(matches!(
            PricedPortfolio::enrich(&[], &market()),
            Err(PortfolioError::EmptyBook)
        ));
    }

    #[test]
    fn partial_failure_keeps_surviving_positions() {
        let mut expired = call(3500.0, 1.0, 120.0);
        expired.expiry = Date::from_ymd(2021, 2, 1).unwrap();

        let positions = vec![expired, call(3600.0, 1.0, 80.0)];
        let outcome = PricedPortfolio::enrich(&positions, &market()).unwrap();

        assert_eq!(outcome.portfolio.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 0);
        assert!(matches!(
            outcome.failures[0].error,
            PositionError::Expired { .. }
        ));
    }

    #[test]
    fn total_failure_is_an_error() {
        let mut expired = call(3500.0, 1.0, 120.0);
        expired.expiry = Date::from_ymd(2021, 2, 1).unwrap();

        let result = PricedPortfolio::enrich(&[expired], &market());
        assert!(matches!(
            result,
            Err(PortfolioError::AllPositionsFailed { failures: 1, .. })
        ));
    }

    #[test]
    fn greeks_are_quantity_and_multiplier_weighted() {
        let portfolio = book();
        let manual: f64 = portfolio
            .positions()
            .iter()
            .map(|p| p.position().quantity * p.position().multiplier * p.greeks().delta)
            .sum();
        assert_relative_eq!(portfolio.greeks().delta, manual, epsilon = 1e-12);
    }

    #[test]
    fn scaling_quantities_scales_greeks() {
        let base = vec![call(3500.0, 1.0, 120.0), call(3600.0, -2.0, 80.0)];
        let scaled: Vec<OptionPosition> = base
            .iter()
            .map(|p| {
                let mut p = p.clone();
                p.quantity *= 3.0;
                p
            })
            .collect();

        let g1 = PricedPortfolio::enrich(&base, &market())
            .unwrap()
            .portfolio
            .greeks();
        let g3 = PricedPortfolio::enrich(&scaled, &market())
            .unwrap()
            .portfolio
            .greeks();

        assert_relative_eq!(g3.delta, 3.0 * g1.delta, epsilon = 1e-9);
        assert_relative_eq!(g3.vega, 3.0 * g1.vega, epsilon = 1e-9);
        assert_relative_eq!(g3.theta, 3.0 * g1.theta, epsilon = 1e-9);
    }

    #[test]
    fn value_sums_signed_positions() {
        let portfolio = book();
        // 1*100*120 - 2*100*80 + 3*100*50
        assert_relative_eq!(portfolio.value(), 12_000.0 - 16_000.0 + 15_000.0);
    }

    #[test]
    fn value_at_current_market_matches_observed_value() {
        let portfolio = book();
        let repriced = portfolio.value_at(3500.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(repriced, portfolio.value(), epsilon = 1e-6);
    }

    #[test]
    fn value_curve_spans_requested_grid() {
        let portfolio = book();
        let curve = portfolio.value_curve(0.8, 1.2, 8).unwrap();

        assert_eq!(curve.len(), 9);
        assert_relative_eq!(curve[0].0, -0.2, epsilon = 1e-12);
        assert_relative_eq!(curve[8].0, 0.2, epsilon = 1e-12);

        // Mid-grid point equals an unshifted revaluation.
        assert_relative_eq!(curve[4].0, 0.0, epsilon = 1e-12);
        assert_relative_eq!(curve[4].1, portfolio.value(), epsilon = 1e-6);
    }

    #[test]
    fn min_time_to_expiry_over_mixed_expiries() {
        let mut near = call(3500.0, 1.0, 60.0);
        near.expiry = Date::from_ymd(2021, 4, 16).unwrap();
        let positions = vec![near, call(3600.0, 1.0, 80.0)];

        let portfolio = PricedPortfolio::enrich(&positions, &market())
            .unwrap()
            .portfolio;
        assert_relative_eq!(
            portfolio.min_time_to_expiry(),
            46.0 / 365.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn reprice_failure_carries_position_index() {
        let portfolio = book();
        let result = portfolio.value_at(3500.0, 1.0, 200.0 / 365.0);
        match result {
            Err(PortfolioError::Reprice { index: 0, source }) => {
                assert!(matches!(source, PositionError::Expired { .. }));
            }
            other => panic!("expected reprice failure, got {:?}", other),
        }
    }
}
