//! Implied-volatility inversion.
//!
//! Black-Scholes-Merton prices are strictly increasing in volatility, so a
//! bracketed Brent search recovers the unique volatility reproducing an
//! observed price whenever one exists inside the bracket.

use desk_core::math::solvers::{BrentSolver, SolverConfig};
use desk_core::types::SolverError;
use num_traits::Float;

use super::black_scholes::{BlackScholes, OptionType};
use super::error::AnalyticalError;

/// Lower edge of the volatility search bracket.
const VOL_BRACKET_LO: f64 = 1e-6;

/// Upper edge of the volatility search bracket (500% annualised).
const VOL_BRACKET_HI: f64 = 5.0;

/// Solves for the volatility at which the model reproduces `observed_price`.
///
/// Searches sigma ∈ [1e-6, 5] with Brent's method. An observed price outside
/// the range attainable in that bracket (below intrinsic or above the
/// bracket ceiling) fails with `NoImpliedVolatility` rather than returning a
/// boundary value.
///
/// # Errors
///
/// * `AnalyticalError::InvalidSpot` / `InvalidStrike` / `InvalidExpiry` -
///   non-positive valuation inputs
/// * `AnalyticalError::NoImpliedVolatility` - price unattainable in bracket
/// * `AnalyticalError::Solver` - root finder failed to converge
///
/// # Examples
///
/// ```
/// use desk_models::analytical::{implied_volatility, BlackScholes, OptionType};
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.35).unwrap();
/// let price = bs.price_call(110.0, 0.5).unwrap();
///
/// let vol = implied_volatility(OptionType::Call, price, 100.0, 110.0, 0.5, 0.05, 0.02)
///     .unwrap();
/// assert!((vol - 0.35).abs() < 1e-6);
/// ```
pub fn implied_volatility<T: Float>(
    option_type: OptionType,
    observed_price: T,
    spot: T,
    strike: T,
    expiry: T,
    rate: T,
    dividend_yield: T,
) -> Result<T, AnalyticalError> {
    let zero = T::zero();
    if spot <= zero {
        return Err(AnalyticalError::InvalidSpot {
            spot: spot.to_f64().unwrap_or(0.0),
        });
    }
    if strike <= zero {
        return Err(AnalyticalError::InvalidStrike {
            strike: strike.to_f64().unwrap_or(0.0),
        });
    }
    if expiry <= zero {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: expiry.to_f64().unwrap_or(0.0),
        });
    }

    let lo = T::from(VOL_BRACKET_LO).unwrap();
    let hi = T::from(VOL_BRACKET_HI).unwrap();

    // Inputs are validated above and sigma stays inside the positive
    // bracket, so the model construction and pricing cannot fail here.
    let price_at = |sigma: T| -> T {
        BlackScholes::new(spot, rate, dividend_yield, sigma)
            .and_then(|bs| bs.price(option_type, strike, expiry))
            .unwrap_or_else(|_| T::nan())
    };

    let solver = BrentSolver::new(SolverConfig::new(T::from(1e-10).unwrap(), 200));
    match solver.find_root(|sigma| price_at(sigma) - observed_price, lo, hi) {
        Ok(sigma) => Ok(sigma),
        Err(SolverError::NoBracket { .. }) => Err(AnalyticalError::NoImpliedVolatility {
            price: observed_price.to_f64().unwrap_or(f64::NAN),
            lo: VOL_BRACKET_LO,
            hi: VOL_BRACKET_HI,
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn round_trip_recovers_volatility() {
        for sigma in [0.05, 0.1, 0.2, 0.5, 1.0, 2.0] {
            let bs = BlackScholes::new(3500.0_f64, 0.005, 0.02, sigma).unwrap();
            let price = bs.price_call(3600.0, 0.25).unwrap();

            let recovered = implied_volatility(
                OptionType::Call,
                price,
                3500.0,
                3600.0,
                0.25,
                0.005,
                0.02,
            )
            .unwrap();
            assert_relative_eq!(recovered, sigma, epsilon = 1e-6);
        }
    }

    #[test]
    fn round_trip_for_puts() {
        let bs = BlackScholes::new(100.0_f64, 0.01, 0.0, 0.4).unwrap();
        let price = bs.price_put(90.0, 1.0).unwrap();

        let recovered =
            implied_volatility(OptionType::Put, price, 100.0, 90.0, 1.0, 0.01, 0.0).unwrap();
        assert_relative_eq!(recovered, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn price_below_intrinsic_has_no_solution() {
        // A call is worth at least its discounted intrinsic value; a price
        // of (almost) zero for a deep ITM call cannot be matched.
        let result =
            implied_volatility(OptionType::Call, 1e-8, 200.0, 100.0, 1.0, 0.05, 0.0);
        assert!(matches!(
            result,
            Err(AnalyticalError::NoImpliedVolatility { .. })
        ));
    }

    #[test]
    fn absurdly_high_price_has_no_solution() {
        // Above the sigma = 5 ceiling for an ATM option.
        let result =
            implied_volatility(OptionType::Call, 99.99, 100.0, 100.0, 0.25, 0.05, 0.0);
        assert!(matches!(
            result,
            Err(AnalyticalError::NoImpliedVolatility { .. })
        ));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(implied_volatility(OptionType::Call, 5.0, -1.0, 100.0, 1.0, 0.0, 0.0).is_err());
        assert!(implied_volatility(OptionType::Call, 5.0, 100.0, 0.0, 1.0, 0.0, 0.0).is_err());
        assert!(implied_volatility(OptionType::Call, 5.0, 100.0, 100.0, 0.0, 0.0, 0.0).is_err());
    }

    proptest! {
        #[test]
        fn round_trip_over_surface(
            sigma in 0.1_f64..1.5,
            moneyness in 0.85_f64..1.15,
            expiry in 0.1_f64..1.5,
        ) {
            let spot = 3500.0_f64;
            let strike = spot * moneyness;
            let bs = BlackScholes::new(spot, 0.005, 0.02, sigma).unwrap();
            let price = bs.price_call(strike, expiry).unwrap();

            let recovered = implied_volatility(
                OptionType::Call,
                price,
                spot,
                strike,
                expiry,
                0.005,
                0.02,
            )
            .unwrap();
            prop_assert!((recovered - sigma).abs() < 1e-6);
        }
    }
}
