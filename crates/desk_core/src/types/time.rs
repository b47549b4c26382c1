//! Time types and day-count handling for valuation.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `ExpirySession`: Whether a contract settles at the market open or close
//! - ACT/365 year fractions, session-adjusted for open-settled expiries
//!
//! # Examples
//!
//! ```
//! use desk_core::types::time::{Date, ExpirySession};
//!
//! let eval = Date::from_ymd(2021, 1, 4).unwrap();
//! let expiry = Date::from_ymd(2021, 1, 14).unwrap();
//!
//! // Close-settled contract: full ten days of trading remain.
//! let t_close = ExpirySession::Close.year_fraction(eval, expiry);
//! assert!((t_close - 10.0 / 365.0).abs() < 1e-12);
//!
//! // Open-settled contract: the expiry day itself is not traded.
//! let t_open = ExpirySession::Open.year_fraction(eval, expiry);
//! assert!((t_open - 9.0 / 365.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Days per year under the ACT/365 fixed convention.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// Provides ISO 8601 serialisation and the date arithmetic the valuation
/// layer needs (day differences and year fractions).
///
/// # Examples
///
/// ```
/// use desk_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// # Errors
    /// `DateError::InvalidDate` if the components do not form a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    /// `DateError::ParseError` if the string is not a valid ISO date.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day-of-month component.
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Number of calendar days from `self` to `other` (positive if `other`
    /// is later).
    #[inline]
    pub fn days_until(&self, other: Date) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Difference in calendar days.
    fn sub(self, rhs: Date) -> i64 {
        (self.0 - rhs.0).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

/// Settlement session of an expiring contract.
///
/// Open-settled index options stop trading at the close of the day before
/// expiry, so one calendar day less of risk remains than for a close-settled
/// contract with the same expiry date.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExpirySession {
    /// Settlement at the market open of the expiry date.
    Open,
    /// Settlement at the market close of the expiry date.
    Close,
}

impl ExpirySession {
    /// Effective calendar days of remaining risk between `eval` and `expiry`.
    ///
    /// Close-settled contracts count every day up to and including expiry;
    /// open-settled contracts lose the expiry day.
    #[inline]
    pub fn days_to_expiry(&self, eval: Date, expiry: Date) -> i64 {
        let days = eval.days_until(expiry);
        match self {
            ExpirySession::Close => days,
            ExpirySession::Open => days - 1,
        }
    }

    /// ACT/365 year fraction of remaining risk between `eval` and `expiry`.
    ///
    /// May be zero or negative for contracts at or past expiry; callers
    /// validate positivity before valuation.
    #[inline]
    pub fn year_fraction(&self, eval: Date, expiry: Date) -> f64 {
        self.days_to_expiry(eval, expiry) as f64 / DAYS_PER_YEAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ymd_valid() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn from_ymd_invalid() {
        let result = Date::from_ymd(2023, 2, 29);
        assert_eq!(
            result.unwrap_err(),
            DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn parse_iso_roundtrip() {
        let date = Date::parse("2021-06-18").unwrap();
        assert_eq!(format!("{}", date), "2021-06-18");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Date::parse("18/06/2021"),
            Err(DateError::ParseError(_))
        ));
    }

    #[test]
    fn day_difference() {
        let a = Date::from_ymd(2021, 1, 1).unwrap();
        let b = Date::from_ymd(2021, 3, 1).unwrap();
        assert_eq!(b - a, 59);
        assert_eq!(a.days_until(b), 59);
        assert_eq!(a - b, -59);
    }

    #[test]
    fn close_session_counts_expiry_day() {
        let eval = Date::from_ymd(2021, 1, 4).unwrap();
        let expiry = Date::from_ymd(2021, 1, 14).unwrap();
        assert_eq!(ExpirySession::Close.days_to_expiry(eval, expiry), 10);
    }

    #[test]
    fn open_session_drops_expiry_day() {
        let eval = Date::from_ymd(2021, 1, 4).unwrap();
        let expiry = Date::from_ymd(2021, 1, 14).unwrap();
        assert_eq!(ExpirySession::Open.days_to_expiry(eval, expiry), 9);
    }

    #[test]
    fn year_fraction_act365() {
        let eval = Date::from_ymd(2021, 1, 1).unwrap();
        let expiry = Date::from_ymd(2022, 1, 1).unwrap();
        let t = ExpirySession::Close.year_fraction(eval, expiry);
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[test]
    fn year_fraction_can_go_non_positive() {
        let eval = Date::from_ymd(2021, 1, 14).unwrap();
        let expiry = Date::from_ymd(2021, 1, 14).unwrap();
        assert_eq!(ExpirySession::Close.year_fraction(eval, expiry), 0.0);
        assert!(ExpirySession::Open.year_fraction(eval, expiry) < 0.0);
    }
}
