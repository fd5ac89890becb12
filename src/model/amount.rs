//! Amount type for quantities, unit prices, and revenue values.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles
//! the lenient parsing the retail export requires: malformed numeric fields
//! become `None` instead of failing the whole load.

use format_num::format_num;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

/// Represents a numeric value from the retail export.
///
/// The export stores quantities and unit prices as plain decimal text. Fields
/// are not guaranteed to be well-formed, so the usual entry point is
/// [`Amount::parse_lossy`], which coerces rather than fails.
///
/// # Examples
///
/// Parsing a well-formed value:
/// ```
/// # use retail_report::Amount;
/// let price = Amount::parse_lossy("2.50").unwrap();
/// assert!(price.is_positive());
/// ```
///
/// Malformed values coerce to `None`:
/// ```
/// # use retail_report::Amount;
/// assert!(Amount::parse_lossy("two fifty").is_none());
/// assert!(Amount::parse_lossy("").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parses a numeric field, coercing failures to `None`.
    ///
    /// Surrounding whitespace is ignored. Anything that does not parse as a
    /// plain decimal number (including an empty field) is treated as a
    /// missing value.
    pub fn parse_lossy(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed).ok().map(Self)
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.0.is_sign_positive()
    }

    /// Returns true if the amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.is_zero()
    }
}

impl Mul for Amount {
    type Output = Amount;

    fn mul(self, rhs: Self) -> Self::Output {
        Amount(self.0 * rhs.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl Display for Amount {
    /// Renders with comma thousands separators and two decimal places, for
    /// example `1,234.50`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_num!(",.2", self.0.to_f64().unwrap_or_default())
        )
    }
}
