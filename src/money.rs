//! Exact decimal money type.
//!
//! Wraps `rust_decimal::Decimal` without rescaling, so every value keeps the
//! precision it was created with and arithmetic never rounds.

use crate::error::ParseError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A monetary amount or balance.
///
/// Balances may be negative: Bacs and Chaps debits are not bounded by the
/// available balance.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use payment_authorization::Money;
///
/// let balance = Money::from_str("1000").unwrap();
/// let amount = Money::from_str("250.50").unwrap();
/// assert_eq!(balance.checked_sub(amount).unwrap().to_string(), "749.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Money(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Exact subtraction, `None` if the result is not representable.
    ///
    /// This is the only subtraction `Money` offers; there is no panicking `-`.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl FromStr for Money {
    type Err = ParseError;

    /// Parses without rounding: inputs carrying more precision than a
    /// `Decimal` can hold are rejected.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        Decimal::from_str_exact(trimmed)
            .map(Money)
            .map_err(|e| ParseError::InvalidAmount {
                value: trimmed.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::from_str(&s).map_err(serde::de::Error::custom)
    }
}
