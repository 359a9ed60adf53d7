//! Payment schemes and the per-account set of allowed schemes.

use crate::error::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A payment rail with its own authorization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentScheme {
    Bacs,
    FasterPayments,
    Chaps,
}

impl PaymentScheme {
    pub const ALL: [PaymentScheme; 3] = [
        PaymentScheme::Bacs,
        PaymentScheme::FasterPayments,
        PaymentScheme::Chaps,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentScheme::Bacs => "Bacs",
            PaymentScheme::FasterPayments => "FasterPayments",
            PaymentScheme::Chaps => "Chaps",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            PaymentScheme::Bacs => 1 << 0,
            PaymentScheme::FasterPayments => 1 << 1,
            PaymentScheme::Chaps => 1 << 2,
        }
    }
}

impl fmt::Display for PaymentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentScheme {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        PaymentScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseError::UnknownScheme(trimmed.to_string()))
    }
}

impl Serialize for PaymentScheme {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentScheme {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PaymentScheme::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Set of schemes an account may use as debtor.
///
/// Any combination is valid, including the empty set.
///
/// ```
/// use payment_authorization::{AllowedSchemes, PaymentScheme};
///
/// let allowed = AllowedSchemes::BACS | AllowedSchemes::CHAPS;
/// assert!(allowed.contains(PaymentScheme::Chaps));
/// assert!(!allowed.contains(PaymentScheme::FasterPayments));
/// assert_eq!(allowed.to_string(), "Bacs|Chaps");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AllowedSchemes(u8);

impl AllowedSchemes {
    pub const NONE: Self = AllowedSchemes(0);
    pub const BACS: Self = AllowedSchemes(PaymentScheme::Bacs.bit());
    pub const FASTER_PAYMENTS: Self = AllowedSchemes(PaymentScheme::FasterPayments.bit());
    pub const CHAPS: Self = AllowedSchemes(PaymentScheme::Chaps.bit());

    pub const fn contains(self, scheme: PaymentScheme) -> bool {
        self.0 & scheme.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the allowed schemes in declaration order.
    pub fn iter(self) -> impl Iterator<Item = PaymentScheme> {
        PaymentScheme::ALL
            .into_iter()
            .filter(move |scheme| self.contains(*scheme))
    }
}

impl From<PaymentScheme> for AllowedSchemes {
    fn from(scheme: PaymentScheme) -> Self {
        AllowedSchemes(scheme.bit())
    }
}

impl FromIterator<PaymentScheme> for AllowedSchemes {
    fn from_iter<I: IntoIterator<Item = PaymentScheme>>(iter: I) -> Self {
        iter.into_iter()
            .fold(AllowedSchemes::NONE, |set, scheme| set | AllowedSchemes::from(scheme))
    }
}

impl BitOr for AllowedSchemes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        AllowedSchemes(self.0 | rhs.0)
    }
}

impl BitOrAssign for AllowedSchemes {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// `|`-separated scheme names, empty for no schemes.
impl fmt::Display for AllowedSchemes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, scheme) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(scheme.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for AllowedSchemes {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut allowed = AllowedSchemes::NONE;
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            allowed |= AllowedSchemes::from(PaymentScheme::from_str(part)?);
        }
        Ok(allowed)
    }
}

impl Serialize for AllowedSchemes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AllowedSchemes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AllowedSchemes::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_round_trips_through_text() {
        for scheme in PaymentScheme::ALL {
            assert_eq!(PaymentScheme::from_str(scheme.as_str()).unwrap(), scheme);
        }
        assert_eq!(
            PaymentScheme::from_str(" fasterpayments ").unwrap(),
            PaymentScheme::FasterPayments
        );
    }

    #[test]
    fn test_unknown_scheme() {
        assert_eq!(
            PaymentScheme::from_str("Swift"),
            Err(ParseError::UnknownScheme("Swift".to_string()))
        );
    }

    #[test]
    fn test_empty_set_allows_nothing() {
        let allowed = AllowedSchemes::default();
        assert!(allowed.is_empty());
        for scheme in PaymentScheme::ALL {
            assert!(!allowed.contains(scheme));
        }
        assert_eq!(allowed.to_string(), "");
    }

    #[test]
    fn test_multiple_schemes() {
        let allowed = AllowedSchemes::BACS | AllowedSchemes::FASTER_PAYMENTS;
        assert!(allowed.contains(PaymentScheme::Bacs));
        assert!(allowed.contains(PaymentScheme::FasterPayments));
        assert!(!allowed.contains(PaymentScheme::Chaps));
        assert_eq!(
            allowed.iter().collect::<Vec<_>>(),
            vec![PaymentScheme::Bacs, PaymentScheme::FasterPayments]
        );
    }

    #[test]
    fn test_parse_allowed_schemes() {
        assert_eq!(
            AllowedSchemes::from_str("Chaps | Bacs").unwrap(),
            AllowedSchemes::BACS | AllowedSchemes::CHAPS
        );
        assert_eq!(AllowedSchemes::from_str("").unwrap(), AllowedSchemes::NONE);
        assert!(AllowedSchemes::from_str("Bacs|Cheque").is_err());
    }

    #[test]
    fn test_collect_from_schemes() {
        let allowed: AllowedSchemes = PaymentScheme::ALL.into_iter().collect();
        assert_eq!(allowed.to_string(), "Bacs|FasterPayments|Chaps");
    }
}
