//! Payment instruction and authorization outcome.

use crate::money::Money;
use crate::scheme::PaymentScheme;
use serde::Deserialize;
use std::fmt;

/// A single debit instruction.
///
/// The creditor is carried with the instruction but plays no part in the
/// authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRequest {
    #[serde(rename = "debtor")]
    pub debtor_account_number: String,

    #[serde(rename = "creditor")]
    pub creditor_account_number: String,

    pub amount: Money,

    pub scheme: PaymentScheme,
}

impl PaymentRequest {
    pub fn new(
        debtor_account_number: impl Into<String>,
        creditor_account_number: impl Into<String>,
        amount: Money,
        scheme: PaymentScheme,
    ) -> Self {
        PaymentRequest {
            debtor_account_number: debtor_account_number.into(),
            creditor_account_number: creditor_account_number.into(),
            amount,
            scheme,
        }
    }
}

/// Why a payment was not authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// No account exists for the debtor account number.
    AccountNotFound,

    /// No validator is registered for the requested scheme.
    NoValidatorForScheme,

    /// The account does not allow the requested scheme.
    SchemeNotAllowed,

    /// Balance is below the amount (FasterPayments only).
    InsufficientFunds,

    /// The account status is not `Live` (Chaps only).
    AccountNotLive,
}

impl Rejection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rejection::AccountNotFound => "account_not_found",
            Rejection::NoValidatorForScheme => "no_validator_for_scheme",
            Rejection::SchemeNotAllowed => "scheme_not_allowed",
            Rejection::InsufficientFunds => "insufficient_funds",
            Rejection::AccountNotLive => "account_not_live",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one authorization.
///
/// Carries a [`Rejection`] exactly when the payment was not authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentResult {
    rejection: Option<Rejection>,
}

impl PaymentResult {
    pub const fn authorized() -> Self {
        PaymentResult { rejection: None }
    }

    pub const fn rejected(reason: Rejection) -> Self {
        PaymentResult {
            rejection: Some(reason),
        }
    }

    pub const fn success(&self) -> bool {
        self.rejection.is_none()
    }

    pub const fn rejection(&self) -> Option<Rejection> {
        self.rejection
    }
}

impl From<Result<(), Rejection>> for PaymentResult {
    fn from(outcome: Result<(), Rejection>) -> Self {
        match outcome {
            Ok(()) => PaymentResult::authorized(),
            Err(reason) => PaymentResult::rejected(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_authorized_has_no_rejection() {
        let result = PaymentResult::authorized();
        assert!(result.success());
        assert_eq!(result.rejection(), None);
    }

    #[test]
    fn test_rejected_carries_reason() {
        let result = PaymentResult::rejected(Rejection::InsufficientFunds);
        assert!(!result.success());
        assert_eq!(result.rejection(), Some(Rejection::InsufficientFunds));
        assert_eq!(result.rejection().unwrap().to_string(), "insufficient_funds");
    }

    #[test]
    fn test_from_outcome() {
        assert!(PaymentResult::from(Ok(())).success());
        assert_eq!(
            PaymentResult::from(Err(Rejection::AccountNotLive)),
            PaymentResult::rejected(Rejection::AccountNotLive)
        );
    }

    #[test]
    fn test_request_deserializes_from_csv() {
        let csv = "debtor, creditor, amount, scheme\n123, 456, 250.50, FasterPayments";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let request: PaymentRequest = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(
            request,
            PaymentRequest::new(
                "123",
                "456",
                Money::from_str("250.50").unwrap(),
                PaymentScheme::FasterPayments
            )
        );
    }
}
