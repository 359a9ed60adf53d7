//! Scheme-specific authorization rules and the registry that selects them.
//!
//! Each scheme checks a different subset of account existence, scheme
//! permission, balance and status:
//!
//! | Scheme         | Allowed scheme | Balance >= amount | Status is Live |
//! |----------------|----------------|-------------------|----------------|
//! | Bacs           | yes            | no                | no             |
//! | FasterPayments | yes            | yes               | no             |
//! | Chaps          | yes            | no                | yes            |
//!
//! The rule sets differ on purpose and must not be merged.

use crate::account::Account;
use crate::payment::{PaymentRequest, Rejection};
use crate::scheme::PaymentScheme;

/// The authorization rule for one payment scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeValidator {
    Bacs,
    FasterPayments,
    Chaps,
}

impl SchemeValidator {
    /// One validator per scheme, in scheme declaration order.
    pub const ALL: [SchemeValidator; 3] = [
        SchemeValidator::Bacs,
        SchemeValidator::FasterPayments,
        SchemeValidator::Chaps,
    ];

    /// The scheme this validator decides for.
    pub const fn scheme(self) -> PaymentScheme {
        match self {
            SchemeValidator::Bacs => PaymentScheme::Bacs,
            SchemeValidator::FasterPayments => PaymentScheme::FasterPayments,
            SchemeValidator::Chaps => PaymentScheme::Chaps,
        }
    }

    /// Returns `true` if `request` may be debited from `account`.
    pub fn allows(self, account: Option<&Account>, request: &PaymentRequest) -> bool {
        self.check(account, request).is_ok()
    }

    /// Like [`allows`](Self::allows), reporting the first rule that failed.
    ///
    /// An absent account is always rejected with [`Rejection::AccountNotFound`].
    pub fn check(
        self,
        account: Option<&Account>,
        request: &PaymentRequest,
    ) -> Result<(), Rejection> {
        let account = account.ok_or(Rejection::AccountNotFound)?;

        match self {
            SchemeValidator::Bacs => check_bacs(account),
            SchemeValidator::FasterPayments => check_faster_payments(account, request),
            SchemeValidator::Chaps => check_chaps(account),
        }
    }
}

fn require_scheme(account: &Account, scheme: PaymentScheme) -> Result<(), Rejection> {
    if account.allows_scheme(scheme) {
        Ok(())
    } else {
        Err(Rejection::SchemeNotAllowed)
    }
}

fn check_bacs(account: &Account) -> Result<(), Rejection> {
    require_scheme(account, PaymentScheme::Bacs)
}

fn check_faster_payments(account: &Account, request: &PaymentRequest) -> Result<(), Rejection> {
    require_scheme(account, PaymentScheme::FasterPayments)?;

    // Paying out the exact balance is allowed.
    if account.balance < request.amount {
        return Err(Rejection::InsufficientFunds);
    }

    Ok(())
}

fn check_chaps(account: &Account) -> Result<(), Rejection> {
    require_scheme(account, PaymentScheme::Chaps)?;

    if !account.is_live() {
        return Err(Rejection::AccountNotLive);
    }

    Ok(())
}

/// Ordered set of active validators.
///
/// Resolution returns the first validator registered for a scheme, in the order
/// the caller supplied them. The set is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRegistry {
    validators: Vec<SchemeValidator>,
}

impl ValidatorRegistry {
    pub fn new(validators: impl IntoIterator<Item = SchemeValidator>) -> Self {
        ValidatorRegistry {
            validators: validators.into_iter().collect(),
        }
    }

    /// Finds the validator for `scheme`, if one is registered.
    pub fn resolve(&self, scheme: PaymentScheme) -> Option<SchemeValidator> {
        self.validators
            .iter()
            .copied()
            .find(|validator| validator.scheme() == scheme)
    }

    pub fn validators(&self) -> &[SchemeValidator] {
        &self.validators
    }
}

/// Registers every scheme's validator.
impl Default for ValidatorRegistry {
    fn default() -> Self {
        ValidatorRegistry::new(SchemeValidator::ALL)
    }
}
