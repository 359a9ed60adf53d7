//! Account model.
//!
//! An account is loaded and stored by an [`crate::store::AccountStore`]; only the
//! payment service changes its balance.

use crate::money::Money;
use crate::scheme::{AllowedSchemes, PaymentScheme};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operational status of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Live,
    Disabled,
    InboundPaymentsOnly,
}

impl AccountStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Live => "Live",
            AccountStatus::Disabled => "Disabled",
            AccountStatus::InboundPaymentsOnly => "InboundPaymentsOnly",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account record keyed by its account number.
///
/// # Negative Balance
///
/// `balance` may become negative. Bacs and Chaps debits are authorized without
/// looking at the balance, so debiting more than the account holds is an
/// expected outcome for those schemes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account number.
    pub account_number: String,

    /// Current balance, exact decimal.
    pub balance: Money,

    /// Schemes this account may use as debtor.
    pub allowed_schemes: AllowedSchemes,

    pub status: AccountStatus,
}

impl Account {
    /// Creates a live account with the given balance and allowed schemes.
    pub fn new(
        account_number: impl Into<String>,
        balance: Money,
        allowed_schemes: AllowedSchemes,
    ) -> Self {
        Account {
            account_number: account_number.into(),
            balance,
            allowed_schemes,
            status: AccountStatus::Live,
        }
    }

    pub fn with_status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    pub fn allows_scheme(&self, scheme: PaymentScheme) -> bool {
        self.allowed_schemes.contains(scheme)
    }

    pub fn is_live(&self) -> bool {
        self.status == AccountStatus::Live
    }

    /// Debits `amount` from the balance.
    ///
    /// Does not check sufficiency; that is a scheme rule. Returns `false` and
    /// leaves the balance untouched if the result is not representable.
    pub fn debit(&mut self, amount: Money) -> bool {
        match self.balance.checked_sub(amount) {
            Some(balance) => {
                self.balance = balance;
                true
            }
            None => false,
        }
    }
}
