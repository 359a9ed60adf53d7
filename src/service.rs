//! Payment authorization service.
//!
//! Runs one payment request through the pipeline:
//!
//! 1. fetch the current account store from the factory
//! 2. look up the debtor account (once)
//! 3. resolve the validator for the requested scheme
//! 4. validate the request against the account
//! 5. debit the balance
//! 6. write the account back (once, only on success)
//!
//! Every rejection short-circuits before step 5, so a rejected payment never
//! touches the store beyond the initial lookup. Store failures are returned as
//! errors; rejections are returned as an unsuccessful [`PaymentResult`].
//!
//! The read in step 2 and the write in step 6 are not guarded against
//! concurrent authorizations for the same account.

use crate::config::AccountStoreFactory;
use crate::error::{Error, Result};
use crate::payment::{PaymentRequest, PaymentResult, Rejection};
use crate::validation::ValidatorRegistry;
use log::{debug, info};

/// Authorizes and applies debit payments.
pub struct PaymentService<F> {
    store_factory: F,
    validators: ValidatorRegistry,
}

impl<F: AccountStoreFactory> PaymentService<F> {
    /// Creates a service over the given store factory and validators.
    pub fn new(store_factory: F, validators: ValidatorRegistry) -> Self {
        PaymentService {
            store_factory,
            validators,
        }
    }

    /// Authorizes `request` and, if allowed, debits the debtor account.
    ///
    /// Returns `Ok` with an unsuccessful result for every business rejection.
    /// Returns `Err` only when the account store fails or the debit cannot be
    /// represented.
    pub fn authorize(&mut self, request: &PaymentRequest) -> Result<PaymentResult> {
        let store = self.store_factory.account_store();
        let account = store.lookup(&request.debtor_account_number)?;

        let Some(validator) = self.validators.resolve(request.scheme) else {
            debug!(
                "No validator registered for {}, rejecting payment from {}",
                request.scheme, request.debtor_account_number
            );
            return Ok(PaymentResult::rejected(Rejection::NoValidatorForScheme));
        };

        if let Err(rejection) = validator.check(account.as_ref(), request) {
            debug!(
                "{} payment of {} from {} rejected: {}",
                request.scheme, request.amount, request.debtor_account_number, rejection
            );
            return Ok(PaymentResult::rejected(rejection));
        }

        // Validators reject a missing account, so one is present here.
        let Some(mut account) = account else {
            return Ok(PaymentResult::rejected(Rejection::AccountNotFound));
        };

        if !account.debit(request.amount) {
            return Err(Error::BalanceOverflow {
                account_number: account.account_number,
            });
        }

        let balance = account.balance;
        store.update(account)?;

        info!(
            "Authorized {} payment of {} from {} to {}, balance now {}",
            request.scheme,
            request.amount,
            request.debtor_account_number,
            request.creditor_account_number,
            balance
        );

        Ok(PaymentResult::authorized())
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    pub fn store_factory(&self) -> &F {
        &self.store_factory
    }

    /// Consumes the service and returns its store factory.
    pub fn into_store_factory(self) -> F {
        self.store_factory
    }
}
