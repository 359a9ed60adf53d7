//! Shared helpers for integration tests.

#![allow(dead_code)]

use payment_authorization::{
    Account, AccountStatus, AccountStore, AccountStoreFactory, AllowedSchemes,
    InMemoryAccountStore, Money, PaymentRequest, PaymentScheme, PaymentService, Result,
    ValidatorRegistry,
};
use std::cell::Cell;
use std::str::FromStr;

pub fn money(s: &str) -> Money {
    Money::from_str(s).unwrap()
}

pub fn account(
    number: &str,
    balance: &str,
    allowed: AllowedSchemes,
    status: AccountStatus,
) -> Account {
    Account::new(number, money(balance), allowed).with_status(status)
}

pub fn request(debtor: &str, amount: &str, scheme: PaymentScheme) -> PaymentRequest {
    PaymentRequest::new(debtor, "456", money(amount), scheme)
}

/// Account store that counts lookups and updates.
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryAccountStore,
    pub lookups: Cell<usize>,
    pub updates: usize,
}

impl CountingStore {
    pub fn with_account(account: Account) -> Self {
        let mut store = Self::default();
        store.inner.insert(account);
        store
    }

    pub fn balance(&self, account_number: &str) -> Money {
        self.inner.get(account_number).unwrap().balance
    }
}

impl AccountStore for CountingStore {
    fn lookup(&self, account_number: &str) -> Result<Option<Account>> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.lookup(account_number)
    }

    fn update(&mut self, account: Account) -> Result<()> {
        self.updates += 1;
        self.inner.update(account)
    }
}

impl AccountStoreFactory for CountingStore {
    fn account_store(&mut self) -> &mut dyn AccountStore {
        self
    }
}

pub fn service(store: CountingStore) -> PaymentService<CountingStore> {
    PaymentService::new(store, ValidatorRegistry::default())
}
