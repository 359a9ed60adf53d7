//! # Payment Authorization
//!
//! Authorizes a single debit payment against an account and applies it,
//! using the business rule of the payment scheme the request names
//! (Bacs, FasterPayments or Chaps).
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: balances and amounts are `rust_decimal` values, never rounded
//! - **Per-scheme rules**: each scheme checks its own subset of conditions
//! - **No side effects on rejection**: the account store is only written after a
//!   successful authorization
//! - **Configurable storage**: the `DataStoreType` setting picks the primary or
//!   backup account store
//!
//! ## Example
//!
//! ```
//! use payment_authorization::{
//!     Account, AllowedSchemes, ConfiguredStoreFactory, InMemoryAccountStore, Money,
//!     PaymentRequest, PaymentScheme, PaymentService, StaticConfiguration,
//!     ValidatorRegistry,
//! };
//! use std::str::FromStr;
//!
//! let primary = InMemoryAccountStore::from_accounts([Account::new(
//!     "123",
//!     Money::from_str("1000").unwrap(),
//!     AllowedSchemes::BACS,
//! )]);
//! let factory = ConfiguredStoreFactory::new(
//!     StaticConfiguration::unset(),
//!     primary,
//!     InMemoryAccountStore::new(),
//! );
//! let mut service = PaymentService::new(factory, ValidatorRegistry::default());
//!
//! let request = PaymentRequest::new(
//!     "123",
//!     "456",
//!     Money::from_str("100").unwrap(),
//!     PaymentScheme::Bacs,
//! );
//! assert!(service.authorize(&request).unwrap().success());
//!
//! let balance = service.store_factory().primary().get("123").unwrap().balance;
//! assert_eq!(balance.to_string(), "900");
//! ```

pub mod account;
pub mod batch;
pub mod config;
pub mod error;
pub mod money;
pub mod payment;
pub mod scheme;
pub mod service;
pub mod store;
pub mod validation;

pub use account::{Account, AccountStatus};
pub use batch::{BatchSummary, process_requests};
pub use config::{
    AccountStoreFactory, ConfigurationSource, ConfiguredStoreFactory, DataStoreKind,
    EnvConfiguration, StaticConfiguration,
};
pub use error::{Error, ParseError, Result};
pub use money::Money;
pub use payment::{PaymentRequest, PaymentResult, Rejection};
pub use scheme::{AllowedSchemes, PaymentScheme};
pub use service::PaymentService;
pub use store::{
    AccountFile, AccountStore, CsvAccountStore, InMemoryAccountStore, load_accounts,
    read_accounts, write_accounts,
};
pub use validation::{SchemeValidator, ValidatorRegistry};
