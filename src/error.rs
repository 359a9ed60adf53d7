//! Error types for the payment authorization crate.
//!
//! Business rejections (unknown account, scheme not allowed, ...) are not errors;
//! they are reported through [`crate::PaymentResult`]. The types here cover hard
//! failures only.

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures raised by stores, codecs and the CLI.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Debiting the account would leave a balance outside the representable range
    #[error("Balance overflow debiting account {account_number}")]
    BalanceOverflow { account_number: String },

    /// Missing input file arguments
    #[error(
        "Missing input file argument. Usage: payment-authorization <accounts.csv> <requests.csv>"
    )]
    MissingArgument,
}

/// Errors produced when parsing domain values from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("unknown payment scheme '{0}'")]
    UnknownScheme(String),
}
