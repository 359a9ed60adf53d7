//! CSV batch processing of payment requests.
//!
//! Input rows are `debtor,creditor,amount,scheme`; output rows add the
//! authorization outcome:
//!
//! ```text
//! debtor,creditor,amount,scheme,success,reason
//! 123,456,100,Bacs,true,
//! 789,456,100,Chaps,false,account_not_live
//! ```

use crate::config::AccountStoreFactory;
use crate::error::Result;
use crate::payment::PaymentRequest;
use crate::service::PaymentService;
use csv::{ReaderBuilder, Trim};
use log::warn;
use std::io::{Read, Write};

/// Counts of processed requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub authorized: usize,
    pub rejected: usize,
    /// Rows that could not be parsed and were skipped.
    pub skipped: usize,
}

/// Authorizes every request read from `requests` in order and writes one
/// outcome row per valid request to `output`.
///
/// Invalid rows are logged at warn level and skipped.
pub fn process_requests<F, R, W>(
    service: &mut PaymentService<F>,
    requests: R,
    output: W,
) -> Result<BatchSummary>
where
    F: AccountStoreFactory,
    R: Read,
    W: Write,
{
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(requests);
    let mut csv_writer = csv::Writer::from_writer(output);

    csv_writer.write_record(["debtor", "creditor", "amount", "scheme", "success", "reason"])?;

    let mut summary = BatchSummary::default();

    for (row_idx, result) in csv_reader.deserialize::<PaymentRequest>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        let request = match result {
            Ok(request) => request,
            Err(e) => {
                warn!("Row {}: Invalid payment request: {}", row_num, e);
                summary.skipped += 1;
                continue;
            }
        };

        let outcome = service.authorize(&request)?;
        if outcome.success() {
            summary.authorized += 1;
        } else {
            summary.rejected += 1;
        }

        let amount = request.amount.to_string();
        csv_writer.write_record([
            request.debtor_account_number.as_str(),
            request.creditor_account_number.as_str(),
            amount.as_str(),
            request.scheme.as_str(),
            if outcome.success() { "true" } else { "false" },
            outcome.rejection().map(|r| r.as_str()).unwrap_or(""),
        ])?;
    }

    csv_writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{Account, AccountStatus};
    use crate::config::{ConfiguredStoreFactory, StaticConfiguration};
    use crate::money::Money;
    use crate::scheme::AllowedSchemes;
    use crate::store::InMemoryAccountStore;
    use crate::validation::ValidatorRegistry;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    type TestFactory =
        ConfiguredStoreFactory<StaticConfiguration, InMemoryAccountStore, InMemoryAccountStore>;

    fn service() -> PaymentService<TestFactory> {
        let primary = InMemoryAccountStore::from_accounts([
            Account::new("123", Money::new(dec!(1000)), AllowedSchemes::BACS),
            Account::new(
                "789",
                Money::new(dec!(1000)),
                AllowedSchemes::CHAPS | AllowedSchemes::FASTER_PAYMENTS,
            )
            .with_status(AccountStatus::Disabled),
        ]);
        let factory = ConfiguredStoreFactory::new(
            StaticConfiguration::unset(),
            primary,
            InMemoryAccountStore::new(),
        );
        PaymentService::new(factory, ValidatorRegistry::default())
    }

    fn run(service: &mut PaymentService<TestFactory>, csv: &str) -> (BatchSummary, String) {
        let mut output = Vec::new();
        let summary = process_requests(service, Cursor::new(csv), &mut output).unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_outcome_rows() {
        let csv = "debtor,creditor,amount,scheme
123,456,100,Bacs
789,456,100,Chaps
789,456,250.50,FasterPayments
000,456,1,Bacs";

        let mut service = service();
        let (summary, output) = run(&mut service, csv);

        assert_eq!(
            summary,
            BatchSummary {
                authorized: 2,
                rejected: 2,
                skipped: 0
            }
        );
        assert!(output.starts_with("debtor,creditor,amount,scheme,success,reason\n"));
        assert!(output.contains("123,456,100,Bacs,true,\n"));
        assert!(output.contains("789,456,100,Chaps,false,account_not_live\n"));
        assert!(output.contains("789,456,250.50,FasterPayments,true,\n"));
        assert!(output.contains("000,456,1,Bacs,false,account_not_found\n"));

        let primary = service.store_factory().primary();
        assert_eq!(primary.get("123").unwrap().balance, Money::new(dec!(900)));
        assert_eq!(primary.get("789").unwrap().balance, Money::new(dec!(749.50)));
    }

    #[test]
    fn test_invalid_rows_are_skipped() {
        let csv = "debtor, creditor, amount, scheme
123, 456, lots, Bacs
123, 456, 10, Cheque
123, 456, 10, bacs";

        let mut service = service();
        let (summary, output) = run(&mut service, csv);

        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.authorized, 1);
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("123,456,10,Bacs,true,\n"));
    }

    #[test]
    fn test_requests_applied_in_order() {
        let csv = "debtor,creditor,amount,scheme
123,456,600,Bacs
123,456,600,Bacs";

        let mut service = service();
        let (summary, _) = run(&mut service, csv);

        assert_eq!(summary.authorized, 2);
        assert_eq!(
            service.store_factory().primary().get("123").unwrap().balance,
            Money::new(dec!(-200))
        );
    }
}
