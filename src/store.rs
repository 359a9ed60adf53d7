//! Account storage backends.
//!
//! Two interchangeable stores implement [`AccountStore`]:
//!
//! - [`InMemoryAccountStore`]: the primary store, a map held in memory.
//! - [`CsvAccountStore`]: the backup store, a CSV file rewritten on every update.
//!
//! Both share the CSV layout read by [`read_accounts`] and written by
//! [`write_accounts`]:
//!
//! ```text
//! account_number,balance,allowed_schemes,status
//! 123,1000.00,Bacs|Chaps,Live
//! ```

use crate::account::Account;
use crate::error::Result;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Lookup and update of account records by account number.
pub trait AccountStore {
    /// Returns the account for `account_number`, or `None` if there is none.
    fn lookup(&self, account_number: &str) -> Result<Option<Account>>;

    /// Stores `account`, replacing any record with the same account number.
    fn update(&mut self, account: Account) -> Result<()>;
}

/// The primary store: accounts held in a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: HashMap<String, Account>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `accounts`.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut store = Self::new();
        for account in accounts {
            store.insert(account);
        }
        store
    }

    /// Inserts or replaces an account.
    pub fn insert(&mut self, account: Account) {
        self.accounts.insert(account.account_number.clone(), account);
    }

    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts, sorted by account number.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<_> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.account_number.cmp(&b.account_number));
        accounts
    }
}

impl AccountStore for InMemoryAccountStore {
    fn lookup(&self, account_number: &str) -> Result<Option<Account>> {
        Ok(self.accounts.get(account_number).cloned())
    }

    fn update(&mut self, account: Account) -> Result<()> {
        self.insert(account);
        Ok(())
    }
}

/// The backup store: a CSV file of accounts.
///
/// Lookups are served from memory. Every update writes the whole file to a
/// temporary file in the same directory and renames it over the original; the
/// in-memory copy changes only once that succeeds. Rows that could not be read
/// as accounts are written back as they were read.
#[derive(Debug)]
pub struct CsvAccountStore {
    path: PathBuf,
    accounts: InMemoryAccountStore,
    unreadable: Vec<StringRecord>,
}

impl CsvAccountStore {
    /// Opens the store, loading every valid account row from `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let AccountFile {
            accounts,
            unreadable,
        } = read_accounts(BufReader::new(file))?;
        let accounts = InMemoryAccountStore::from_accounts(accounts);

        debug!(
            "Opened backup account store {} with {} accounts ({} unreadable rows kept)",
            path.display(),
            accounts.len(),
            unreadable.len()
        );

        Ok(CsvAccountStore {
            path,
            accounts,
            unreadable,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    /// All accounts, sorted by account number.
    pub fn accounts(&self) -> Vec<&Account> {
        self.accounts.accounts()
    }

    /// Rows kept verbatim because they are malformed or repeat an account number.
    pub fn unreadable_rows(&self) -> &[StringRecord] {
        &self.unreadable
    }

    fn persist(&self, accounts: &InMemoryAccountStore) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        write_rows(
            BufWriter::new(&mut file),
            accounts.accounts(),
            &self.unreadable,
        )?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl AccountStore for CsvAccountStore {
    fn lookup(&self, account_number: &str) -> Result<Option<Account>> {
        self.accounts.lookup(account_number)
    }

    fn update(&mut self, account: Account) -> Result<()> {
        let mut next = self.accounts.clone();
        next.insert(account);
        self.persist(&next)?;
        self.accounts = next;
        Ok(())
    }
}

/// Accounts read from CSV, together with the rows that were not used.
#[derive(Debug, Default, Clone)]
pub struct AccountFile {
    pub accounts: Vec<Account>,
    /// Malformed rows and repeated account numbers, as read.
    pub unreadable: Vec<StringRecord>,
}

/// Reads accounts from CSV, keeping the rows it cannot use.
///
/// Malformed rows and repeated account numbers are logged at warn level; the
/// first occurrence of an account number wins.
pub fn read_accounts<R: Read>(reader: R) -> Result<AccountFile> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut seen = HashSet::new();
    let mut file = AccountFile::default();

    for (row_idx, record) in csv_reader.records().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row
        let record = record?;

        match record.deserialize::<Account>(Some(&headers)) {
            Ok(account) => {
                if !seen.insert(account.account_number.clone()) {
                    warn!(
                        "Row {}: Duplicate account number {}, ignoring",
                        row_num, account.account_number
                    );
                    file.unreadable.push(record);
                    continue;
                }
                file.accounts.push(account);
            }
            Err(e) => {
                warn!("Row {}: Invalid account record: {}", row_num, e);
                file.unreadable.push(record);
            }
        }
    }

    Ok(file)
}

/// Reads the valid accounts from CSV. See [`read_accounts`].
pub fn load_accounts<R: Read>(reader: R) -> Result<Vec<Account>> {
    Ok(read_accounts(reader)?.accounts)
}

/// Writes accounts as CSV, in the order given.
pub fn write_accounts<'a, W: Write>(
    writer: W,
    accounts: impl IntoIterator<Item = &'a Account>,
) -> Result<()> {
    write_rows(writer, accounts, &[])
}

fn write_rows<'a, W: Write>(
    writer: W,
    accounts: impl IntoIterator<Item = &'a Account>,
    unreadable: &[StringRecord],
) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

    csv_writer.write_record(["account_number", "balance", "allowed_schemes", "status"])?;

    for account in accounts {
        csv_writer.write_record([
            account.account_number.clone(),
            account.balance.to_string(),
            account.allowed_schemes.to_string(),
            account.status.to_string(),
        ])?;
    }

    for record in unreadable {
        csv_writer.write_record(record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
