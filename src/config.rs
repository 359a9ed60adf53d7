//! Configuration and store selection.
//!
//! A single setting, `DataStoreType`, chooses which account store the payment
//! service talks to. `"Backup"` selects the backup store; anything else,
//! including an absent or empty value, selects the primary store.

use crate::store::AccountStore;
use log::debug;
use std::env;
use std::fmt;

/// Environment variable read by [`EnvConfiguration`].
pub const DATA_STORE_TYPE_VAR: &str = "DATA_STORE_TYPE";

/// Source of the `DataStoreType` setting.
pub trait ConfigurationSource {
    fn data_store_type(&self) -> Option<String>;
}

/// Reads `DataStoreType` from the `DATA_STORE_TYPE` environment variable.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfiguration;

impl ConfigurationSource for EnvConfiguration {
    fn data_store_type(&self) -> Option<String> {
        env::var(DATA_STORE_TYPE_VAR).ok()
    }
}

/// A fixed `DataStoreType` value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StaticConfiguration {
    data_store_type: Option<String>,
}

impl StaticConfiguration {
    pub fn new(data_store_type: impl Into<String>) -> Self {
        StaticConfiguration {
            data_store_type: Some(data_store_type.into()),
        }
    }

    /// No value configured.
    pub fn unset() -> Self {
        Self::default()
    }
}

impl ConfigurationSource for StaticConfiguration {
    fn data_store_type(&self) -> Option<String> {
        self.data_store_type.clone()
    }
}

/// Which account store is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataStoreKind {
    #[default]
    Primary,
    Backup,
}

impl DataStoreKind {
    /// Maps the raw setting to a store kind. Only the exact value `"Backup"`
    /// selects the backup store.
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting {
            Some("Backup") => DataStoreKind::Backup,
            _ => DataStoreKind::Primary,
        }
    }
}

impl fmt::Display for DataStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataStoreKind::Primary => f.write_str("primary"),
            DataStoreKind::Backup => f.write_str("backup"),
        }
    }
}

/// Hands out the account store currently in use.
pub trait AccountStoreFactory {
    fn account_store(&mut self) -> &mut dyn AccountStore;
}

/// Chooses between a primary and a backup store from configuration.
///
/// The configuration is consulted on every call, so a change in the setting
/// takes effect on the next authorization.
#[derive(Debug)]
pub struct ConfiguredStoreFactory<C, P, B> {
    config: C,
    primary: P,
    backup: B,
}

impl<C, P, B> ConfiguredStoreFactory<C, P, B>
where
    C: ConfigurationSource,
    P: AccountStore,
    B: AccountStore,
{
    pub fn new(config: C, primary: P, backup: B) -> Self {
        ConfiguredStoreFactory {
            config,
            primary,
            backup,
        }
    }

    /// The store kind the configuration currently selects.
    pub fn selected_kind(&self) -> DataStoreKind {
        DataStoreKind::from_setting(self.config.data_store_type().as_deref())
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn backup(&self) -> &B {
        &self.backup
    }
}

impl<C, P, B> AccountStoreFactory for ConfiguredStoreFactory<C, P, B>
where
    C: ConfigurationSource,
    P: AccountStore,
    B: AccountStore,
{
    fn account_store(&mut self) -> &mut dyn AccountStore {
        let kind = self.selected_kind();
        debug!("Using {} account store", kind);

        match kind {
            DataStoreKind::Primary => &mut self.primary as &mut dyn AccountStore,
            DataStoreKind::Backup => &mut self.backup as &mut dyn AccountStore,
        }
    }
}
