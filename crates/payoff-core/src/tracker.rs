use chrono::NaiveDate;
use tracing::{debug, info, warn};

use payoff_domain::{Account, Portfolio};

use crate::{
    account_service::{AccountService, NewAccount},
    storage::{BackupInfo, KeyValueStore, ACCOUNTS_KEY, CREDENTIAL_KEY},
    CoreError,
};

/// Owns the application state and mirrors every mutation to the store.
///
/// Mutations are applied to a copy of the portfolio, which replaces the
/// in-memory state only once it has been written. A failed write leaves
/// both sides as they were. Mutating operations that change nothing
/// (declined input, unknown ids) do not write.
pub struct Tracker {
    portfolio: Portfolio,
    store: Box<dyn KeyValueStore>,
}

impl Tracker {
    /// Loads the account list from `store`, falling back to the seed set.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let portfolio = Self::load(store.as_ref());
        Self { portfolio, store }
    }

    /// Reads accounts; missing, unreadable or malformed data yields the seed set.
    pub fn load(store: &dyn KeyValueStore) -> Portfolio {
        let raw = match store.get(ACCOUNTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no persisted accounts, using seed data");
                return Portfolio::seeded();
            }
            Err(err) => {
                warn!(error = %err, "failed to read persisted accounts, using seed data");
                return Portfolio::seeded();
            }
        };
        match serde_json::from_str::<Portfolio>(&raw) {
            Ok(mut portfolio) => {
                portfolio.normalize();
                debug!(accounts = portfolio.len(), "loaded persisted accounts");
                portfolio
            }
            Err(err) => {
                warn!(error = %err, "persisted accounts are malformed, using seed data");
                Portfolio::seeded()
            }
        }
    }

    /// Serializes the full account list, replacing whatever was stored.
    pub fn save(&self) -> Result<(), CoreError> {
        Self::write(self.store.as_ref(), &self.portfolio)
    }

    fn write(store: &dyn KeyValueStore, portfolio: &Portfolio) -> Result<(), CoreError> {
        let json = serde_json::to_string(portfolio)?;
        store.set(ACCOUNTS_KEY, &json)
    }

    fn commit(&mut self, next: Portfolio) -> Result<(), CoreError> {
        Self::write(self.store.as_ref(), &next)?;
        self.portfolio = next;
        Ok(())
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn accounts(&self) -> &[Account] {
        &self.portfolio.accounts
    }

    /// Owned copy of the accounts, detached from later mutations.
    pub fn snapshot(&self) -> Vec<Account> {
        self.portfolio.accounts.clone()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn create_account(&mut self, draft: &NewAccount) -> Result<Option<String>, CoreError> {
        let mut next = self.portfolio.clone();
        let created = AccountService::create(&mut next, draft);
        if created.is_some() {
            self.commit(next)?;
        }
        Ok(created)
    }

    pub fn delete_account(&mut self, id: &str) -> Result<bool, CoreError> {
        let mut next = self.portfolio.clone();
        let removed = AccountService::delete(&mut next, id);
        if removed {
            self.commit(next)?;
        }
        Ok(removed)
    }

    pub fn record_balance(
        &mut self,
        id: &str,
        balance: f64,
        date: NaiveDate,
    ) -> Result<bool, CoreError> {
        let mut next = self.portfolio.clone();
        let recorded = AccountService::record_balance(&mut next, id, balance, date);
        if recorded {
            self.commit(next)?;
        }
        Ok(recorded)
    }

    /// Clears every account. The previous list is snapshotted first so a
    /// wipe can be undone from the backup list.
    pub fn reset_all(&mut self) -> Result<Option<BackupInfo>, CoreError> {
        let backup = self.store.backup(ACCOUNTS_KEY, Some("before-reset"))?;
        let mut next = self.portfolio.clone();
        AccountService::reset(&mut next);
        self.commit(next)?;
        info!("all accounts cleared");
        Ok(backup)
    }

    pub fn credential(&self) -> Result<Option<String>, CoreError> {
        Ok(self
            .store
            .get(CREDENTIAL_KEY)?
            .filter(|value| !value.trim().is_empty()))
    }

    /// Stores the credential; a blank value removes it.
    pub fn set_credential(&mut self, value: Option<&str>) -> Result<(), CoreError> {
        match value.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => self.store.set(CREDENTIAL_KEY, value),
            None => self.store.remove(CREDENTIAL_KEY),
        }
    }

    pub fn backup(&self, note: Option<&str>) -> Result<Option<BackupInfo>, CoreError> {
        self.save()?;
        self.store.backup(ACCOUNTS_KEY, note)
    }

    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        self.store.list_backups(ACCOUNTS_KEY)
    }

    /// Restores a snapshot of the account list and reloads it.
    pub fn restore_backup(&mut self, backup: &BackupInfo) -> Result<(), CoreError> {
        self.store.restore_backup(backup)?;
        self.portfolio = Self::load(self.store.as_ref());
        info!(backup = %backup.id, "accounts restored from backup");
        Ok(())
    }
}
