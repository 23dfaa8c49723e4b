use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use chrono::Utc;

use crate::CoreError;

/// Key holding the JSON array of accounts.
pub const ACCOUNTS_KEY: &str = "debtTracker_accounts";
/// Key holding the advisory API credential as a plain string.
pub const CREDENTIAL_KEY: &str = "gemini_api_key";

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Describes a persisted snapshot of one key's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    pub id: String,
    pub created_at: String,
}

/// Abstraction over string key-value persistence backends.
///
/// Keys are independent: writing or removing one never touches another.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
    /// Snapshots the current value of `key`. Returns `None` when the key is absent.
    fn backup(&self, key: &str, note: Option<&str>) -> Result<Option<BackupInfo>, CoreError>;
    /// Lists snapshots of `key`, newest first.
    fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &BackupInfo) -> Result<(), CoreError>;
}

/// Process-local store, used by tests and embedders that do not need
/// durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    backups: Mutex<Vec<(BackupInfo, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, CoreError> {
        self.values
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }

    fn backups(&self) -> Result<MutexGuard<'_, Vec<(BackupInfo, String)>>, CoreError> {
        self.backups
            .lock()
            .map_err(|_| CoreError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.values()?.remove(key);
        Ok(())
    }

    fn backup(&self, key: &str, note: Option<&str>) -> Result<Option<BackupInfo>, CoreError> {
        let Some(value) = self.get(key)? else {
            return Ok(None);
        };
        let mut backups = self.backups()?;
        let created_at = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut id = format!("{}_{}_{}", key, created_at, backups.len() + 1);
        if let Some(note) = note.map(str::trim).filter(|note| !note.is_empty()) {
            id.push('_');
            id.push_str(note);
        }
        let info = BackupInfo {
            key: key.to_string(),
            id,
            created_at,
        };
        backups.push((info.clone(), value));
        Ok(Some(info))
    }

    fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        Ok(self
            .backups()?
            .iter()
            .rev()
            .filter(|(info, _)| info.key == key)
            .map(|(info, _)| info.clone())
            .collect())
    }

    fn restore_backup(&self, backup: &BackupInfo) -> Result<(), CoreError> {
        let value = self
            .backups()?
            .iter()
            .find(|(info, _)| info == backup)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| CoreError::BackupNotFound(backup.id.clone()))?;
        self.set(&backup.key, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_independent() {
        let store = MemoryStore::new();
        store.set(ACCOUNTS_KEY, "[]").unwrap();
        store.set(CREDENTIAL_KEY, "secret").unwrap();
        store.remove(ACCOUNTS_KEY).unwrap();

        assert_eq!(store.get(ACCOUNTS_KEY).unwrap(), None);
        assert_eq!(store.get(CREDENTIAL_KEY).unwrap().as_deref(), Some("secret"));
    }

    #[test]
    fn backup_and_restore_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.backup(ACCOUNTS_KEY, None).unwrap().is_none());

        store.set(ACCOUNTS_KEY, "[1]").unwrap();
        let info = store.backup(ACCOUNTS_KEY, Some("before")).unwrap().unwrap();
        store.set(ACCOUNTS_KEY, "[2]").unwrap();

        assert_eq!(store.list_backups(ACCOUNTS_KEY).unwrap(), vec![info.clone()]);
        store.restore_backup(&info).unwrap();
        assert_eq!(store.get(ACCOUNTS_KEY).unwrap().as_deref(), Some("[1]"));
    }
}
