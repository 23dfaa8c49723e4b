//! payoff-storage-json
//!
//! Filesystem-backed [`KeyValueStore`]: one JSON envelope per key, written
//! atomically, with timestamped backups and retention pruning.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use payoff_core::{
    storage::{BackupInfo, KeyValueStore},
    CoreError,
};
use serde::{Deserialize, Serialize};

const VALUE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Directory layout used by [`JsonStore`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    pub fn under(base: &Path) -> Self {
        Self {
            data_root: base.join("data"),
            backup_root: base.join("backups"),
        }
    }
}

/// On-disk representation of a single key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    key: String,
    value: String,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct JsonStore {
    data_root: PathBuf,
    backup_root: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            data_root: paths.data_root,
            backup_root: paths.backup_root,
            retention: retention.max(1),
        })
    }

    pub fn value_path(&self, key: &str) -> PathBuf {
        self.data_root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }

    pub fn backup_path(&self, key: &str, backup_id: &str) -> PathBuf {
        self.backup_dir(key).join(backup_id)
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backup_root.join(canonical_key(key))
    }

    fn read_envelope(path: &Path) -> Result<StoredValue, CoreError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn next_backup_name(&self, key: &str, note: Option<&str>) -> Result<String, CoreError> {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let same_second = self
            .list_backups(key)?
            .iter()
            .filter(|info| info.id.starts_with(&timestamp))
            .count();
        let mut stem = format!("{}_{:03}", timestamp, same_second + 1);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        Ok(format!("{}.{}", stem, VALUE_EXTENSION))
    }

    fn prune_backups(&self, key: &str) -> Result<(), CoreError> {
        for entry in self.list_backups(key)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(key, &entry.id));
        }
        Ok(())
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(Self::read_envelope(&path)?.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let envelope = StoredValue {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&envelope)?;
        let path = self.value_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.value_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn backup(&self, key: &str, note: Option<&str>) -> Result<Option<BackupInfo>, CoreError> {
        let source = self.value_path(key);
        if !source.exists() {
            return Ok(None);
        }
        let dir = self.backup_dir(key);
        fs::create_dir_all(&dir)?;
        let name = self.next_backup_name(key, note)?;
        fs::copy(&source, dir.join(&name))?;
        self.prune_backups(key)?;
        Ok(Some(backup_info(key, name)))
    }

    fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }
        // Names start with a fixed-width timestamp and sequence number.
        names.sort_by_key(|name| Reverse(name.clone()));
        Ok(names
            .into_iter()
            .map(|name| backup_info(key, name))
            .collect())
    }

    fn restore_backup(&self, backup: &BackupInfo) -> Result<(), CoreError> {
        let path = self.backup_path(&backup.key, &backup.id);
        if !path.exists() {
            return Err(CoreError::BackupNotFound(backup.id.clone()));
        }
        let envelope = Self::read_envelope(&path)?;
        self.set(&backup.key, &envelope.value)
    }
}

fn backup_info(key: &str, name: String) -> BackupInfo {
    let created_at = parse_backup_timestamp(&name)
        .map(|stamp| stamp.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_default();
    BackupInfo {
        key: key.to_string(),
        id: name,
        created_at,
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let mut segments = name.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
