use anyhow::{Context, Result};
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    ffi::OsString,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, warn};

use shared::{
    domain::{FeedbackRecord, RecordId},
    error::StoreError,
};

/// Key under which the whole record list is persisted.
pub const STORAGE_KEY: &str = "registrationFeedback";

/// String-to-string storage in the shape of a browser's `localStorage`.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_string(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key-value store kept in a single JSON object file.
///
/// Every write rewrites the whole file through a sibling temp file, so the
/// file on disk is always either the previous or the new complete document.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        ensure_parent_dir_exists(&path)?;

        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => match serde_json::from_str::<BTreeMap<String, String>>(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    let quarantined = quarantine_malformed_file(&path)?;
                    warn!(
                        path = %path.display(),
                        moved_to = %quarantined.display(),
                        error = %err,
                        "local storage file is malformed; starting empty"
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read local storage file '{}'", path.display())
                })
            }
        };

        info!(path = %path.display(), keys = entries.len(), "opened local storage");
        Ok(Self { path, entries })
    }

    fn write_file(&self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string_pretty(&self.entries)?;
        let temp_path = temp_path_for(&self.path);
        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(encoded.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_string(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(err) = self.write_file() {
            match previous {
                Some(previous) => self.entries.insert(key.to_string(), previous),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(err) = self.write_file() {
            self.entries.insert(key.to_string(), previous);
            return Err(err);
        }
        Ok(())
    }
}

fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for local storage file '{}'",
            parent.display(),
            path.display()
        )
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    with_file_name_suffix(path, ".tmp")
}

fn quarantine_malformed_file(path: &Path) -> Result<PathBuf> {
    let target = with_file_name_suffix(path, ".corrupt");
    fs::rename(path, &target).with_context(|| {
        format!(
            "failed to move malformed local storage file '{}' aside",
            path.display()
        )
    })?;
    Ok(target)
}

fn with_file_name_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("local_storage"));
    name.push(suffix);
    path.with_file_name(name)
}

/// Reads the persisted record list. Absent, unreadable, or malformed data
/// yields an empty list; unusable array elements are skipped one by one.
pub fn load_all<S: KeyValueStore + ?Sized>(backend: &S, key: &str) -> Vec<FeedbackRecord> {
    read_records(backend, key).records
}

/// Key under which an undecodable persisted value is kept before the first
/// flush overwrites `key`.
pub fn backup_key(key: &str) -> String {
    format!("{key}.corrupt")
}

struct LoadedRecords {
    records: Vec<FeedbackRecord>,
    // Raw value that did not decode cleanly, if any.
    unreadable: Option<String>,
}

impl LoadedRecords {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            unreadable: None,
        }
    }
}

fn read_records<S: KeyValueStore + ?Sized>(backend: &S, key: &str) -> LoadedRecords {
    let raw = match backend.get_string(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no persisted feedback records");
            return LoadedRecords::empty();
        }
        Err(err) => {
            warn!(key, error = %err, "failed to read persisted feedback records; starting empty");
            return LoadedRecords::empty();
        }
    };

    if raw.trim().is_empty() {
        return LoadedRecords::empty();
    }

    let elements = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(elements) => elements,
        Err(err) => {
            warn!(key, error = %err, "persisted feedback records are malformed; starting empty");
            return LoadedRecords {
                records: Vec::new(),
                unreadable: Some(raw),
            };
        }
    };

    let total = elements.len();
    let mut records = Vec::with_capacity(total);
    let mut lossy = false;
    for (position, element) in elements.into_iter().enumerate() {
        match element {
            serde_json::Value::Object(_) => {
                match serde_json::from_value::<FeedbackRecord>(element) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        lossy = true;
                        warn!(key, position, error = %err, "skipping undecodable feedback record");
                    }
                }
            }
            serde_json::Value::Null => {
                warn!(key, position, "skipping empty slot in persisted feedback records");
            }
            other => {
                lossy = true;
                warn!(key, position, value = %other, "skipping non-object feedback record");
            }
        }
    }

    rekey_duplicate_ids(&mut records);
    info!(key, count = records.len(), skipped = total - records.len(), "loaded feedback records");
    LoadedRecords {
        records,
        unreadable: lossy.then_some(raw),
    }
}

/// Copies `raw` under [`backup_key`] so the next flush of `key` cannot
/// destroy the only copy.
fn preserve_unreadable<S: KeyValueStore + ?Sized>(backend: &mut S, key: &str, raw: &str) {
    let backup = backup_key(key);
    match backend.set_string(&backup, raw) {
        Ok(()) => warn!(key, backup = %backup, "kept undecodable feedback records aside"),
        Err(err) => error!(
            key,
            backup = %backup,
            error = %err,
            "failed to keep undecodable feedback records aside"
        ),
    }
}

fn rekey_duplicate_ids(records: &mut [FeedbackRecord]) {
    let mut seen = HashSet::new();
    for record in records.iter_mut() {
        if !seen.insert(record.id) {
            record.id = RecordId::new();
            seen.insert(record.id);
        }
    }
}

/// Ordered record list mirrored write-through to a [`KeyValueStore`].
///
/// A mutation whose flush fails is undone in memory before the error is
/// returned, so `records()` never shows state that is not persisted.
#[derive(Debug)]
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
    key: String,
    records: Vec<FeedbackRecord>,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn open(backend: S) -> Self {
        Self::open_with_key(backend, STORAGE_KEY)
    }

    pub fn open_with_key(mut backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let LoadedRecords {
            records,
            unreadable,
        } = read_records(&backend, &key);
        if let Some(raw) = unreadable {
            preserve_unreadable(&mut backend, &key, &raw);
        }
        Self {
            backend,
            key,
            records,
        }
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&FeedbackRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Appends `record` and returns its index. A record whose id is already
    /// present gets a fresh one.
    pub fn append(&mut self, mut record: FeedbackRecord) -> Result<usize, StoreError> {
        if self.position_of(record.id).is_some() {
            record.id = RecordId::new();
        }

        self.records.push(record);
        if let Err(err) = self.flush() {
            self.records.pop();
            return Err(err);
        }

        let index = self.records.len() - 1;
        debug!(index, len = self.records.len(), "appended feedback record");
        Ok(index)
    }

    /// Overwrites the record at `index` and returns the previous one.
    pub fn replace_at(
        &mut self,
        index: usize,
        mut record: FeedbackRecord,
    ) -> Result<FeedbackRecord, StoreError> {
        self.check_index(index)?;
        if matches!(self.position_of(record.id), Some(position) if position != index) {
            record.id = RecordId::new();
        }

        let previous = std::mem::replace(&mut self.records[index], record);
        if let Err(err) = self.flush() {
            self.records[index] = previous;
            return Err(err);
        }

        debug!(index, len = self.records.len(), "replaced feedback record");
        Ok(previous)
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<FeedbackRecord, StoreError> {
        self.check_index(index)?;

        let removed = self.records.remove(index);
        if let Err(err) = self.flush() {
            self.records.insert(index, removed);
            return Err(err);
        }

        debug!(index, len = self.records.len(), "removed feedback record");
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.records.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
        }
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&self.records)?;
        self.backend.set_string(&self.key, &encoded)?;
        debug!(
            key = %self.key,
            count = self.records.len(),
            bytes = encoded.len(),
            "flushed feedback records"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
