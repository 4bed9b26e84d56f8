use std::{
    collections::HashMap,
    future::Future,
    io,
    ops::Deref,
    path::PathBuf,
    sync::Mutex,
};

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::fs::operations::{read_locked, remove_if_exists, replace_file_atomically};

use super::{
    entities::{DashboardRecord, Entry, EntryPatch},
    error::{ImportError, LoadError},
};

/// Logical key the collection is persisted under.
pub const STORAGE_KEY: &str = "personal_dashboard_v1";

/// Interface for abstracting key-value persistence. Every call reads or writes one whole value.
pub trait EntryStorage {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, io::Error>>;

    fn write(&self, key: &str, contents: &str) -> impl Future<Output = Result<(), io::Error>>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), io::Error>>;
}

impl<T: Deref> EntryStorage for T
where
    T::Target: EntryStorage,
{
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, io::Error>> {
        self.deref().read(key)
    }

    fn write(&self, key: &str, contents: &str) -> impl Future<Output = Result<(), io::Error>> {
        self.deref().write(key, contents)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), io::Error>> {
        self.deref().remove(key)
    }
}

/// Keeps every key as a `<key>.json` file inside a directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Result<Self, io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl EntryStorage for FileStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, io::Error> {
        read_locked(&self.path_for(key)).await
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), io::Error> {
        replace_file_atomically(&self.path_for(key), contents.as_bytes()).await
    }

    async fn remove(&self, key: &str) -> Result<(), io::Error> {
        remove_if_exists(&self.path_for(key)).await
    }
}

/// In-process storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, io::Error> {
        self.values
            .lock()
            .map_err(|_| io::Error::other("memory storage lock was poisoned"))
    }
}

impl EntryStorage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, io::Error> {
        Ok(self.values()?.get(key).cloned())
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), io::Error> {
        self.values()?.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), io::Error> {
        self.values()?.remove(key);
        Ok(())
    }
}

/// Entry collection persisted as one [DashboardRecord] under one key. Every operation reads the
/// whole record and, if it changes anything, writes the whole record back.
pub struct EntryStore<S> {
    storage: S,
    key: String,
}

impl<S: EntryStorage> EntryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted record, reporting why it couldn't be read.
    pub async fn load(&self) -> Result<DashboardRecord, LoadError> {
        let Some(contents) = self.storage.read(self.key()).await? else {
            return Err(LoadError::Missing(self.key().to_string()));
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// Entries in insertion order. Missing or unreadable data reads as an empty collection.
    #[instrument(skip(self), fields(key = %self.key()))]
    pub async fn get_all(&self) -> Vec<Entry> {
        self.read_entries().await.unwrap_or_else(|e| {
            warn!("Falling back to an empty collection: {e}");
            vec![]
        })
    }

    /// The collection every write starts from. A missing record is empty and so is a corrupt one,
    /// which the next write replaces. Failing to read at all is an error, nothing gets written
    /// over data that couldn't be seen.
    pub async fn read_entries(&self) -> Result<Vec<Entry>, LoadError> {
        match self.load().await {
            Ok(record) => Ok(record.entries),
            Err(LoadError::Missing(_)) => {
                debug!("Nothing stored yet");
                Ok(vec![])
            }
            Err(LoadError::Corrupt(e)) => {
                warn!("Stored record is corrupt, treating it as empty: {e}");
                Ok(vec![])
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrites the persisted collection.
    pub async fn save(&self, entries: Vec<Entry>) -> Result<()> {
        let contents = serde_json::to_string(&DashboardRecord { entries })?;
        self.storage.write(self.key(), &contents).await?;
        Ok(())
    }

    /// Adds an entry at the end. Id uniqueness is not checked.
    #[instrument(skip(self, entry), fields(key = %self.key(), id = %entry.id))]
    pub async fn append(&self, entry: Entry) -> Result<()> {
        let mut entries = self.read_entries().await?;
        entries.push(entry);
        self.save(entries).await?;
        info!("Appended entry");
        Ok(())
    }

    /// Merges `patch` into the first entry with `id`. Returns whether anything matched, an
    /// unknown id leaves the store untouched.
    #[instrument(skip(self, patch), fields(key = %self.key()))]
    pub async fn update(&self, id: &str, patch: EntryPatch) -> Result<bool> {
        let mut entries = self.read_entries().await?;
        let Some(entry) = entries.iter_mut().find(|v| v.id == id) else {
            debug!("No entry to update");
            return Ok(false);
        };
        patch.apply_to(entry);
        self.save(entries).await?;
        info!("Updated entry");
        Ok(true)
    }

    /// Deletes every entry with `id` and returns how many were removed.
    #[instrument(skip(self), fields(key = %self.key()))]
    pub async fn remove(&self, id: &str) -> Result<usize> {
        let mut entries = self.read_entries().await?;
        let before = entries.len();
        entries.retain(|v| v.id != id);
        let removed = before - entries.len();
        if removed == 0 {
            debug!("No entry to remove");
            return Ok(0);
        }
        self.save(entries).await?;
        info!("Removed {removed} entries");
        Ok(removed)
    }

    /// Pretty printed `{ "entries": [...] }`.
    pub async fn export(&self) -> Result<String> {
        let record = DashboardRecord {
            entries: self.read_entries().await?,
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Replaces the whole collection with the one in `text`. Returns `false` and leaves the store
    /// as it was when `text` isn't a valid export.
    pub async fn import(&self, text: &str) -> bool {
        match self.try_import(text).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Import rejected: {e}");
                false
            }
        }
    }

    /// Same as [import](Self::import) but reports the reason and the number of imported entries.
    #[instrument(skip(self, text), fields(key = %self.key()))]
    pub async fn try_import(&self, text: &str) -> Result<usize, ImportError> {
        let entries = parse_import(text)?;
        let count = entries.len();
        let contents = serde_json::to_string(&DashboardRecord { entries })
            .map_err(ImportError::InvalidJson)?;
        self.storage.write(self.key(), &contents).await?;
        info!("Imported {count} entries");
        Ok(count)
    }

    /// Forgets everything, the next read is empty.
    #[instrument(skip(self), fields(key = %self.key()))]
    pub async fn reset(&self) -> Result<()> {
        self.storage.remove(self.key()).await?;
        info!("Store reset");
        Ok(())
    }
}

/// Validates the whole import before anything is written so that a bad entry can't leave a half
/// imported collection behind.
fn parse_import(text: &str) -> Result<Vec<Entry>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::InvalidJson)?;
    let entries = match value.get("entries") {
        None => return Err(ImportError::MissingEntries),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(ImportError::EntriesNotArray),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, v)| {
            Entry::deserialize(v).map_err(|source| ImportError::InvalidEntry { index, source })
        })
        .collect()
}
