use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use super::Storage;

/// Storage file name inside the data directory
const STORAGE_FILE: &str = "storage.json";

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> Result<MutexGuard<'_, Entries>> {
    entries
        .lock()
        .map_err(|_| anyhow!("Storage lock poisoned"))
}

/// Key-value storage backed by a single JSON object on disk.
///
/// The file is read once when opened and rewritten in full on every change.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileStorage {
    /// Open the storage file in `dir`, creating nothing until the first write.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORAGE_FILE);
        let entries = Self::read_entries(&path);
        debug!(path = %path.display(), count = entries.len(), "Storage opened");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing, unreadable or malformed file counts as empty.
    fn read_entries(path: &Path) -> Entries {
        if !path.exists() {
            return Entries::new();
        }
        let parsed = std::fs::read_to_string(path)
            .context("Failed to read storage file")
            .and_then(|contents| {
                serde_json::from_str::<Entries>(&contents).context("Failed to parse storage file")
            });
        match parsed {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Ignoring unusable storage file");
                Entries::new()
            }
        }
    }

    fn flush(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = lock(&self.entries)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// In-process storage. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<Entries>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}
