//! File-backed local key-value store
//!
//! Holds the handful of strings the app persists between runs (session
//! token, last filter snapshot, preferences) as a single JSON object in
//! `{dir}/store.json`. The map is loaded once at construction and kept
//! in memory; every write rewrites the file through a temp-and-rename so
//! a crash mid-write never leaves a truncated store behind.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use orderdesk_core::auth::LocalStore;
use orderdesk_domain::{OrderDeskError, Result, StorageConfig};
use tracing::debug;

const STORE_FILE: &str = "store.json";

/// JSON-file implementation of the local store port.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store under the configured directory.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        Self::open_at(Path::new(&config.dir))
    }

    /// Open (or create) the store under an explicit directory.
    pub fn open_at(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|err| {
            OrderDeskError::Config(format!(
                "Cannot create storage directory {}: {err}",
                dir.display()
            ))
        })?;

        let path = dir.join(STORE_FILE);
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                OrderDeskError::Parse(format!(
                    "Store file {} is not a valid JSON object: {err}",
                    path.display()
                ))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                return Err(OrderDeskError::Internal(format!(
                    "Cannot read store file {}: {err}",
                    path.display()
                )));
            }
        };

        debug!(path = %path.display(), "opened local store");
        Ok(Self { path, entries: Mutex::new(entries) })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|err| OrderDeskError::Internal(format!("Cannot serialize store: {err}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized).map_err(|err| {
            OrderDeskError::Internal(format!("Cannot write store file {}: {err}", tmp.display()))
        })?;
        fs::rename(&tmp, &self.path).map_err(|err| {
            OrderDeskError::Internal(format!(
                "Cannot replace store file {}: {err}",
                self.path.display()
            ))
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}
