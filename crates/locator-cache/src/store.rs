//! Cache backing stores

use crate::model::{CacheEntry, CacheKey};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Backing store for memoized resolutions.
///
/// `record` overwrites any prior entry for the same key: the last successful
/// resolution wins. Liveness checking is the caller's responsibility; the
/// store itself never touches the page.
pub trait CacheStore: Send + Sync {
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry>;
    fn record(&self, key: CacheKey, entry: CacheEntry);
    fn invalidate(&self, key: &CacheKey);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store; cleared at process exit.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.inner.read().get(&key.storage_key()).cloned()
    }

    fn record(&self, key: CacheKey, entry: CacheEntry) {
        self.inner.write().insert(key.storage_key(), entry);
    }

    fn invalidate(&self, key: &CacheKey) {
        self.inner.write().remove(&key.storage_key());
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}

/// Durable store: a flat JSON document keyed by `name#fingerprint`.
///
/// The whole document is deserialized once at construction and rewritten
/// after every mutation. Missing or corrupt data degrades to an empty store;
/// flush failures are logged and swallowed. A crash mid-write can lose the
/// document but never poisons a later run.
pub struct FileStore {
    path: PathBuf,
    inner: RwLock<HashMap<String, CacheEntry>>,
}

impl FileStore {
    /// Open the store at `path`, loading any existing document.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load(&path);
        debug!(path = %path.display(), entries = entries.len(), "locator cache loaded");
        Self {
            path,
            inner: RwLock::new(entries),
        }
    }

    fn load(path: &Path) -> HashMap<String, CacheEntry> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no cache document, starting empty");
                return HashMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "corrupt cache document, starting empty");
                HashMap::new()
            }
        }
    }

    fn flush(&self, entries: &HashMap<String, CacheEntry>) {
        let file = match File::create(&self.path) {
            Ok(file) => file,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "cache flush failed");
                return;
            }
        };
        let writer = BufWriter::new(file);
        if let Err(err) = serde_json::to_writer_pretty(writer, entries) {
            warn!(path = %self.path.display(), error = %err, "cache flush failed");
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheStore for FileStore {
    fn lookup(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.inner.read().get(&key.storage_key()).cloned()
    }

    fn record(&self, key: CacheKey, entry: CacheEntry) {
        let mut entries = self.inner.write();
        entries.insert(key.storage_key(), entry);
        self.flush(&entries);
    }

    fn invalidate(&self, key: &CacheKey) {
        let mut entries = self.inner.write();
        if entries.remove(&key.storage_key()).is_some() {
            self.flush(&entries);
        }
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }
}
