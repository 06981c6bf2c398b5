#![forbid(unsafe_code)]

//! Widget state persistence.
//!
//! [`StateRegistry`] caches serialized widget snapshots keyed by
//! [`StateKey::canonical`](slidekit_widgets::stateful::StateKey::canonical)
//! and delegates durable storage to a [`StorageBackend`].
//!
//! ```text
//!   Slider ──save_widget──► StateRegistry (cache, dirty flag) ──flush──► StorageBackend
//!   Slider ◄─restore_widget─┘                                 ◄──load───  ├─ MemoryStorage
//!                                                                         └─ FileStorage
//! ```
//!
//! # Invariants
//!
//! 1. Storage failures never panic; every fallible call returns [`StorageResult`].
//! 2. File storage writes to a sibling temp file and renames it into place.
//! 3. A stored entry whose version differs from the widget's current
//!    `state_version()`, or whose payload fails to decode, is skipped and the
//!    widget keeps its current state.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Io` | File I/O failure | Returned, cache untouched |
//! | `StorageError::Serialization` | JSON encode failure | Returned |
//! | `StorageError::Corruption` | Unreadable file, poisoned lock | Returned |
//! | `StorageError::Unavailable` | State file directory not writable | Returned, cache stays dirty |
//! | Bad entry payload | Hand-edited or foreign data | Entry skipped, logged |
//!
//! # Feature Gates
//!
//! - `state-persistence` (default): [`FileStorage`], a JSON file with
//!   base64-encoded payloads.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;
use slidekit_widgets::stateful::{Stateful, VersionedState};
use tracing::{debug, trace, warn};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// File system failure.
    Io(std::io::Error),
    /// Payload or file could not be encoded.
    Serialization(String),
    /// Stored data or internal state is unusable.
    Corruption(String),
    /// The backend cannot be used in this environment.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Serialization(msg) => write!(f, "serialization error: {msg}"),
            Self::Corruption(msg) => write!(f, "storage corruption: {msg}"),
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

fn lock<T>(mutex: &Mutex<T>) -> StorageResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StorageError::Corruption("lock poisoned".into()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Backends
// ─────────────────────────────────────────────────────────────────────────────

/// One serialized snapshot with its schema version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredEntry {
    /// Canonical state key, `widget_type::instance_id`.
    pub key: String,
    pub version: u32,
    /// JSON-encoded snapshot.
    pub data: Vec<u8>,
}

/// Entries keyed by canonical state key, in key order.
pub type EntryMap = BTreeMap<String, StoredEntry>;

/// Durable store behind a [`StateRegistry`].
pub trait StorageBackend: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Load every entry. First runs return an empty map.
    fn load_all(&self) -> StorageResult<EntryMap>;

    /// Replace the stored set with `entries`.
    fn save_all(&self, entries: &EntryMap) -> StorageResult<()>;

    /// Remove everything.
    fn clear(&self) -> StorageResult<()>;

    fn is_available(&self) -> bool {
        true
    }
}

/// Process-lifetime storage.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<EntryMap>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries(entries: EntryMap) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn load_all(&self) -> StorageResult<EntryMap> {
        Ok(lock(&self.entries)?.clone())
    }

    fn save_all(&self, entries: &EntryMap) -> StorageResult<()> {
        *lock(&self.entries)? = entries.clone();
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        lock(&self.entries)?.clear();
        Ok(())
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.lock().map(|g| g.len()).unwrap_or(0);
        f.debug_struct("MemoryStorage")
            .field("entries", &count)
            .finish()
    }
}

#[cfg(feature = "state-persistence")]
mod file_storage {
    use std::fs::{self, File};
    use std::io::{BufReader, BufWriter, Write};
    use std::path::{Path, PathBuf};

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Serialize};

    use super::*;

    const FORMAT_VERSION: u32 = 1;

    #[derive(Serialize, Deserialize)]
    struct StateFile {
        format_version: u32,
        entries: BTreeMap<String, FileEntry>,
    }

    #[derive(Serialize, Deserialize)]
    struct FileEntry {
        version: u32,
        data_base64: String,
    }

    /// JSON file storage.
    ///
    /// ```json
    /// {
    ///   "format_version": 1,
    ///   "entries": {
    ///     "Slider::volume": { "version": 1, "data_base64": "eyJ2YWx1ZSI6MC41fQ==" }
    ///   }
    /// }
    /// ```
    ///
    /// Saves write `{path}.tmp`, sync it, then rename over `{path}`.
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        /// The file is created on first save.
        #[must_use]
        pub fn new(path: impl AsRef<Path>) -> Self {
            Self {
                path: path.as_ref().to_path_buf(),
            }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn temp_path(&self) -> PathBuf {
            let mut tmp = self.path.clone().into_os_string();
            tmp.push(".tmp");
            PathBuf::from(tmp)
        }
    }

    impl StorageBackend for FileStorage {
        fn name(&self) -> &str {
            "FileStorage"
        }

        fn load_all(&self) -> StorageResult<EntryMap> {
            if !self.path.exists() {
                return Ok(EntryMap::new());
            }
            let reader = BufReader::new(File::open(&self.path)?);
            let file: StateFile = serde_json::from_reader(reader)
                .map_err(|e| StorageError::Corruption(format!("unreadable state file: {e}")))?;

            if file.format_version != FORMAT_VERSION {
                warn!(
                    stored = file.format_version,
                    expected = FORMAT_VERSION,
                    "state file format mismatch, ignoring stored state"
                );
                return Ok(EntryMap::new());
            }

            let mut entries = EntryMap::new();
            for (key, entry) in file.entries {
                match STANDARD.decode(&entry.data_base64) {
                    Ok(data) => {
                        entries.insert(
                            key.clone(),
                            StoredEntry {
                                key,
                                version: entry.version,
                                data,
                            },
                        );
                    }
                    Err(e) => warn!(key = %key, error = %e, "skipping undecodable state entry"),
                }
            }
            Ok(entries)
        }

        fn save_all(&self, entries: &EntryMap) -> StorageResult<()> {
            if !self.is_available() {
                return Err(StorageError::Unavailable(format!(
                    "{} is not in a writable directory",
                    self.path.display()
                )));
            }
            if let Some(parent) = self.path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }

            let file = StateFile {
                format_version: FORMAT_VERSION,
                entries: entries
                    .iter()
                    .map(|(key, entry)| {
                        (
                            key.clone(),
                            FileEntry {
                                version: entry.version,
                                data_base64: STANDARD.encode(&entry.data),
                            },
                        )
                    })
                    .collect(),
            };

            let tmp = self.temp_path();
            {
                let mut writer = BufWriter::new(File::create(&tmp)?);
                serde_json::to_writer_pretty(&mut writer, &file)?;
                writer.flush()?;
                writer.get_ref().sync_all()?;
            }
            fs::rename(&tmp, &self.path)?;

            debug!(path = %self.path.display(), entries = entries.len(), "saved widget state");
            Ok(())
        }

        fn clear(&self) -> StorageResult<()> {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            Ok(())
        }

        /// Whether the nearest existing ancestor directory is writable.
        /// Only reads metadata; missing directories are created on save.
        fn is_available(&self) -> bool {
            self.path
                .ancestors()
                .skip(1)
                .filter(|dir| !dir.as_os_str().is_empty())
                .find(|dir| dir.exists())
                .is_none_or(|dir| {
                    fs::metadata(dir).is_ok_and(|m| m.is_dir() && !m.permissions().readonly())
                })
        }
    }

    impl fmt::Debug for FileStorage {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("FileStorage")
                .field("path", &self.path)
                .finish()
        }
    }
}

#[cfg(feature = "state-persistence")]
pub use file_storage::FileStorage;

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Cache {
    entries: EntryMap,
    dirty: bool,
}

/// Cache of widget snapshots over a storage backend.
///
/// ```
/// use slidekit_runtime::state_persistence::StateRegistry;
/// use slidekit_widgets::Slider;
///
/// let registry = StateRegistry::in_memory();
/// let slider = Slider::new().with_id("volume").with_value(0.25);
/// registry.save_widget(&slider).unwrap();
///
/// let mut restored = Slider::new().with_id("volume");
/// assert!(registry.restore_widget(&mut restored).unwrap());
/// assert_eq!(restored.value(), 0.25);
/// ```
pub struct StateRegistry {
    backend: Box<dyn StorageBackend>,
    cache: Mutex<Cache>,
}

impl StateRegistry {
    /// Create a registry. Call [`load`](Self::load) to read existing state.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            cache: Mutex::new(Cache::default()),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    #[cfg(feature = "state-persistence")]
    #[must_use]
    pub fn with_file(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(Box::new(FileStorage::new(path)))
    }

    /// Replace the cache with the backend's contents.
    pub fn load(&self) -> StorageResult<usize> {
        let entries = self.backend.load_all()?;
        let count = entries.len();
        *lock(&self.cache)? = Cache {
            entries,
            dirty: false,
        };
        debug!(backend = self.backend.name(), count, "loaded widget state");
        Ok(count)
    }

    /// Write the cache to the backend if it changed. Returns whether a write
    /// happened.
    pub fn flush(&self) -> StorageResult<bool> {
        let mut cache = lock(&self.cache)?;
        if !cache.dirty {
            return Ok(false);
        }
        self.backend.save_all(&cache.entries)?;
        cache.dirty = false;
        Ok(true)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<StoredEntry> {
        lock(&self.cache).ok()?.entries.get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, version: u32, data: Vec<u8>) -> StorageResult<()> {
        let key = key.into();
        let mut cache = lock(&self.cache)?;
        cache
            .entries
            .insert(key.clone(), StoredEntry { key, version, data });
        cache.dirty = true;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> StorageResult<Option<StoredEntry>> {
        let mut cache = lock(&self.cache)?;
        let removed = cache.entries.remove(key);
        cache.dirty |= removed.is_some();
        Ok(removed)
    }

    /// Clear both the backend and the cache.
    pub fn clear(&self) -> StorageResult<()> {
        self.backend.clear()?;
        *lock(&self.cache)? = Cache::default();
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.cache).map(|c| c.entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        lock(&self.cache).map(|c| c.dirty).unwrap_or(false)
    }

    /// Cached keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        lock(&self.cache)
            .map(|c| c.entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    // ── Typed helpers ───────────────────────────────────────────────────────

    /// Serialize a widget's snapshot into the cache.
    pub fn save_widget<W>(&self, widget: &W) -> StorageResult<()>
    where
        W: Stateful,
        W::State: Serialize,
    {
        let key = widget.state_key().canonical();
        let packed = VersionedState::pack(widget);
        let data = serde_json::to_vec(&packed.data)?;
        trace!(key = %key, version = packed.version, bytes = data.len(), "cached widget state");
        self.set(key, packed.version, data)
    }

    /// Restore a widget from the cache.
    ///
    /// Returns `Ok(true)` if a snapshot was applied. Missing entries, version
    /// mismatches and undecodable payloads return `Ok(false)` and leave the
    /// widget untouched.
    pub fn restore_widget<W>(&self, widget: &mut W) -> StorageResult<bool>
    where
        W: Stateful,
        W::State: DeserializeOwned,
    {
        let key = widget.state_key().canonical();
        let Some(entry) = self.get(&key) else {
            trace!(key = %key, "no stored widget state");
            return Ok(false);
        };
        let state = match serde_json::from_slice::<W::State>(&entry.data) {
            Ok(state) => state,
            Err(e) => {
                warn!(key = %key, error = %e, "discarding undecodable widget state");
                return Ok(false);
            }
        };
        match VersionedState::new(entry.version, state).unpack::<W>() {
            Some(state) => {
                widget.restore_state(state);
                Ok(true)
            }
            None => {
                warn!(
                    key = %key,
                    stored = entry.version,
                    expected = W::state_version(),
                    "discarding widget state with mismatched version"
                );
                Ok(false)
            }
        }
    }
}

impl fmt::Debug for StateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRegistry")
            .field("backend", &self.backend.name())
            .field("entries", &self.len())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
