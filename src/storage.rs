//! Local key-value storage
//!
//! Everything the application persists lives in one string-to-string store,
//! in the manner of a browser's `localStorage`: the serialized history under
//! one key and each preference under its own key.
//!
//! Two implementations are provided:
//!
//! - [`JsonFileStore`] keeps all keys in a single JSON object on disk and
//!   rewrites it atomically on every change
//! - [`MemoryStore`] keeps everything in memory, for tests and throwaway sessions

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Key holding the serialized translation history
pub const HISTORY_KEY: &str = "translationHistory";
/// Key holding the font size preference
pub const FONT_SIZE_KEY: &str = "fontSize";
/// Key holding the offline mode flag
pub const OFFLINE_MODE_KEY: &str = "useOfflineMode";
/// Key holding the theme preference
pub const THEME_MODE_KEY: &str = "themeMode";

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    Io(std::io::Error),
    /// The backing data could not be encoded or decoded
    Serialization(String),
    /// A previous writer panicked while holding the store
    Poisoned,
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Serialization(msg) => write!(f, "Storage serialization error: {}", msg),
            StorageError::Poisoned => write!(f, "Storage lock poisoned"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store shared by the history and preferences
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> StorageResult<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| StorageError::Poisoned)
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.items)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        lock(&self.items)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        lock(&self.items)?.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file
///
/// The whole file is read once when opened. Every change rewrites it through a
/// temporary file in the same directory followed by a rename, so a crash never
/// leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`
    ///
    /// A missing file yields an empty store. A file that is not a JSON object
    /// is logged and treated as empty; it is replaced on the next write.
    ///
    /// # Errors
    /// - The file exists but cannot be read
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(content) => parse_items(&path, &content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            items: Mutex::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> StorageResult<()> {
        let parent_dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, items)?;
            writer.flush()?;
        }
        temp_file
            .persist(&self.path)
            .map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

fn parse_items(path: &Path, content: &str) -> BTreeMap<String, String> {
    let object: Map<String, Value> = match serde_json::from_str(content) {
        Ok(object) => object,
        Err(e) => {
            warn!(
                "Discarding unreadable store '{}': {}",
                path.display(),
                e
            );
            return BTreeMap::new();
        }
    };

    let mut items = BTreeMap::new();
    for (key, value) in object {
        match value {
            Value::String(text) => {
                items.insert(key, text);
            }
            // Tolerate hand-edited files with bare booleans or numbers
            Value::Bool(flag) => {
                items.insert(key, flag.to_string());
            }
            Value::Number(number) => {
                items.insert(key, number.to_string());
            }
            other => warn!("Skipping non-string value for '{}': {}", key, other),
        }
    }
    items
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(lock(&self.items)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut items = lock(&self.items)?;
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        let mut items = lock(&self.items)?;
        if items.remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }
}
