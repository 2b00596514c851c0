//! Durable client-side key-value storage.
//!
//! The session survives reloads by writing three keys (`token`, `role`,
//! `userId`). The browser build implements [`DurableStorage`] over
//! `localStorage`; native builds use [`FileStorage`]; tests use
//! [`MemoryStorage`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const USER_ID_KEY: &str = "userId";

/// Keys owned by the session store.
pub const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, USER_ID_KEY];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be reached (no window, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key-value storage that outlives the process.
pub trait DurableStorage {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the value cannot be written to the backing store.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns an error if the key cannot be removed from the backing store.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// In-process storage. Clones share the same map, so a test can keep a
/// handle and inspect what the session store wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with the given pairs.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { entries: Arc::new(Mutex::new(map)) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{DurableStorage, StorageError};

    /// A JSON object on disk, rewritten whole on every change.
    ///
    /// Writes go to a sibling temp file first and are renamed into place so a
    /// crash never leaves a half-written session file.
    #[derive(Clone, Debug)]
    pub struct FileStorage {
        path: PathBuf,
    }

    impl FileStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match fs::read_to_string(&self.path) {
                Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
                Ok(text) => Ok(serde_json::from_str(&text)?),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        /// Like [`load`](Self::load), but a file that is not valid JSON is
        /// treated as empty so the next write replaces it. The flag reports
        /// whether the file was unreadable and must be rewritten.
        fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), StorageError> {
            match self.load() {
                Ok(entries) => Ok((entries, false)),
                Err(StorageError::Corrupt(e)) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "replacing corrupt session file");
                    Ok((BTreeMap::new(), true))
                }
                Err(e) => Err(e),
            }
        }

        fn store(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let tmp = self.path.with_extension("tmp");
            fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
            fs::rename(&tmp, &self.path)?;
            Ok(())
        }
    }

    impl DurableStorage for FileStorage {
        fn get(&self, key: &str) -> Option<String> {
            match self.load() {
                Ok(mut entries) => entries.remove(key),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                    None
                }
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let (mut entries, _) = self.load_for_write()?;
            entries.insert(key.to_owned(), value.to_owned());
            self.store(&entries)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            let (mut entries, corrupt) = self.load_for_write()?;
            if entries.remove(key).is_some() || corrupt {
                self.store(&entries)?;
            }
            Ok(())
        }
    }
}
