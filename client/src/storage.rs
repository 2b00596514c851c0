//! Durable session storage for the browser build.
//!
//! `localStorage` is looked up per call: it can disappear (private mode,
//! quota) and the handle is not `Send`.

#[cfg(feature = "csr")]
mod browser {
    use homeschool::storage::{DurableStorage, StorageError};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStorage;

    impl BrowserStorage {
        fn local() -> Result<web_sys::Storage, StorageError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| StorageError::Unavailable("localStorage".to_owned()))
        }
    }

    impl DurableStorage for BrowserStorage {
        fn get(&self, key: &str) -> Option<String> {
            Self::local().ok()?.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            Self::local()?
                .set_item(key, value)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Self::local()?
                .remove_item(key)
                .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
        }
    }
}

#[cfg(feature = "csr")]
pub use browser::BrowserStorage;

/// Storage backing the session store in this build.
#[cfg(feature = "csr")]
pub type ClientStorage = BrowserStorage;

/// Native builds (tests, tooling) keep the session in memory.
#[cfg(not(feature = "csr"))]
pub type ClientStorage = homeschool::MemoryStorage;
