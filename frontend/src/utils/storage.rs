//! Durable key-value storage behind a small port so session state can be
//! exercised without a browser.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write `{0}`")]
    Write(String),
    #[error("failed to remove `{0}`")]
    Remove(String),
}

pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{local_storage, BrowserStorage};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::{SessionStorage, StorageError};
    use web_sys::{Storage, Window};

    pub fn window() -> Result<Window, StorageError> {
        web_sys::window().ok_or_else(|| StorageError::Unavailable("No window object".into()))
    }

    pub fn local_storage() -> Result<Storage, StorageError> {
        window()?
            .local_storage()
            .map_err(|_| StorageError::Unavailable("No localStorage".into()))?
            .ok_or_else(|| StorageError::Unavailable("No localStorage".into()))
    }

    /// `window.localStorage`.
    pub struct BrowserStorage {
        storage: Storage,
    }

    impl BrowserStorage {
        pub fn new() -> Result<Self, StorageError> {
            Ok(Self {
                storage: local_storage()?,
            })
        }
    }

    impl SessionStorage for BrowserStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.storage
                .set_item(key, value)
                .map_err(|_| StorageError::Write(key.to_string()))
        }

        fn remove_item(&self, key: &str) -> Result<(), StorageError> {
            self.storage
                .remove_item(key)
                .map_err(|_| StorageError::Remove(key.to_string()))
        }
    }
}

/// The storage backing the running app. Falls back to memory when the
/// browser refuses access to `localStorage` (and always on the host).
pub fn default_storage() -> Rc<dyn SessionStorage> {
    #[cfg(target_arch = "wasm32")]
    {
        match BrowserStorage::new() {
            Ok(storage) => return Rc::new(storage),
            Err(err) => log::warn!("{err}; session will not survive reloads"),
        }
    }
    Rc::new(MemoryStorage::new())
}
