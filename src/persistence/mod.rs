//! Key-value persistence
//!
//! The game only ever stores small strings (the high score and a settings
//! blob). Browsers get LocalStorage; native builds and tests use memory.

use std::collections::HashMap;

use crate::error::Result;

/// String key-value store supplied by the host
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store
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
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::KeyValueStore;
    use crate::error::{QuizError, Result};

    /// Browser LocalStorage; a missing or blocked storage reads as empty
    pub struct LocalStorage {
        storage: Option<web_sys::Storage>,
    }

    impl LocalStorage {
        pub fn open() -> Self {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten();
            if storage.is_none() {
                log::warn!("LocalStorage unavailable - progress will not persist");
            }
            Self { storage }
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.as_ref()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            let Some(storage) = &self.storage else {
                return Err(QuizError::Storage("LocalStorage unavailable".into()));
            };
            storage
                .set_item(key, value)
                .map_err(|e| QuizError::Storage(format!("{e:?}")))
        }
    }
}
