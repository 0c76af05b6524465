use folio_engine::{FolioError, KeyValueStore};
use web_sys::Storage;

use crate::dom;

/// `localStorage`, or nothing when the browser refuses access
/// (private mode, sandboxed iframe). Every call then fails with
/// [`FolioError::Storage`] and the theme falls back to its default.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = dom::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; theme will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, FolioError> {
        self.storage
            .as_ref()
            .ok_or_else(|| FolioError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, FolioError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| FolioError::Storage(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FolioError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| FolioError::Storage(format!("{err:?}")))
    }
}
