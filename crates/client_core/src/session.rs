//! Session lookup over a persisted key-value store.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use shared::protocol::Session;
use thiserror::Error;

pub const USER_KEY: &str = "user";
pub const JWT_KEY: &str = "jwt";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no signed-in user in the session store")]
    Missing,
    #[error("signed-in user has no email")]
    MissingEmail,
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("session store io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
}

#[derive(Default)]
pub struct MemoryKeyValueStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        let items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut items = self.items.lock().unwrap_or_else(|p| p.into_inner());
        items.remove(key);
        Ok(())
    }
}

/// Key-value store persisted as one JSON object on disk.
///
/// The file is re-read on every access so several processes can share it.
/// A missing file reads as an empty store.
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }
}

/// Reads the signed-in user (and bearer token) out of a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionAccessor {
    store: Arc<dyn KeyValueStore>,
}

impl SessionAccessor {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn current_user(&self) -> Result<Option<Session>, SessionError> {
        match self.store.get_item(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn require_email(&self) -> Result<String, SessionError> {
        let session = self.current_user()?.ok_or(SessionError::Missing)?;
        if session.email.trim().is_empty() {
            return Err(SessionError::MissingEmail);
        }
        Ok(session.email)
    }

    pub fn jwt(&self) -> Result<Option<String>, SessionError> {
        self.store.get_item(JWT_KEY)
    }

    pub fn store_user(&self, session: &Session) -> Result<(), SessionError> {
        self.store
            .set_item(USER_KEY, &serde_json::to_string(session)?)
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.remove_item(USER_KEY)?;
        self.store.remove_item(JWT_KEY)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
