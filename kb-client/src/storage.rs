// kb-client/src/storage.rs
// Persisted client state - a flat string key/value store

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::ClientResult;

/// Keys of every persisted value
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const TOKEN_TYPE: &str = "token_type";
    pub const USER: &str = "user";
    pub const USER_ID: &str = "user_id";
    pub const USERNAME: &str = "username";
    pub const USER_ROLE: &str = "user_role";
    pub const IS_VERIFIED: &str = "is_verified";
    pub const USER_PERMISSIONS: &str = "user_permissions";
    pub const THEME: &str = "theme";
    pub const LANGUAGE: &str = "language";

    /// Everything tied to a login; preferences survive logout
    pub const SESSION_KEYS: &[&str] = &[
        ACCESS_TOKEN,
        REFRESH_TOKEN,
        TOKEN_TYPE,
        USER,
        USER_ID,
        USERNAME,
        USER_ROLE,
        IS_VERIFIED,
        USER_PERMISSIONS,
    ];
}

/// String key/value storage, read synchronously by every view
pub trait Storage: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// Volatile storage, used by tests and one-shot invocations
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        lock(&self.values)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        lock(&self.values)?.remove(key);
        Ok(())
    }
}

type Values = HashMap<String, String>;

fn lock(values: &Mutex<Values>) -> ClientResult<MutexGuard<'_, Values>> {
    values
        .lock()
        .map_err(|_| std::io::Error::other("storage lock poisoned").into())
}

/// JSON-file storage
///
/// The whole map is rewritten on every change. A missing or corrupt file
/// starts empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// File name inside the storage directory
    pub const FILE_NAME: &'static str = "storage.json";

    /// Open (or lazily create) the store under `dir`
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(Self::FILE_NAME);
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(values) => Some(values),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt storage file");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> ClientResult<()> {
        let mut values = lock(&self.values)?;
        f(&mut values);
        self.persist(&values)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.update(|values| {
            values.remove(key);
        })
    }
}
