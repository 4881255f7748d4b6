//! Persisted session record and the key/value store behind it. The store is
//! injected so the login page never touches ambient global storage; tokens are
//! redacted from debug output and must not be logged.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::fmt;
use thiserror::Error;

pub const TOKEN_KEY: &str = "Token";
pub const IS_ADMIN_KEY: &str = "IsAdmin";
pub const UID_KEY: &str = "UID";
pub const USERNAME_KEY: &str = "Username";

/// Every key written by [`Session::save`].
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, IS_ADMIN_KEY, UID_KEY, USERNAME_KEY];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
    #[error("session storage lock poisoned")]
    Poisoned,
}

/// String-keyed durable storage, shaped like a browser's local storage.
pub trait SessionStore: Send + Sync {
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Authenticated identity kept after a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub is_admin: bool,
    pub uid: String,
    pub username: String,
}

impl Session {
    /// Writes all four session keys. Booleans are stored as `"true"`/`"false"`.
    ///
    /// # Errors
    /// Returns an error if any key cannot be written.
    pub fn save(&self, store: &dyn SessionStore) -> Result<(), StoreError> {
        store.set(TOKEN_KEY, &self.token)?;
        store.set(IS_ADMIN_KEY, if self.is_admin { "true" } else { "false" })?;
        store.set(UID_KEY, &self.uid)?;
        store.set(USERNAME_KEY, &self.username)?;
        Ok(())
    }

    /// Reads a complete session. A partially written record reads as `None`.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(store: &dyn SessionStore) -> Result<Option<Self>, StoreError> {
        let (Some(token), Some(is_admin), Some(uid), Some(username)) = (
            store.get(TOKEN_KEY)?,
            store.get(IS_ADMIN_KEY)?,
            store.get(UID_KEY)?,
            store.get(USERNAME_KEY)?,
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            token,
            is_admin: is_admin == "true",
            uid,
            username,
        }))
    }

    /// Removes every session key.
    ///
    /// # Errors
    /// Returns an error if a key cannot be removed.
    pub fn clear(store: &dyn SessionStore) -> Result<(), StoreError> {
        for key in SESSION_KEYS {
            store.remove(key)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("is_admin", &self.is_admin)
            .field("uid", &self.uid)
            .field("username", &self.username)
            .finish()
    }
}
