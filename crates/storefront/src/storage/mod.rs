//! Persistent key-value storage.
//!
//! All durable state (registered users, the active session, per-user carts)
//! lives in a flat string-keyed store with synchronous `get`/`set`/`remove`.
//! Values are JSON documents.
//!
//! # Keys
//!
//! - [`keys::USERS`] - JSON array of every registered user
//! - [`keys::CURRENT_USER`] - JSON record of the active session's user
//! - [`keys::cart`] - JSON array of cart items, one key per user email
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, used by tests
//! - [`FileStore`] - one JSON object file in a data directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage keys shared with previously persisted data.
pub mod keys {
    /// All registered users.
    pub const USERS: &str = "users";

    /// The active session's user.
    pub const CURRENT_USER: &str = "currentUser";

    /// The cart owned by `email`.
    #[must_use]
    pub fn cart(email: &str) -> String {
        format!("cart_{email}")
    }
}

/// Errors that can occur when reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing medium could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value is not valid JSON for the expected type.
    #[error("corrupt value under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized.
    #[error("failed to serialize value: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Another user of the store panicked while holding its lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Durable string-keyed storage with synchronous access.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and deserialize the JSON value under `key`.
///
/// # Errors
///
/// Returns `StorageError::Corrupt` if the stored value does not deserialize
/// as `T`, or any error from the store itself.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: key.to_owned(),
            source,
        })
}

/// Serialize `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Serialize` if `value` cannot be serialized, or any
/// error from the store itself.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(StorageError::Serialize)?;
    store.set(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_key_is_namespaced_by_email() {
        assert_eq!(keys::cart("a@x.com"), "cart_a@x.com");
    }

    #[test]
    fn test_json_helpers_roundtrip() {
        let store = MemoryStore::new();
        write_json(&store, "numbers", &vec![1, 2, 3]).unwrap();

        let numbers: Option<Vec<i32>> = read_json(&store, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_read_json_missing_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<i32>> = read_json(&store, "missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_corrupt_value() {
        let store = MemoryStore::new();
        store.set("numbers", "not json").unwrap();

        let result: Result<Option<Vec<i32>>, _> = read_json(&store, "numbers");
        assert!(matches!(
            result,
            Err(StorageError::Corrupt { ref key, .. }) if key == "numbers"
        ));
    }
}
