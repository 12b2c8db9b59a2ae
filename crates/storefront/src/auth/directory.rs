//! Registered user directory.

use fakestore_core::User;

use super::AuthError;
use crate::storage::{KeyValueStore, keys, read_json, write_json};

/// Access to the list of registered users.
///
/// The whole directory is stored as one JSON array under [`keys::USERS`] and
/// searched linearly.
pub struct UserDirectory<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UserDirectory<'a, S> {
    /// Create a directory over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All registered users, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the directory cannot be read.
    pub fn all(&self) -> Result<Vec<User>, AuthError> {
        Ok(read_json(self.store, keys::USERS)?.unwrap_or_default())
    }

    /// The user registered under `email` (exact match).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the directory cannot be read.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.all()?.into_iter().find(|u| u.email == email))
    }

    /// Append `user` to the directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is already registered;
    /// the directory is left unchanged.
    /// Returns `AuthError::Storage` if the directory cannot be read or written.
    pub fn insert(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.all()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }

        users.push(user);
        write_json(self.store, keys::USERS, &users)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_empty_directory() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        assert!(users.all().unwrap().is_empty());
        assert!(users.find_by_email("a@x.com").unwrap().is_none());
    }

    #[test]
    fn test_insert_and_find() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.insert(User::new("Ada", "L", "a@x.com", "p")).unwrap();
        users.insert(User::new("Bob", "M", "b@x.com", "q")).unwrap();

        let found = users.find_by_email("b@x.com").unwrap().unwrap();
        assert_eq!(found.first_name, "Bob");
        assert_eq!(users.all().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_email_leaves_directory_unchanged() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.insert(User::new("Ada", "L", "a@x.com", "p")).unwrap();
        let before = store.get(keys::USERS).unwrap();

        let result = users.insert(User::new("Eve", "X", "a@x.com", "other"));
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
        assert_eq!(store.get(keys::USERS).unwrap(), before);
    }

    #[test]
    fn test_email_match_is_case_sensitive() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.insert(User::new("Ada", "L", "a@x.com", "p")).unwrap();
        users.insert(User::new("Ada", "L", "A@x.com", "p")).unwrap();
        assert_eq!(users.all().unwrap().len(), 2);
    }
}
