//! The active session.

use fakestore_core::User;

use super::AuthError;
use crate::storage::{KeyValueStore, keys, read_json, write_json};

/// The currently authenticated user.
///
/// Cart operations take a `&Session` to name the cart's owner explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    /// Start a session for `user`.
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self { user }
    }

    /// The authenticated user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// The authenticated user's email, which also keys their cart.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }
}

/// Persistence for the single active session record under
/// [`keys::CURRENT_USER`].
pub struct SessionStore<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> SessionStore<'a, S> {
    /// Create a session store over `store`.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// The persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be read.
    pub fn current(&self) -> Result<Option<Session>, AuthError> {
        let user: Option<User> = read_json(self.store, keys::CURRENT_USER)?;
        Ok(user.map(Session::new))
    }

    /// Persist `session` as the active session, replacing any other.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be written.
    pub fn establish(&self, session: &Session) -> Result<(), AuthError> {
        write_json(self.store, keys::CURRENT_USER, session.user())?;
        Ok(())
    }

    /// Remove the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the record cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        self.store.remove(keys::CURRENT_USER)?;
        Ok(())
    }
}
