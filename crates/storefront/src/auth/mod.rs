//! Local authentication.
//!
//! Users register and log in against a directory kept in the key-value store.
//! There is no password hashing, token issuance or expiry: a login is an
//! exact `(email, password)` match against a stored record.

mod directory;
mod error;
mod session;

pub use directory::UserDirectory;
pub use error::AuthError;
pub use session::{Session, SessionStore};

use fakestore_core::User;
use tracing::{info, instrument, warn};

use crate::storage::KeyValueStore;

/// Authentication service.
///
/// Handles registration, login, logout and session restore against the store.
pub struct AuthService<'a, S: ?Sized> {
    users: UserDirectory<'a, S>,
    sessions: SessionStore<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> AuthService<'a, S> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            users: UserDirectory::new(store),
            sessions: SessionStore::new(store),
        }
    }

    /// Register `user` and make it the active session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::DuplicateEmail` if the email is already registered.
    /// Returns `AuthError::Storage` if the store cannot be read or written.
    #[instrument(skip_all, fields(email = %user.email))]
    pub fn register(&self, user: User) -> Result<Session, AuthError> {
        self.users.insert(user.clone()).inspect_err(|e| {
            warn!(error = %e, "Registration rejected");
        })?;

        let session = Session::new(user);
        self.sessions.establish(&session)?;
        info!("User registered");
        Ok(session)
    }

    /// Log in with `email` and `password`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no user has this email.
    /// Returns `AuthError::InvalidCredentials` if the password does not match.
    /// Returns `AuthError::Storage` if the store cannot be read or written.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let users = self.users.all()?;

        let Some(user) = users
            .iter()
            .find(|u| u.has_credentials(email, password))
            .cloned()
        else {
            let err = if users.iter().any(|u| u.email == email) {
                AuthError::InvalidCredentials
            } else {
                AuthError::UserNotFound
            };
            warn!(error = %err, "Login failed");
            return Err(err);
        };

        let session = Session::new(user);
        self.sessions.establish(&session)?;
        info!("User logged in");
        Ok(session)
    }

    /// End the active session. The user's stored cart is kept.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session record cannot be removed.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()?;
        info!("User logged out");
        Ok(())
    }

    /// The session persisted by an earlier run, if any.
    ///
    /// A session whose email is not in the directory is ignored.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session record or the directory
    /// cannot be read.
    pub fn restore(&self) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.sessions.current()? else {
            return Ok(None);
        };

        if self.users.find_by_email(session.email())?.is_none() {
            warn!(email = session.email(), "Stored session has no registered user");
            return Ok(None);
        }
        Ok(Some(session))
    }
}

/// In-memory authentication state observed by the interface.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    session: Option<Session>,
    error: Option<String>,
}

impl AuthState {
    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The active session.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The logged-in user.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(Session::user)
    }

    /// Message from the last failed register or login.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Record a successful register or login.
    pub fn sign_in(&mut self, session: Session) {
        self.session = Some(session);
        self.error = None;
    }

    /// Record a failed register or login. The current session is kept.
    pub fn fail(&mut self, error: &AuthError) {
        self.error = Some(error.to_string());
    }

    /// Record a logout.
    pub fn sign_out(&mut self) {
        self.session = None;
        self.error = None;
    }

    /// Dismiss the last error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, keys};

    fn ada() -> User {
        User::new("Ada", "Lovelace", "a@x.com", "p")
    }

    #[test]
    fn test_register_establishes_session() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let session = auth.register(ada()).unwrap();
        assert_eq!(session.email(), "a@x.com");
        assert_eq!(auth.restore().unwrap(), Some(session));
    }

    #[test]
    fn test_register_duplicate_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(ada()).unwrap();

        let result = auth.register(User::new("Eve", "X", "a@x.com", "other"));
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
        assert_eq!(UserDirectory::new(&store).all().unwrap(), vec![ada()]);
        assert_eq!(auth.restore().unwrap().unwrap().user(), &ada());
    }

    #[test]
    fn test_login_failures() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(ada()).unwrap();
        auth.logout().unwrap();

        assert!(matches!(
            auth.login("a@x.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("b@x.com", "p"),
            Err(AuthError::UserNotFound)
        ));
        assert!(auth.restore().unwrap().is_none());
    }

    #[test]
    fn test_login_success() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register(ada()).unwrap();
        auth.logout().unwrap();

        let session = auth.login("a@x.com", "p").unwrap();
        assert_eq!(session.user().first_name, "Ada");
        assert!(store.get(keys::CURRENT_USER).unwrap().is_some());
    }

    #[test]
    fn test_restore_ignores_unregistered_session() {
        let store = MemoryStore::new();
        SessionStore::new(&store)
            .establish(&Session::new(ada()))
            .unwrap();

        let auth = AuthService::new(&store);
        assert!(auth.restore().unwrap().is_none());

        UserDirectory::new(&store).insert(ada()).unwrap();
        assert_eq!(auth.restore().unwrap().unwrap().email(), "a@x.com");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::DuplicateEmail.to_string(), "Email already registered");
        assert_eq!(AuthError::UserNotFound.to_string(), "User not found");
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_auth_state_transitions() {
        let mut state = AuthState::default();
        assert!(!state.is_authenticated());

        state.fail(&AuthError::UserNotFound);
        assert_eq!(state.error(), Some("User not found"));

        state.sign_in(Session::new(ada()));
        assert!(state.is_authenticated());
        assert!(state.error().is_none());

        state.fail(&AuthError::DuplicateEmail);
        assert!(state.is_authenticated());
        state.clear_error();
        assert!(state.error().is_none());

        state.sign_out();
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }
}
