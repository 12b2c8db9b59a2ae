//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A user with this email is already registered.
    #[error("Email already registered")]
    DuplicateEmail,

    /// No registered user has this email.
    #[error("User not found")]
    UserNotFound,

    /// The email is registered but the password does not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Reading or writing the user directory or session failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
