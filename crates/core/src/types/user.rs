//! Registered user record.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A locally registered storefront user.
///
/// Users are keyed by `email` (exact, case-sensitive). The password is kept
/// as entered: authentication is a local equality check, not a security
/// boundary. Field names serialize in camelCase to match the stored records.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl User {
    /// Create a new user record.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Whether this record matches the given credentials exactly.
    #[must_use]
    pub fn has_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

// Keeps passwords out of logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
