//! Unified error handling.
//!
//! Provides a unified `AppError` type for the interface boundary. Every error
//! is recoverable: the boundary displays [`AppError::user_message`] and the
//! storefront state is left as it was before the failed operation.

use thiserror::Error;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Persistent store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Whether this error comes from the environment rather than user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Config(_) | Self::Auth(AuthError::Storage(_))
        )
    }

    /// Message suitable for showing to the user.
    ///
    /// Internal details (file paths, parse positions) are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Auth(AuthError::Storage(_)) => {
                "Local storage is unavailable".to_string()
            }
            Self::Auth(err) => err.to_string(),
            Self::Catalog(CatalogError::NotFound(id)) => format!("Product {id} not found"),
            Self::Catalog(CatalogError::Http(_)) => "Network Error".to_string(),
            Self::Catalog(CatalogError::Parse(_) | CatalogError::EmptyResponse) => {
                "Failed to fetch products".to_string()
            }
            Self::Catalog(err) => err.to_string(),
            Self::Config(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized(msg) => msg.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use fakestore_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product-123".to_string());
        assert_eq!(err.to_string(), "Not found: product-123");

        let err = AppError::Unauthorized("log in".to_string());
        assert_eq!(err.to_string(), "Unauthorized: log in");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::from(AuthError::DuplicateEmail).user_message(),
            "Email already registered"
        );
        assert_eq!(
            AppError::from(CatalogError::NotFound(ProductId::new(4))).user_message(),
            "Product 4 not found"
        );
        assert_eq!(
            AppError::Unauthorized("Please log in first".to_string()).user_message(),
            "Please log in first"
        );
    }

    #[test]
    fn test_storage_details_hidden() {
        let io = std::io::Error::other("/home/user/.fakestore/storage.json: permission denied");
        let err = AppError::from(StorageError::from(io));
        assert!(err.is_internal());
        assert_eq!(err.user_message(), "Local storage is unavailable");
        assert!(!AppError::from(AuthError::UserNotFound).is_internal());
    }
}
