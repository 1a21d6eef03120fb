//! Unified error handling for popcat core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with a stable taxonomy code and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for catalog operations.
///
/// Errors are raised where they are detected and travel to the boundary
/// unchanged. The only failure the core swallows is asset deletion during a
/// template delete.
#[derive(Debug, Error, Clone)]
pub enum CatalogError {
    /// Rejected request (missing field, bad upload).
    #[error("Invalid request: {0}")]
    Domain(#[from] DomainError),

    /// Authorization, lookup, storage and persistence failures.
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl CatalogError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in popcat".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Taxonomy code reported to clients.
    pub fn code(&self) -> &'static str {
        self.category().code()
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::StoreLockError)
                | Self::Application(ApplicationError::StorageFailed { .. })
        )
    }
}

/// Error categories, one per taxonomy code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Unauthenticated,
    Forbidden,
    InvalidRequest,
    NotFound,
    Storage,
    Configuration,
    Internal,
}

impl ErrorCategory {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Storage => "STORAGE_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Convenient result type alias.
pub type CatalogResult<T> = Result<T, CatalogError>;
