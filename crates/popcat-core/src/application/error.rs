//! Application layer errors.
//!
//! These errors represent failures in orchestration, not request shape.
//! Request validation errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateId;
use crate::error::ErrorCategory;

/// Errors that occur during use-case orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No actor was supplied with the call.
    #[error("Authentication required")]
    Unauthenticated,

    /// The actor lacks admin rights for an admin-only operation.
    #[error("Actor '{actor}' may not {action} (admin only)")]
    Forbidden { actor: String, action: &'static str },

    /// The addressed template does not exist.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: TemplateId },

    /// Writing an asset to storage failed.
    #[error("Storage error at {path}: {reason}")]
    StorageFailed { path: PathBuf, reason: String },

    /// The persistence collaborator rejected or failed an operation.
    #[error("Persistence error: {reason}")]
    PersistenceFailed { reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Unauthenticated => vec![
                "Sign in first, or pass --actor <STORE_CODE>".into(),
                "The POPCAT_ACTOR environment variable is read as well".into(),
            ],
            Self::Forbidden { action, .. } => vec![
                format!("Only catalog administrators may {}", action),
                "Ask an administrator, or check admin.ids in your config".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("No template with id {}", id),
                "Try: popcat list common".into(),
            ],
            Self::StorageFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::PersistenceFailed { .. } => vec![
                "Check that the catalog file is readable and writable".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unauthenticated => ErrorCategory::Unauthenticated,
            Self::Forbidden { .. } => ErrorCategory::Forbidden,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::StorageFailed { .. } => ErrorCategory::Storage,
            Self::PersistenceFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
