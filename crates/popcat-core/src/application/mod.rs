//! Application layer for popcat.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TemplateCatalog, AssetStore, AuthorizationGuard)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Request rules live in
//! `crate::domain`; ordering (authorize, validate, write) lives here.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AssetStore, AuthorizationGuard, BatchItemOutcome, BatchOutcome, CatalogSettings,
    CreateCommonBatchRequest, DEFAULT_MAX_UPLOAD_MEGABYTES, DeleteOutcome, ListTemplatesRequest,
    SavePrivateOutcome, SavePrivateRequest, TemplateCatalog,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRepository};

pub use error::ApplicationError;
