//! Popcat Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the POP
//! template catalog: common (admin-curated) and private (per-store)
//! templates, each backed by an uploaded image and an opaque layout blob.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           popcat-cli (CLI)              │
//! │   (Resolves actor, builds requests)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (TemplateCatalog, AssetStore, Guard)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: TemplateRepository, Filesystem)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     popcat-adapters (Infrastructure)    │
//! │ (InMemoryTemplateStore, LocalFilesystem)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Template, Actor, CategoryFilter, Page) │
//! │         No I/O                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use popcat_core::prelude::*;
//!
//! # fn wire(repository: Arc<dyn TemplateRepository>, filesystem: Arc<dyn Filesystem>) -> CatalogResult<()> {
//! let catalog = TemplateCatalog::new(
//!     repository,
//!     AssetStore::new(filesystem, "./uploads", "/uploads/templates"),
//!     AuthorizationGuard::new(Arc::new(AdminSet::new(["a4"]))),
//!     CatalogSettings::default(),
//! );
//!
//! let page = catalog.list_common(&ListTemplatesRequest::default())?;
//! println!("{} templates", page.total_count);
//! # Ok(())
//! # }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AssetStore, AuthorizationGuard, BatchItemOutcome, BatchOutcome, CatalogSettings,
        CreateCommonBatchRequest, DeleteOutcome, ListTemplatesRequest, SavePrivateOutcome,
        SavePrivateRequest, TemplateCatalog,
        ports::{Filesystem, TemplateRepository},
    };
    pub use crate::domain::{
        Actor, AdminSet, CategoryFilter, CategoryPath, PageRequest, RoleOracle, ScopeFilter,
        Template, TemplateDraft, TemplateId, TemplatePage, TemplateQuery, TemplateScope,
        UploadedFile,
    };
    pub use crate::error::{CatalogError, CatalogResult, ErrorCategory};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
