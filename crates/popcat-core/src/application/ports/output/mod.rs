//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the catalog needs from external systems.
//! The `popcat-adapters` crate provides implementations.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::{PageRequest, ScopeFilter, Template, TemplateDraft, TemplateId, TemplateQuery};
use crate::error::CatalogResult;

/// Port for the filesystem holding uploaded assets.
///
/// Implemented by:
/// - `popcat_adapters::filesystem::LocalFilesystem` (production)
/// - `popcat_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CatalogResult<()>;

    /// Write bytes to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &[u8]) -> CatalogResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> CatalogResult<()>;
}

/// Port for template persistence.
///
/// Implemented by:
/// - `popcat_adapters::template_store::InMemoryTemplateStore`
/// - `popcat_adapters::template_store::JsonFileTemplateStore`
///
/// ## Contract
///
/// - `insert` assigns ids from an atomic, monotonic sequence.
/// - `select_page` and `count` apply [`TemplateQuery::matches`] and nothing
///   else; the two calls are not linked transactionally.
/// - `select_distinct_categories` returns top-level categories already
///   de-duplicated and ordered.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRepository: Send + Sync {
    /// One page of matching templates.
    fn select_page(&self, query: &TemplateQuery, page: PageRequest)
    -> CatalogResult<Vec<Template>>;

    /// Total number of matching templates.
    fn count(&self, query: &TemplateQuery) -> CatalogResult<u64>;

    /// Persist a new template and return its assigned id.
    fn insert(&self, draft: &TemplateDraft, stamped_at: DateTime<Utc>)
    -> CatalogResult<TemplateId>;

    /// Look up a template by id.
    fn select_by_id(&self, id: TemplateId) -> CatalogResult<Option<Template>>;

    /// Delete a template, returning the number of rows removed.
    fn delete_by_id(&self, id: TemplateId) -> CatalogResult<u64>;

    /// Distinct top-level categories among templates in `scope`.
    fn select_distinct_categories(&self, scope: &ScopeFilter) -> CatalogResult<Vec<String>>;
}
