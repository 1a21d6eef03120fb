//! In-memory template store.

use std::sync::{
    Arc, RwLock,
    atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Utc};
use popcat_core::{
    application::{ApplicationError, ports::TemplateRepository},
    domain::{PageRequest, ScopeFilter, Template, TemplateDraft, TemplateId, TemplateQuery},
    error::CatalogResult,
};

use super::Rows;

/// Thread-safe in-memory template store.
///
/// Ids come from an atomic sequence starting at 1. Clones share state.
#[derive(Clone)]
pub struct InMemoryTemplateStore {
    inner: Arc<RwLock<Rows>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTemplateStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Rows::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Get the number of templates.
    pub fn len(&self) -> usize {
        self.inner.read().map(|rows| rows.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRepository for InMemoryTemplateStore {
    fn select_page(
        &self,
        query: &TemplateQuery,
        page: PageRequest,
    ) -> CatalogResult<Vec<Template>> {
        let rows = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(super::select_page(&rows, query, page))
    }

    fn count(&self, query: &TemplateQuery) -> CatalogResult<u64> {
        let rows = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(super::count(&rows, query))
    }

    fn insert(
        &self,
        draft: &TemplateDraft,
        stamped_at: DateTime<Utc>,
    ) -> CatalogResult<TemplateId> {
        let mut rows = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let id = TemplateId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        rows.insert(id, draft.clone().into_template(id, stamped_at));
        Ok(id)
    }

    fn select_by_id(&self, id: TemplateId) -> CatalogResult<Option<Template>> {
        let rows = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(rows.get(&id).cloned())
    }

    fn delete_by_id(&self, id: TemplateId) -> CatalogResult<u64> {
        let mut rows = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(u64::from(rows.remove(&id).is_some()))
    }

    fn select_distinct_categories(&self, scope: &ScopeFilter) -> CatalogResult<Vec<String>> {
        let rows = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(super::distinct_categories(&rows, scope))
    }
}
