//! Template store persisted to a single JSON document.
//!
//! Every operation reads the document from disk, so several handles (or
//! processes) on the same file see each other's writes. Mutations hold an
//! exclusive `flock` on a sidecar `<file>.lock` across the whole
//! read-modify-write, and write to a sibling temp file that is renamed into
//! place, so a crash mid-write leaves the previous document intact.

use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use popcat_core::{
    application::{ApplicationError, ports::TemplateRepository},
    domain::{PageRequest, ScopeFilter, Template, TemplateDraft, TemplateId, TemplateQuery},
    error::{CatalogError, CatalogResult},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Rows;

/// On-disk shape: `{ "nextId": 3, "templates": [...] }`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    next_id: i64,
    templates: Vec<Template>,
}

#[derive(Debug)]
struct State {
    next_id: i64,
    rows: Rows,
}

impl State {
    fn empty() -> Self {
        Self {
            next_id: 1,
            rows: Rows::new(),
        }
    }

    fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            next_id: self.next_id,
            templates: self.rows.values().cloned().collect(),
        }
    }
}

/// Held for the duration of a mutation. Dropping the file releases the flock.
struct LockGuard {
    _file: File,
}

/// File-backed template store used by the CLI.
#[derive(Debug)]
pub struct JsonFileTemplateStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl JsonFileTemplateStore {
    /// Open the catalog at `path`. A missing file is an empty catalog; an
    /// unreadable one is reported here rather than on first use.
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let lock_path = sidecar(&path, ".lock");
        let store = Self { path, lock_path };

        let state = store.load()?;
        debug!(path = %store.path.display(), templates = state.rows.len(), "Catalog opened");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CatalogResult<State> {
        if !self.path.exists() {
            return Ok(State::empty());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| persistence(&self.path, e))?;
        let document: CatalogDocument =
            serde_json::from_str(&raw).map_err(|e| persistence(&self.path, e))?;

        let rows: Rows = document
            .templates
            .into_iter()
            .map(|template| (template.id, template))
            .collect();
        // Never hand out an id that is already on disk.
        let floor = rows.keys().next_back().map_or(1, |id| id.value() + 1);

        Ok(State {
            next_id: document.next_id.max(floor),
            rows,
        })
    }

    fn lock_exclusive(&self) -> CatalogResult<LockGuard> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| persistence(parent, e))?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| persistence(&self.lock_path, e))?;
        file.lock_exclusive()
            .map_err(|e| persistence(&self.lock_path, e))?;

        Ok(LockGuard { _file: file })
    }

    /// Run `mutate` against the current document and write the result back,
    /// all under the exclusive lock.
    fn mutate<T>(
        &self,
        mutate: impl FnOnce(&mut State) -> Option<T>,
    ) -> CatalogResult<Option<T>> {
        let _guard = self.lock_exclusive()?;
        let mut state = self.load()?;

        let Some(out) = mutate(&mut state) else {
            return Ok(None);
        };
        self.persist(&state)?;
        Ok(Some(out))
    }

    fn persist(&self, state: &State) -> CatalogResult<()> {
        let json = serde_json::to_string_pretty(&state.to_document())
            .map_err(|e| persistence(&self.path, e))?;

        let tmp = sidecar(&self.path, ".tmp");
        fs::write(&tmp, json).map_err(|e| persistence(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| persistence(&self.path, e))?;
        Ok(())
    }
}

impl TemplateRepository for JsonFileTemplateStore {
    fn select_page(
        &self,
        query: &TemplateQuery,
        page: PageRequest,
    ) -> CatalogResult<Vec<Template>> {
        let state = self.load()?;
        Ok(super::select_page(&state.rows, query, page))
    }

    fn count(&self, query: &TemplateQuery) -> CatalogResult<u64> {
        let state = self.load()?;
        Ok(super::count(&state.rows, query))
    }

    fn insert(
        &self,
        draft: &TemplateDraft,
        stamped_at: DateTime<Utc>,
    ) -> CatalogResult<TemplateId> {
        let inserted = self.mutate(|state| {
            let id = TemplateId::new(state.next_id);
            state.next_id += 1;
            state.rows.insert(id, draft.clone().into_template(id, stamped_at));
            Some(id)
        })?;

        let id = inserted.ok_or_else(|| persistence(&self.path, "insert produced no row"))?;
        info!(%id, path = %self.path.display(), "Template persisted");
        Ok(id)
    }

    fn select_by_id(&self, id: TemplateId) -> CatalogResult<Option<Template>> {
        let mut state = self.load()?;
        Ok(state.rows.remove(&id))
    }

    fn delete_by_id(&self, id: TemplateId) -> CatalogResult<u64> {
        let removed = self.mutate(|state| state.rows.remove(&id))?;
        Ok(u64::from(removed.is_some()))
    }

    fn select_distinct_categories(&self, scope: &ScopeFilter) -> CatalogResult<Vec<String>> {
        let state = self.load()?;
        Ok(super::distinct_categories(&state.rows, scope))
    }
}

fn sidecar(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn persistence(path: &Path, e: impl std::fmt::Display) -> CatalogError {
    ApplicationError::PersistenceFailed {
        reason: format!("{}: {}", path.display(), e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use popcat_core::domain::{CategoryPath, TemplateScope};
    use popcat_core::error::ErrorCategory;

    use super::*;

    fn draft(name: &str) -> TemplateDraft {
        TemplateDraft::new(TemplateScope::Common, "a4", name, "VERTICAL")
            .with_category(CategoryPath::top_level(Some("EVENT".into())))
    }

    #[test]
    fn missing_file_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTemplateStore::open(dir.path().join("catalog.json")).unwrap();
        assert_eq!(store.count(&TemplateQuery::new(ScopeFilter::Common)).unwrap(), 0);
        assert!(!store.path().exists());
    }

    #[test]
    fn rows_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/catalog.json");

        let store = JsonFileTemplateStore::open(&path).unwrap();
        let first = store.insert(&draft("one"), Utc::now()).unwrap();
        let second = store.insert(&draft("two"), Utc::now()).unwrap();
        store.delete_by_id(first).unwrap();
        drop(store);

        let reopened = JsonFileTemplateStore::open(&path).unwrap();
        assert!(reopened.select_by_id(first).unwrap().is_none());
        assert_eq!(reopened.select_by_id(second).unwrap().unwrap().name, "two");

        // Deleted ids are not reused.
        let third = reopened.insert(&draft("three"), Utc::now()).unwrap();
        assert_eq!(third.value(), 3);
    }

    #[test]
    fn document_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let store = JsonFileTemplateStore::open(&path).unwrap();
        store.insert(&draft("one"), Utc::now()).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["nextId"], 2);
        assert_eq!(doc["templates"][0]["layoutType"], "VERTICAL");
        assert_eq!(doc["templates"][0]["scope"], "common");
        assert!(!dir.path().join("catalog.json.tmp").exists());
    }

    #[test]
    fn stale_next_id_is_raised_above_stored_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let store = JsonFileTemplateStore::open(&path).unwrap();
        store.insert(&draft("one"), Utc::now()).unwrap();
        store.insert(&draft("two"), Utc::now()).unwrap();
        drop(store);

        let raw = fs::read_to_string(&path)
            .unwrap()
            .replace("\"nextId\": 3", "\"nextId\": 1");
        fs::write(&path, raw).unwrap();

        let store = JsonFileTemplateStore::open(&path).unwrap();
        assert_eq!(store.insert(&draft("three"), Utc::now()).unwrap().value(), 3);
    }

    #[test]
    fn two_handles_on_one_file_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let a = JsonFileTemplateStore::open(&path).unwrap();
        let b = JsonFileTemplateStore::open(&path).unwrap();

        let first = a.insert(&draft("from-a"), Utc::now()).unwrap();
        let second = b.insert(&draft("from-b"), Utc::now()).unwrap();
        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);

        let query = TemplateQuery::new(ScopeFilter::Common);
        assert_eq!(a.count(&query).unwrap(), 2);
        assert_eq!(b.select_by_id(first).unwrap().unwrap().name, "from-a");

        assert_eq!(a.delete_by_id(second).unwrap(), 1);
        assert!(b.select_by_id(second).unwrap().is_none());
        assert_eq!(b.delete_by_id(second).unwrap(), 0);

        let reopened = JsonFileTemplateStore::open(&path).unwrap();
        assert_eq!(reopened.count(&query).unwrap(), 1);
        assert!(dir.path().join("catalog.json.lock").exists());
    }

    #[test]
    fn concurrent_inserts_get_distinct_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        let handles: Vec<_> = (0..4)
            .map(|n| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let store = JsonFileTemplateStore::open(&path).unwrap();
                    (0..5)
                        .map(|i| {
                            let name = format!("t{n}-{i}");
                            store.insert(&draft(&name), Utc::now()).unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .map(|id| id.value())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);

        let store = JsonFileTemplateStore::open(&path).unwrap();
        assert_eq!(store.count(&TemplateQuery::new(ScopeFilter::Common)).unwrap(), 20);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, "{not json").unwrap();

        let err = JsonFileTemplateStore::open(&path).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
