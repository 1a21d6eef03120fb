//! Template Catalog - main application orchestrator.
//!
//! Every use case follows the same order:
//! 1. Authorize the actor
//! 2. Validate the request
//! 3. Touch the filesystem (uploads only)
//! 4. Delegate row operations to the repository
//!
//! Reads (`list_*`, `distinct_categories*`) are not gated here; the boundary
//! decides which owner a private read targets.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::TemplateRepository,
        services::{asset_store::AssetStore, authorization::AuthorizationGuard},
    },
    domain::{
        Actor, CategoryFilter, CategoryPath, DEFAULT_ADMIN_ID, DomainError,
        DomainValidator as validator, PageRequest, ScopeFilter, Template, TemplateDraft,
        TemplateId, TemplatePage, TemplateQuery, TemplateScope, UploadedFile,
    },
    error::CatalogResult,
};

/// Upload ceiling applied to template images and thumbnails.
pub const DEFAULT_MAX_UPLOAD_MEGABYTES: u64 = 10;

/// Catalog-wide knobs injected by the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Owner code stamped on every common template.
    pub admin_owner: String,
    pub max_upload_megabytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            admin_owner: DEFAULT_ADMIN_ID.to_string(),
            max_upload_megabytes: DEFAULT_MAX_UPLOAD_MEGABYTES,
        }
    }
}

// ── Requests ──────────────────────────────────────────────────────────────────

/// Filter and window for a list call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTemplatesRequest {
    pub layout_type: Option<String>,
    pub category: CategoryFilter,
    /// 1-based; `<= 0` means the first page.
    pub page: i64,
    /// `<= 0` means the default page size.
    pub size: i64,
}

impl ListTemplatesRequest {
    fn query(&self, scope: ScopeFilter) -> TemplateQuery {
        TemplateQuery::new(scope)
            .layout_type(self.layout_type.clone())
            .category(self.category.clone())
    }
}

/// Input of [`TemplateCatalog::create_common_batch`]. One template per file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateCommonBatchRequest {
    pub name: String,
    pub layout_type: String,
    /// `N` (any case) stores the templates inactive.
    pub use_yn: Option<String>,
    /// Top category level; lower levels are never set on common templates.
    pub category: Option<String>,
    pub layout_json: Option<String>,
    pub files: Vec<UploadedFile>,
}

impl CreateCommonBatchRequest {
    fn active(&self) -> bool {
        !self
            .use_yn
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("n"))
    }
}

/// Input of [`TemplateCatalog::save_private`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePrivateRequest {
    pub name: String,
    pub layout_type: String,
    pub category: CategoryPath,
    /// Background image URL, stored as given.
    pub image_url: Option<String>,
    pub layout_json: Option<String>,
    pub thumbnail: Option<UploadedFile>,
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// What happened to one file of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemOutcome {
    pub file_name: String,
    pub template_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TemplateId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemOutcome {
    pub fn succeeded(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// True when at least one item was created.
    pub success: bool,
    pub total_files: usize,
    pub success_count: usize,
    pub message: String,
    pub items: Vec<BatchItemOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePrivateOutcome {
    pub success: bool,
    pub owner: String,
    pub id: TemplateId,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub success: bool,
    pub id: TemplateId,
    pub name: String,
}

// ── Service ───────────────────────────────────────────────────────────────────

/// List, create and delete use cases over the catalog.
pub struct TemplateCatalog {
    repository: Arc<dyn TemplateRepository>,
    assets: AssetStore,
    guard: AuthorizationGuard,
    settings: CatalogSettings,
}

impl TemplateCatalog {
    pub fn new(
        repository: Arc<dyn TemplateRepository>,
        assets: AssetStore,
        guard: AuthorizationGuard,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            repository,
            assets,
            guard,
            settings,
        }
    }

    pub fn authorization(&self) -> &AuthorizationGuard {
        &self.guard
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// One page of common templates plus the total match count.
    #[instrument(skip(self))]
    pub fn list_common(&self, request: &ListTemplatesRequest) -> CatalogResult<TemplatePage<Template>> {
        self.list(request.query(ScopeFilter::Common), request)
    }

    /// One page of the owner's private templates plus the total match count.
    #[instrument(skip(self))]
    pub fn list_private(
        &self,
        owner: &str,
        request: &ListTemplatesRequest,
    ) -> CatalogResult<TemplatePage<Template>> {
        self.list(request.query(ScopeFilter::private(owner)), request)
    }

    // Page and count are two independent reads; under concurrent writes they
    // may disagree.
    fn list(
        &self,
        query: TemplateQuery,
        request: &ListTemplatesRequest,
    ) -> CatalogResult<TemplatePage<Template>> {
        let window = PageRequest::compute(request.page, request.size);
        let rows = self.repository.select_page(&query, window)?;
        let total = self.repository.count(&query)?;
        Ok(TemplatePage::new(window, total, rows))
    }

    /// Validate and insert a draft. The repository assigns the id.
    pub fn create(&self, mut draft: TemplateDraft) -> CatalogResult<TemplateId> {
        validator::validate_draft(&draft)?;
        draft.group_key = Some(draft.effective_group_key().to_string());
        let id = self.repository.insert(&draft, Utc::now())?;
        info!(%id, name = %draft.name, scope = %draft.scope, "Template created");
        Ok(id)
    }

    /// Store each file and create one common template per file.
    ///
    /// Items succeed or fail independently; `success` means at least one
    /// template was created.
    #[instrument(
        skip_all,
        fields(name = %request.name, files = request.files.len(), actor = ?actor.map(Actor::id))
    )]
    pub fn create_common_batch(
        &self,
        request: CreateCommonBatchRequest,
        actor: Option<&Actor>,
    ) -> CatalogResult<BatchOutcome> {
        self.guard.require_admin(actor, "create common templates")?;

        if request.files.is_empty() {
            return Err(DomainError::EmptyFileList.into());
        }

        // Shared fields are checked once so a bad request writes no files.
        TemplateDraft::new(
            TemplateScope::Common,
            self.settings.admin_owner.as_str(),
            request.name.as_str(),
            request.layout_type.as_str(),
        )
        .validate()?;

        let total_files = request.files.len();
        let items: Vec<BatchItemOutcome> = request
            .files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let template_name = derive_template_name(&request.name, file, index + 1, total_files);
                match self.create_common_item(&request, file, &template_name) {
                    Ok(id) => BatchItemOutcome {
                        file_name: file.display_name().to_string(),
                        template_name,
                        id: Some(id),
                        error: None,
                    },
                    Err(e) => {
                        warn!(file = %file.display_name(), error = %e, "Skipping batch item");
                        BatchItemOutcome {
                            file_name: file.display_name().to_string(),
                            template_name,
                            id: None,
                            error: Some(e.to_string()),
                        }
                    }
                }
            })
            .collect();

        let success_count = items.iter().filter(|item| item.succeeded()).count();
        info!(success_count, total_files, "Common batch processed");

        Ok(BatchOutcome {
            success: success_count > 0,
            total_files,
            success_count,
            message: format!("Created {success_count} of {total_files} common templates"),
            items,
        })
    }

    fn create_common_item(
        &self,
        request: &CreateCommonBatchRequest,
        file: &UploadedFile,
        template_name: &str,
    ) -> CatalogResult<TemplateId> {
        AssetStore::validate_image(file, self.settings.max_upload_megabytes)?;
        let url = self.assets.store(file)?;

        let draft = TemplateDraft::new(
            TemplateScope::Common,
            self.settings.admin_owner.as_str(),
            template_name,
            request.layout_type.as_str(),
        )
        .with_category(CategoryPath::top_level(request.category.clone()))
        .with_image_url(Some(url))
        .with_layout_json(request.layout_json.clone())
        .with_active(request.active());

        self.create(draft)
    }

    /// Save a private template owned by the acting store.
    #[instrument(skip_all, fields(name = %request.name, actor = ?actor.map(Actor::id)))]
    pub fn save_private(
        &self,
        request: SavePrivateRequest,
        actor: Option<&Actor>,
    ) -> CatalogResult<SavePrivateOutcome> {
        let actor = self.guard.require_actor(actor)?;
        let owner = actor.id().to_string();

        let draft = TemplateDraft::new(
            TemplateScope::Private,
            owner.as_str(),
            request.name,
            request.layout_type,
        )
        .with_category(request.category)
        .with_image_url(request.image_url)
        .with_layout_json(request.layout_json);

        validator::validate_private_draft(&draft)?;

        let thumbnail_url = match request.thumbnail.as_ref().filter(|file| !file.is_empty()) {
            Some(file) => {
                AssetStore::validate_image(file, self.settings.max_upload_megabytes)?;
                Some(self.assets.store(file)?)
            }
            None => None,
        };

        let id = self.create(draft.with_thumbnail_url(thumbnail_url.clone()))?;

        Ok(SavePrivateOutcome {
            success: true,
            owner,
            id,
            thumbnail_url,
        })
    }

    /// Remove a template, then its assets.
    ///
    /// Asset deletion is best-effort: a failure leaves an orphaned file but
    /// never a row pointing at a missing one.
    #[instrument(skip(self, actor), fields(actor = ?actor.map(Actor::id)))]
    pub fn delete(&self, id: TemplateId, actor: Option<&Actor>) -> CatalogResult<DeleteOutcome> {
        self.guard.require_admin(actor, "delete templates")?;

        let template = self
            .repository
            .select_by_id(id)?
            .ok_or(ApplicationError::TemplateNotFound { id })?;

        let rows_deleted = self.repository.delete_by_id(id)?;

        if rows_deleted > 0 {
            for url in template.owned_asset_urls() {
                if !self.assets.delete(url) {
                    warn!(%id, url, "Template asset was not removed");
                }
            }
            info!(%id, name = %template.name, "Template deleted");
        }

        Ok(DeleteOutcome {
            success: rows_deleted > 0,
            id,
            name: template.name,
        })
    }

    /// Distinct top-level categories across common templates.
    pub fn distinct_categories(&self) -> CatalogResult<Vec<String>> {
        self.repository.select_distinct_categories(&ScopeFilter::Common)
    }

    /// Distinct top-level categories across one store's private templates.
    pub fn distinct_categories_for(&self, owner: &str) -> CatalogResult<Vec<String>> {
        self.repository
            .select_distinct_categories(&ScopeFilter::private(owner))
    }
}

/// Name for the `index`-th (1-based) file of a batch of `total` files.
///
/// A single file keeps `base` as is. Otherwise the file's base name is
/// appended when it is longer than two characters and not all digits, and
/// the index is appended when it is not.
fn derive_template_name(base: &str, file: &UploadedFile, index: usize, total: usize) -> String {
    if total <= 1 {
        return base.to_string();
    }

    match file.base_name() {
        Some(stem) if stem.chars().count() > 2 && !stem.chars().all(|c| c.is_ascii_digit()) => {
            format!("{base}_{stem}")
        }
        _ => format!("{base}_{index}"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::predicate::*;

    use super::*;
    use crate::application::ports::{MockFilesystem, MockTemplateRepository};
    use crate::domain::AdminSet;
    use crate::error::{CatalogError, ErrorCategory};

    fn catalog(repository: MockTemplateRepository, filesystem: MockFilesystem) -> TemplateCatalog {
        TemplateCatalog::new(
            Arc::new(repository),
            AssetStore::new(Arc::new(filesystem), "/data/uploads", "/uploads/templates"),
            AuthorizationGuard::new(Arc::new(AdminSet::new(["a4"]))),
            CatalogSettings::default(),
        )
    }

    fn writable_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    fn jpeg(name: &str) -> UploadedFile {
        UploadedFile::named(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
    }

    fn batch(files: Vec<UploadedFile>) -> CreateCommonBatchRequest {
        CreateCommonBatchRequest {
            name: "Spring Sale".into(),
            layout_type: "VERTICAL".into(),
            use_yn: Some("Y".into()),
            category: Some("EVENT".into()),
            layout_json: Some(r#"{"blocks":[]}"#.into()),
            files,
        }
    }

    fn stored(id: i64, draft: TemplateDraft) -> Template {
        draft.into_template(TemplateId::new(id), Utc::now())
    }

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn single_file_keeps_name_verbatim() {
        assert_eq!(derive_template_name("Sale", &jpeg("12.jpg"), 1, 1), "Sale");
    }

    #[test]
    fn meaningful_base_name_is_appended() {
        assert_eq!(derive_template_name("Sale", &jpeg("fileA.jpg"), 1, 2), "Sale_fileA");
        assert_eq!(derive_template_name("Sale", &jpeg("봄세일.png"), 2, 2), "Sale_봄세일");
    }

    #[test]
    fn short_or_numeric_base_name_falls_back_to_index() {
        assert_eq!(derive_template_name("Sale", &jpeg("ab.jpg"), 1, 3), "Sale_1");
        assert_eq!(derive_template_name("Sale", &jpeg("20240101.jpg"), 2, 3), "Sale_2");
        let unnamed = UploadedFile::new(None, Some("image/png".into()), vec![1]);
        assert_eq!(derive_template_name("Sale", &unnamed, 3, 3), "Sale_3");
    }

    #[test]
    fn use_yn_maps_to_active() {
        let mut request = batch(vec![]);
        assert!(request.active());
        request.use_yn = Some("n".into());
        assert!(!request.active());
        request.use_yn = None;
        assert!(request.active());
    }

    // ── authorization before side effects ─────────────────────────────────

    #[test]
    fn batch_without_actor_touches_nothing() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();

        let err = catalog(repo, fs)
            .create_common_batch(batch(vec![jpeg("fileA.jpg")]), None)
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Unauthenticated);
    }

    #[test]
    fn batch_by_non_admin_touches_nothing() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let actor = Actor::new("store-7");
        let err = catalog(repo, fs)
            .create_common_batch(batch(vec![jpeg("fileA.jpg")]), Some(&actor))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Forbidden);
    }

    #[test]
    fn non_admin_with_malformed_request_is_still_forbidden() {
        let actor = Actor::new("store-7");
        let mut request = batch(vec![]);
        request.name = String::new();

        let err = catalog(MockTemplateRepository::new(), MockFilesystem::new())
            .create_common_batch(request, Some(&actor))
            .unwrap_err();
        assert_eq!(err.code(), "FORBIDDEN");
    }

    #[test]
    fn delete_by_non_admin_leaves_record() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_select_by_id().never();
        repo.expect_delete_by_id().never();

        let actor = Actor::new("store-7");
        let err = catalog(repo, MockFilesystem::new())
            .delete(TemplateId::new(1), Some(&actor))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Forbidden);
    }

    #[test]
    fn save_private_without_actor_is_unauthenticated() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();

        let err = catalog(repo, MockFilesystem::new())
            .save_private(SavePrivateRequest::default(), None)
            .unwrap_err();
        assert_eq!(err.code(), "UNAUTHENTICATED");
    }

    // ── create ────────────────────────────────────────────────────────────

    #[test]
    fn create_rejects_blank_fields_without_insert() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();
        let catalog = catalog(repo, MockFilesystem::new());

        for (name, layout) in [("", "VERTICAL"), ("Sale", "  "), (" ", "")] {
            let draft = TemplateDraft::new(TemplateScope::Private, "m1", name, layout);
            let err = catalog.create(draft).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::InvalidRequest);
        }
    }

    #[test]
    fn create_defaults_group_key() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert()
            .withf(|draft, _| draft.group_key.as_deref() == Some("001"))
            .times(1)
            .returning(|_, _| Ok(TemplateId::new(9)));

        let draft = TemplateDraft::new(TemplateScope::Private, "m1", "Sale", "VERTICAL")
            .with_group_key(Some("  ".into()));
        let id = catalog(repo, MockFilesystem::new()).create(draft).unwrap();
        assert_eq!(id.value(), 9);
    }

    // ── batch ─────────────────────────────────────────────────────────────

    #[test]
    fn batch_with_no_files_is_invalid() {
        let admin = Actor::new("a4");
        let err = catalog(MockTemplateRepository::new(), MockFilesystem::new())
            .create_common_batch(batch(vec![]), Some(&admin))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Domain(DomainError::EmptyFileList)));
    }

    #[test]
    fn batch_with_blank_name_writes_no_files() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();
        let mut request = batch(vec![jpeg("fileA.jpg")]);
        request.layout_type = " ".into();

        let admin = Actor::new("A4");
        let err = catalog(MockTemplateRepository::new(), fs)
            .create_common_batch(request, Some(&admin))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidRequest);
    }

    #[test]
    fn batch_creates_common_templates_owned_by_admin() {
        let mut repo = MockTemplateRepository::new();
        let mut next = 0;
        repo.expect_insert()
            .withf(|draft, _| {
                draft.scope == TemplateScope::Common
                    && draft.owner == "a4"
                    && draft.created_by == "a4"
                    && draft.category.big() == Some("EVENT")
                    && draft.category.mid.is_none()
                    && draft
                        .image_url
                        .as_deref()
                        .is_some_and(|url| url.starts_with("/uploads/templates/"))
            })
            .times(2)
            .returning(move |_, _| {
                next += 1;
                Ok(TemplateId::new(next))
            });

        let admin = Actor::new("A4");
        let outcome = catalog(repo, writable_fs())
            .create_common_batch(batch(vec![jpeg("fileA.jpg"), jpeg("fileB.jpg")]), Some(&admin))
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.total_files, 2);
        assert_eq!(outcome.success_count, 2);
        let names: Vec<_> = outcome.items.iter().map(|i| i.template_name.as_str()).collect();
        assert_eq!(names, ["Spring Sale_fileA", "Spring Sale_fileB"]);
    }

    #[test]
    fn batch_continues_past_a_bad_item() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_, _| Ok(TemplateId::new(1)));

        let files = vec![
            UploadedFile::named("notes.txt", "text/plain", vec![1]),
            jpeg("poster.jpg"),
        ];
        let admin = Actor::new("a4");
        let outcome = catalog(repo, writable_fs())
            .create_common_batch(batch(files), Some(&admin))
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.success_count, 1);
        assert!(outcome.items[0].error.is_some());
        assert_eq!(outcome.items[1].id, Some(TemplateId::new(1)));
    }

    #[test]
    fn batch_with_every_item_failing_reports_failure() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();

        let files = vec![UploadedFile::named("a.pdf", "application/pdf", vec![1])];
        let admin = Actor::new("a4");
        let outcome = catalog(repo, MockFilesystem::new())
            .create_common_batch(batch(files), Some(&admin))
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.success_count, 0);
        assert_eq!(outcome.total_files, 1);
    }

    #[test]
    fn batch_use_yn_n_stores_inactive() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert()
            .withf(|draft, _| !draft.active)
            .times(1)
            .returning(|_, _| Ok(TemplateId::new(1)));

        let mut request = batch(vec![jpeg("one.jpg")]);
        request.use_yn = Some("N".into());
        let admin = Actor::new("a4");
        catalog(repo, writable_fs())
            .create_common_batch(request, Some(&admin))
            .unwrap();
    }

    // ── save private ──────────────────────────────────────────────────────

    #[test]
    fn save_private_requires_category_big() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();

        let request = SavePrivateRequest {
            name: "Weekend".into(),
            layout_type: "HORIZONTAL".into(),
            category: CategoryPath::new(Some("  ".into()), Some("FRUIT".into()), None, None),
            ..Default::default()
        };
        let actor = Actor::new("m100");
        let err = catalog(repo, MockFilesystem::new())
            .save_private(request, Some(&actor))
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Domain(DomainError::MissingRequiredField { field: "category_big" })
        ));
    }

    #[test]
    fn save_private_stores_thumbnail_and_forces_owner() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert()
            .withf(|draft, _| {
                draft.scope == TemplateScope::Private
                    && draft.owner == "m100"
                    && draft.modified_by == "m100"
                    && draft.thumbnail_url.is_some()
                    && draft.image_url.as_deref() == Some("https://cdn.example.com/bg.png")
            })
            .times(1)
            .returning(|_, _| Ok(TemplateId::new(42)));

        let request = SavePrivateRequest {
            name: "Weekend".into(),
            layout_type: "HORIZONTAL".into(),
            category: CategoryPath::top_level(Some("FOOD".into())),
            image_url: Some("https://cdn.example.com/bg.png".into()),
            layout_json: None,
            thumbnail: Some(jpeg("thumb.jpg")),
        };
        let actor = Actor::new("m100");
        let outcome = catalog(repo, writable_fs())
            .save_private(request, Some(&actor))
            .unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.owner, "m100");
        assert_eq!(outcome.id, TemplateId::new(42));
        assert!(outcome.thumbnail_url.unwrap().ends_with("_thumb.jpg"));
    }

    #[test]
    fn save_private_ignores_empty_thumbnail() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert()
            .withf(|draft, _| draft.thumbnail_url.is_none())
            .returning(|_, _| Ok(TemplateId::new(1)));
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let request = SavePrivateRequest {
            name: "Weekend".into(),
            layout_type: "HORIZONTAL".into(),
            category: CategoryPath::top_level(Some("FOOD".into())),
            thumbnail: Some(UploadedFile::named("thumb.jpg", "image/jpeg", Vec::new())),
            ..Default::default()
        };
        let actor = Actor::new("m100");
        let outcome = catalog(repo, fs).save_private(request, Some(&actor)).unwrap();
        assert_eq!(outcome.thumbnail_url, None);
    }

    #[test]
    fn save_private_rejects_non_image_thumbnail_before_writing() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_insert().never();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let request = SavePrivateRequest {
            name: "Weekend".into(),
            layout_type: "HORIZONTAL".into(),
            category: CategoryPath::top_level(Some("FOOD".into())),
            thumbnail: Some(UploadedFile::named("thumb.gif", "text/html", vec![1])),
            ..Default::default()
        };
        let actor = Actor::new("m100");
        let err = catalog(repo, fs).save_private(request, Some(&actor)).unwrap_err();
        assert!(matches!(err, CatalogError::Domain(DomainError::NotAnImage { .. })));
    }

    // ── delete ────────────────────────────────────────────────────────────

    #[test]
    fn delete_missing_id_is_not_found() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_select_by_id().returning(|_| Ok(None));
        repo.expect_delete_by_id().never();

        let admin = Actor::new("a4");
        let err = catalog(repo, MockFilesystem::new())
            .delete(TemplateId::new(404), Some(&admin))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn delete_removes_row_then_both_assets() {
        let template = stored(
            5,
            TemplateDraft::new(TemplateScope::Common, "a4", "Sale", "VERTICAL")
                .with_image_url(Some("/uploads/templates/bg.jpg".into()))
                .with_thumbnail_url(Some("/uploads/templates/th.jpg".into())),
        );

        let mut repo = MockTemplateRepository::new();
        repo.expect_select_by_id()
            .with(eq(TemplateId::new(5)))
            .returning(move |_| Ok(Some(template.clone())));
        repo.expect_delete_by_id().times(1).returning(|_| Ok(1));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_remove_file()
            .with(eq(Path::new("/data/uploads/bg.jpg")))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_remove_file()
            .with(eq(Path::new("/data/uploads/th.jpg")))
            .times(1)
            .returning(|_| Ok(()));

        let admin = Actor::new("a4");
        let outcome = catalog(repo, fs).delete(TemplateId::new(5), Some(&admin)).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.name, "Sale");
    }

    #[test]
    fn delete_of_private_template_skips_passed_through_image() {
        let template = stored(
            7,
            TemplateDraft::new(TemplateScope::Private, "m100", "Weekend", "HORIZONTAL")
                .with_image_url(Some("/uploads/templates/common-bg.jpg".into()))
                .with_thumbnail_url(Some("/uploads/templates/th.png".into())),
        );

        let mut repo = MockTemplateRepository::new();
        repo.expect_select_by_id()
            .returning(move |_| Ok(Some(template.clone())));
        repo.expect_delete_by_id().times(1).returning(|_| Ok(1));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_remove_file()
            .with(eq(Path::new("/data/uploads/th.png")))
            .times(1)
            .returning(|_| Ok(()));

        let admin = Actor::new("a4");
        let outcome = catalog(repo, fs).delete(TemplateId::new(7), Some(&admin)).unwrap();
        assert!(outcome.success);
    }

    #[test]
    fn delete_succeeds_when_asset_cleanup_fails() {
        let template = stored(
            6,
            TemplateDraft::new(TemplateScope::Common, "a4", "Sale", "VERTICAL")
                .with_image_url(Some("/uploads/templates/gone.jpg".into())),
        );

        let mut repo = MockTemplateRepository::new();
        repo.expect_select_by_id()
            .returning(move |_| Ok(Some(template.clone())));
        repo.expect_delete_by_id().returning(|_| Ok(1));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);

        let admin = Actor::new("a4");
        let outcome = catalog(repo, fs).delete(TemplateId::new(6), Some(&admin)).unwrap();
        assert!(outcome.success);
    }

    // ── reads ─────────────────────────────────────────────────────────────

    #[test]
    fn list_common_resolves_default_window() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_select_page()
            .withf(|query, window| {
                query.scope == ScopeFilter::Common
                    && query.layout_type.as_deref() == Some("VERTICAL")
                    && window.offset() == 0
                    && window.limit() == 20
            })
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_count().returning(|_| Ok(57));

        let request = ListTemplatesRequest {
            layout_type: Some("VERTICAL".into()),
            ..Default::default()
        };
        let page = catalog(repo, MockFilesystem::new()).list_common(&request).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.size, 20);
        assert_eq!(page.total_count, 57);
    }

    #[test]
    fn list_private_scopes_to_owner() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_select_page()
            .withf(|query, window| {
                query.scope == ScopeFilter::private("m100") && window.offset() == 20
            })
            .returning(|_, _| Ok(Vec::new()));
        repo.expect_count().returning(|_| Ok(0));

        let request = ListTemplatesRequest {
            page: 3,
            size: 10,
            ..Default::default()
        };
        let page = catalog(repo, MockFilesystem::new())
            .list_private("m100", &request)
            .unwrap();
        assert_eq!(page.page, 3);
    }

    #[test]
    fn distinct_categories_pass_through_in_order() {
        let mut repo = MockTemplateRepository::new();
        repo.expect_select_distinct_categories()
            .with(eq(ScopeFilter::private("m100")))
            .returning(|_| Ok(vec!["ZETA".into(), "ALPHA".into()]));

        let categories = catalog(repo, MockFilesystem::new())
            .distinct_categories_for("m100")
            .unwrap();
        assert_eq!(categories, ["ZETA", "ALPHA"]);
    }
}
