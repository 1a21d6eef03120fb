//! Core domain layer for popcat.
//!
//! Pure catalog rules with no I/O. Persistence and file storage are reached
//! through the ports in `crate::application::ports`.
//!
//! - **No async**: everything here is synchronous
//! - **No I/O**: no filesystem, database, or network calls
//! - **Typed inputs**: requests arrive as structs, never as loose maps
pub mod actor;
pub mod category;
pub mod error;
pub mod pagination;
pub mod template;
pub mod upload;

// Private implementation details - not visible outside domain
mod validation;

pub use actor::{Actor, AdminSet, DEFAULT_ADMIN_ID, RoleOracle};
pub use category::{CategoryFilter, CategoryPath};
pub use error::DomainError;
pub use pagination::{DEFAULT_PAGE_SIZE, PageRequest, TemplatePage};
pub use template::{
    DEFAULT_GROUP_KEY, ScopeFilter, Template, TemplateDraft, TemplateId, TemplateQuery,
    TemplateScope,
};
pub use upload::UploadedFile;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::Utc;

    use super::*;

    fn sample(id: i64, scope: TemplateScope, owner: &str, layout: &str, big: &str) -> Template {
        TemplateDraft::new(scope, owner, format!("tpl-{id}"), layout)
            .with_category(CategoryPath::top_level(Some(big.to_string())))
            .into_template(TemplateId::new(id), Utc::now())
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    #[test]
    fn page_defaults_apply_to_non_positive_input() {
        for page in [-5, -1, 0] {
            for size in [-3, 0] {
                let req = PageRequest::compute(page, size);
                assert_eq!(req.offset(), 0);
                assert_eq!(req.limit(), DEFAULT_PAGE_SIZE);
                assert_eq!(req.page(), 1);
            }
        }
    }

    #[test]
    fn page_offset_is_zero_based_window() {
        let req = PageRequest::compute(3, 15);
        assert_eq!(req.offset(), 30);
        assert_eq!(req.limit(), 15);

        // Non-positive page with explicit size still starts at 0.
        assert_eq!(PageRequest::compute(0, 50).offset(), 0);
        // Non-positive size with later page uses the default for the offset too.
        assert_eq!(PageRequest::compute(2, 0).offset(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn template_page_serializes_boundary_shape() {
        let page = TemplatePage::new(PageRequest::compute(0, 0), 42, Vec::<u8>::new());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["size"], 20);
        assert_eq!(json["totalCount"], 42);
        assert!(json["rows"].as_array().unwrap().is_empty());
    }

    // ========================================================================
    // Actors
    // ========================================================================

    #[test]
    fn admin_set_is_case_insensitive() {
        let admins = AdminSet::new(["a4", " HQ "]);
        assert!(admins.is_admin("A4"));
        assert!(admins.is_admin("hq"));
        assert!(!admins.is_admin("store-17"));
        assert!(!admins.is_admin(""));
    }

    #[test]
    fn admin_set_ignores_blank_entries() {
        let admins = AdminSet::new(["", "  "]);
        assert!(!admins.is_admin(""));
        assert!(!admins.is_admin("  "));
    }

    #[test]
    fn default_admin_set_contains_default_id() {
        assert!(AdminSet::default().is_admin(DEFAULT_ADMIN_ID));
    }

    // ========================================================================
    // Categories
    // ========================================================================

    #[test]
    fn blank_filter_levels_are_unfiltered() {
        let filter = CategoryFilter::any()
            .big(String::new())
            .mid(Some("   ".to_string()));
        assert!(filter.is_unfiltered());
        assert!(filter.matches(&CategoryPath::default()));
    }

    #[test]
    fn filter_levels_match_exactly() {
        let path = CategoryPath::new(
            Some("FOOD".into()),
            Some("FRUIT".into()),
            None,
            None,
        );

        assert!(CategoryFilter::any().big("FOOD".to_string()).matches(&path));
        assert!(!CategoryFilter::any().big("FO".to_string()).matches(&path));
        assert!(!CategoryFilter::any().big("food".to_string()).matches(&path));
        assert!(
            CategoryFilter::any()
                .big("FOOD".to_string())
                .mid("FRUIT".to_string())
                .matches(&path)
        );
        // A constrained level never matches an absent one.
        assert!(!CategoryFilter::any().small("APPLE".to_string()).matches(&path));
    }

    #[test]
    fn category_path_normalises_blank_levels() {
        let path = CategoryPath::new(Some(" ".into()), Some("X".into()), Some(String::new()), None);
        assert_eq!(path.big, None);
        assert_eq!(path.mid.as_deref(), Some("X"));
        assert_eq!(path.small, None);
    }

    // ========================================================================
    // Templates
    // ========================================================================

    #[test]
    fn scope_parses_names_and_legacy_flags() {
        assert_eq!(TemplateScope::from_str("common").unwrap(), TemplateScope::Common);
        assert_eq!(TemplateScope::from_str("Y").unwrap(), TemplateScope::Common);
        assert_eq!(TemplateScope::from_str("PRIVATE").unwrap(), TemplateScope::Private);
        assert_eq!(TemplateScope::from_str("n").unwrap(), TemplateScope::Private);
        assert!(matches!(
            TemplateScope::from_str("public"),
            Err(DomainError::InvalidScope(_))
        ));
    }

    #[test]
    fn draft_requires_name_and_layout() {
        let blank_name = TemplateDraft::new(TemplateScope::Common, "a4", "  ", "VERTICAL");
        assert_eq!(
            blank_name.validate(),
            Err(DomainError::MissingRequiredField { field: "name" })
        );

        let blank_layout = TemplateDraft::new(TemplateScope::Common, "a4", "Sale", "");
        assert_eq!(
            blank_layout.validate(),
            Err(DomainError::MissingRequiredField {
                field: "layout_type"
            })
        );

        assert!(TemplateDraft::new(TemplateScope::Common, "a4", "Sale", "VERTICAL")
            .validate()
            .is_ok());
    }

    #[test]
    fn private_draft_requires_category_big() {
        let draft = TemplateDraft::new(TemplateScope::Private, "store-1", "Sale", "VERTICAL");
        assert_eq!(
            DomainValidator::validate_private_draft(&draft),
            Err(DomainError::MissingRequiredField {
                field: "category_big"
            })
        );

        let draft = draft.with_category(CategoryPath::top_level(Some("EVENT".into())));
        assert!(DomainValidator::validate_private_draft(&draft).is_ok());
    }

    #[test]
    fn group_key_defaults_when_blank() {
        let draft = TemplateDraft::new(TemplateScope::Common, "a4", "Sale", "VERTICAL");
        assert_eq!(draft.effective_group_key(), DEFAULT_GROUP_KEY);

        let draft = draft.with_group_key(Some(" ".into()));
        assert_eq!(draft.effective_group_key(), DEFAULT_GROUP_KEY);

        let draft = draft.with_group_key(Some("007".into()));
        assert_eq!(draft.effective_group_key(), "007");
    }

    #[test]
    fn into_template_stamps_audit_fields() {
        let now = Utc::now();
        let template = TemplateDraft::new(TemplateScope::Private, "store-1", "Sale", "SHOWCARD")
            .into_template(TemplateId::new(9), now);

        assert_eq!(template.id, TemplateId::new(9));
        assert_eq!(template.created_at, now);
        assert_eq!(template.modified_at, now);
        assert_eq!(template.created_by, "store-1");
        assert_eq!(template.modified_by, "store-1");
        assert_eq!(template.group_key, DEFAULT_GROUP_KEY);
        assert!(template.active);
    }

    #[test]
    fn private_background_url_is_not_owned() {
        let private = TemplateDraft::new(TemplateScope::Private, "m100", "Sale", "VERTICAL")
            .with_image_url(Some("/uploads/templates/shared.jpg".into()))
            .with_thumbnail_url(Some("/uploads/templates/thumb.png".into()))
            .into_template(TemplateId::new(2), Utc::now());
        assert_eq!(
            private.owned_asset_urls().collect::<Vec<_>>(),
            ["/uploads/templates/thumb.png"]
        );

        let common = TemplateDraft::new(TemplateScope::Common, "a4", "Sale", "VERTICAL")
            .with_image_url(Some("/uploads/templates/shared.jpg".into()))
            .with_thumbnail_url(Some(String::new()))
            .into_template(TemplateId::new(1), Utc::now());
        assert_eq!(
            common.owned_asset_urls().collect::<Vec<_>>(),
            ["/uploads/templates/shared.jpg"]
        );
    }

    #[test]
    fn query_matches_scope_layout_and_category() {
        let common = sample(1, TemplateScope::Common, "a4", "VERTICAL", "EVENT");
        let mine = sample(2, TemplateScope::Private, "store-1", "VERTICAL", "EVENT");
        let theirs = sample(3, TemplateScope::Private, "store-2", "HORIZONTAL", "FOOD");

        let q = TemplateQuery::new(ScopeFilter::Common).layout_type("VERTICAL".to_string());
        assert!(q.matches(&common));
        assert!(!q.matches(&mine));

        let q = TemplateQuery::new(ScopeFilter::private("store-1"));
        assert!(q.matches(&mine));
        assert!(!q.matches(&theirs));
        assert!(!q.matches(&common));

        let q = TemplateQuery::new(ScopeFilter::private("store-2"))
            .category(CategoryFilter::any().big("EVENT".to_string()));
        assert!(!q.matches(&theirs));
    }

    #[test]
    fn upload_base_name_strips_last_extension() {
        let file = UploadedFile::named("fileA.jpg", "image/jpeg", vec![1]);
        assert_eq!(file.base_name(), Some("fileA"));

        let file = UploadedFile::named("archive.tar.gz", "application/gzip", vec![1]);
        assert_eq!(file.base_name(), Some("archive.tar"));

        let file = UploadedFile::named(".hidden", "image/png", vec![1]);
        assert_eq!(file.base_name(), Some(".hidden"));

        let file = UploadedFile::new(None, None, Vec::new());
        assert_eq!(file.base_name(), None);
        assert_eq!(file.display_name(), "<unnamed>");
    }
}
