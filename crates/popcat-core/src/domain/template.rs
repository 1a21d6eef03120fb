//! Template catalog records.
//!
//! ## Lifecycle
//!
//! ```text
//! TemplateDraft ──validate──▶ repository.insert ──▶ Template (id assigned)
//!                                                      │
//!                                          repository.delete_by_id
//!                                                      ▼
//!                                                   (gone)
//! ```
//!
//! There is no update path. A template is written once and later deleted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    category::{CategoryFilter, CategoryPath, non_blank},
    error::DomainError,
};

/// Grouping token stored when the caller does not supply one.
pub const DEFAULT_GROUP_KEY: &str = "001";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ── TemplateId ────────────────────────────────────────────────────────────────

/// Store-assigned identifier. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(i64);

impl TemplateId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}


// ── TemplateScope ─────────────────────────────────────────────────────────────

/// Visibility of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateScope {
    /// Shared by every store, owned by the admin identity.
    Common,
    /// Owned by and visible to a single store.
    Private,
}

impl TemplateScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for TemplateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" | "y" => Ok(Self::Common),
            "private" | "mine" | "n" => Ok(Self::Private),
            other => Err(DomainError::InvalidScope(other.to_string())),
        }
    }
}

// ── Template ──────────────────────────────────────────────────────────────────

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    pub scope: TemplateScope,
    pub owner: String,
    pub name: String,
    pub layout_type: String,
    pub category: CategoryPath,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Stored and returned verbatim, never parsed here.
    pub layout_json: Option<String>,
    pub active: bool,
    pub group_key: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub modified_by: String,
    pub modified_at: DateTime<Utc>,
}

impl Template {
    /// URLs of the assets this template's own writes stored.
    ///
    /// A private template's `image_url` is passed through from the caller
    /// and may point at another template's asset, so only the thumbnail is
    /// owned there. A common template owns the image its batch uploaded.
    pub fn owned_asset_urls(&self) -> impl Iterator<Item = &str> {
        let image = match self.scope {
            TemplateScope::Common => self.image_url.as_deref(),
            TemplateScope::Private => None,
        };
        [image, self.thumbnail_url.as_deref()]
            .into_iter()
            .flatten()
            .filter(|url| !url.is_empty())
    }
}

// ── TemplateDraft ─────────────────────────────────────────────────────────────

/// Input for creating a template. Everything except the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDraft {
    pub scope: TemplateScope,
    pub owner: String,
    pub name: String,
    pub layout_type: String,
    pub category: CategoryPath,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub layout_json: Option<String>,
    pub active: bool,
    pub group_key: Option<String>,
    pub created_by: String,
    pub modified_by: String,
}

impl TemplateDraft {
    /// Start a draft. Audit fields default to the owner; `active` to true.
    pub fn new(
        scope: TemplateScope,
        owner: impl Into<String>,
        name: impl Into<String>,
        layout_type: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        Self {
            scope,
            created_by: owner.clone(),
            modified_by: owner.clone(),
            owner,
            name: name.into(),
            layout_type: layout_type.into(),
            category: CategoryPath::default(),
            image_url: None,
            thumbnail_url: None,
            layout_json: None,
            active: true,
            group_key: None,
        }
    }

    pub fn with_category(mut self, category: CategoryPath) -> Self {
        self.category = category;
        self
    }

    pub fn with_image_url(mut self, url: Option<String>) -> Self {
        self.image_url = non_blank(url);
        self
    }

    pub fn with_thumbnail_url(mut self, url: Option<String>) -> Self {
        self.thumbnail_url = non_blank(url);
        self
    }

    pub fn with_layout_json(mut self, json: Option<String>) -> Self {
        self.layout_json = json;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_group_key(mut self, group_key: Option<String>) -> Self {
        self.group_key = group_key;
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if is_blank(&self.name) {
            return Err(DomainError::MissingRequiredField { field: "name" });
        }
        if is_blank(&self.layout_type) {
            return Err(DomainError::MissingRequiredField {
                field: "layout_type",
            });
        }
        Ok(())
    }

    /// The group key to persist, falling back to [`DEFAULT_GROUP_KEY`].
    pub fn effective_group_key(&self) -> &str {
        match self.group_key.as_deref() {
            Some(key) if !is_blank(key) => key,
            _ => DEFAULT_GROUP_KEY,
        }
    }

    /// Materialise the record once the repository has assigned an id.
    pub fn into_template(self, id: TemplateId, stamped_at: DateTime<Utc>) -> Template {
        let group_key = self.effective_group_key().to_string();
        Template {
            id,
            scope: self.scope,
            owner: self.owner,
            name: self.name,
            layout_type: self.layout_type,
            category: self.category,
            image_url: self.image_url,
            thumbnail_url: self.thumbnail_url,
            layout_json: self.layout_json,
            active: self.active,
            group_key,
            created_by: self.created_by,
            created_at: stamped_at,
            modified_by: self.modified_by,
            modified_at: stamped_at,
        }
    }
}

// ── TemplateQuery ─────────────────────────────────────────────────────────────

/// Which slice of the catalog a read targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeFilter {
    /// Every common template, regardless of owner.
    Common,
    /// Private templates of one store.
    Private { owner: String },
}

impl ScopeFilter {
    pub fn private(owner: impl Into<String>) -> Self {
        Self::Private {
            owner: owner.into(),
        }
    }

    pub fn matches(&self, template: &Template) -> bool {
        match self {
            Self::Common => template.scope == TemplateScope::Common,
            Self::Private { owner } => {
                template.scope == TemplateScope::Private && &template.owner == owner
            }
        }
    }
}

/// Filter passed unchanged to the repository for paged and counted reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateQuery {
    pub scope: ScopeFilter,
    pub layout_type: Option<String>,
    pub category: CategoryFilter,
}

impl TemplateQuery {
    pub fn new(scope: ScopeFilter) -> Self {
        Self {
            scope,
            layout_type: None,
            category: CategoryFilter::any(),
        }
    }

    pub fn layout_type(mut self, layout_type: impl Into<Option<String>>) -> Self {
        self.layout_type = non_blank(layout_type.into());
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// The one filtering rule every repository adapter applies.
    pub fn matches(&self, template: &Template) -> bool {
        self.scope.matches(template)
            && self
                .layout_type
                .as_deref()
                .is_none_or(|wanted| template.layout_type == wanted)
            && self.category.matches(&template.category)
    }
}
