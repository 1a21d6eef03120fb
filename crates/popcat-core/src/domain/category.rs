//! The big/mid/small/sub category hierarchy.
//!
//! The same four levels appear twice: as a write-time classification on a
//! template ([`CategoryPath`]) and as an optional exact-match filter on
//! reads ([`CategoryFilter`]). Blank input is normalised to "absent" in both,
//! so an empty query parameter never turns into a match on `""`.

use serde::{Deserialize, Serialize};

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Classification stored on a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    pub big: Option<String>,
    pub mid: Option<String>,
    pub small: Option<String>,
    pub sub: Option<String>,
}

impl CategoryPath {
    pub fn new(
        big: Option<String>,
        mid: Option<String>,
        small: Option<String>,
        sub: Option<String>,
    ) -> Self {
        Self {
            big: non_blank(big),
            mid: non_blank(mid),
            small: non_blank(small),
            sub: non_blank(sub),
        }
    }

    /// A path carrying only the top level, as common templates do.
    pub fn top_level(big: Option<String>) -> Self {
        Self::new(big, None, None, None)
    }

    pub fn big(&self) -> Option<&str> {
        self.big.as_deref()
    }
}

/// Optional exact-match filter over the four category levels.
///
/// A level left unset means "unfiltered at this level". There is no
/// wildcard or prefix matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CategoryFilter {
    big: Option<String>,
    mid: Option<String>,
    small: Option<String>,
    sub: Option<String>,
}

impl CategoryFilter {
    /// A filter that matches every category.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn big(mut self, value: impl Into<Option<String>>) -> Self {
        self.big = non_blank(value.into());
        self
    }

    pub fn mid(mut self, value: impl Into<Option<String>>) -> Self {
        self.mid = non_blank(value.into());
        self
    }

    pub fn small(mut self, value: impl Into<Option<String>>) -> Self {
        self.small = non_blank(value.into());
        self
    }

    pub fn sub(mut self, value: impl Into<Option<String>>) -> Self {
        self.sub = non_blank(value.into());
        self
    }

    /// Whether no level is constrained.
    pub fn is_unfiltered(&self) -> bool {
        self.big.is_none() && self.mid.is_none() && self.small.is_none() && self.sub.is_none()
    }

    pub fn matches(&self, path: &CategoryPath) -> bool {
        level_matches(self.big.as_deref(), path.big.as_deref())
            && level_matches(self.mid.as_deref(), path.mid.as_deref())
            && level_matches(self.small.as_deref(), path.small.as_deref())
            && level_matches(self.sub.as_deref(), path.sub.as_deref())
    }
}

fn level_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(w) => actual == Some(w),
    }
}
