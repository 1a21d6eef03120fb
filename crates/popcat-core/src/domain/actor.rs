//! Acting identities and the admin role check.
//!
//! An [`Actor`] is handed to every catalog operation by whatever layer
//! authenticated the caller. The core never stores or caches it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier the original deployment used for its single administrator.
pub const DEFAULT_ADMIN_ID: &str = "a4";

/// The identity on whose behalf an operation executes.
///
/// For store users the id doubles as the store code that owns private
/// templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    id: String,
}

impl Actor {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Decides whether an actor id carries admin rights.
///
/// Evaluated per call, so implementations may consult live configuration.
pub trait RoleOracle: Send + Sync {
    fn is_admin(&self, actor_id: &str) -> bool;
}

/// Admin membership in a fixed, case-insensitive set of ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSet {
    ids: HashSet<String>,
}

impl AdminSet {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|id| id.as_ref().trim().to_lowercase())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }
}

impl Default for AdminSet {
    fn default() -> Self {
        Self::new([DEFAULT_ADMIN_ID])
    }
}

impl RoleOracle for AdminSet {
    fn is_admin(&self, actor_id: &str) -> bool {
        self.ids.contains(&actor_id.to_lowercase())
    }
}
