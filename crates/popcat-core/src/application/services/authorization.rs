//! Actor presence and admin checks.
//!
//! Callers must run these before any mutating work, filesystem writes
//! included, so an unauthorized request never leaves a side effect behind.

use std::sync::Arc;

use crate::{
    application::ApplicationError,
    domain::{Actor, AdminSet, RoleOracle},
    error::CatalogResult,
};

/// Pure authorization checks backed by an injected [`RoleOracle`].
#[derive(Clone)]
pub struct AuthorizationGuard {
    oracle: Arc<dyn RoleOracle>,
}

impl AuthorizationGuard {
    pub fn new(oracle: Arc<dyn RoleOracle>) -> Self {
        Self { oracle }
    }

    /// Fails with `UNAUTHENTICATED` when no actor was supplied.
    pub fn require_actor<'a>(&self, actor: Option<&'a Actor>) -> CatalogResult<&'a Actor> {
        actor.ok_or_else(|| ApplicationError::Unauthenticated.into())
    }

    /// Fails with `UNAUTHENTICATED` or `FORBIDDEN` unless the actor is an admin.
    ///
    /// `action` only feeds the error message.
    pub fn require_admin<'a>(
        &self,
        actor: Option<&'a Actor>,
        action: &'static str,
    ) -> CatalogResult<&'a Actor> {
        let actor = self.require_actor(actor)?;
        if !self.is_admin(actor) {
            return Err(ApplicationError::Forbidden {
                actor: actor.id().to_string(),
                action,
            }
            .into());
        }
        Ok(actor)
    }

    pub fn is_admin(&self, actor: &Actor) -> bool {
        self.oracle.is_admin(actor.id())
    }
}

impl Default for AuthorizationGuard {
    fn default() -> Self {
        Self::new(Arc::new(AdminSet::default()))
    }
}
