//! Mutation handlers.
//!
//! Each handler runs as: open a unit of work, load what it touches, ask the
//! policy, validate, write, commit. Any failure after `begin` rolls the unit
//! of work back, so a rejected call leaves the store untouched.

mod comments;
mod lookup;
mod posts;
mod tags;

use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::DomainError;
use crate::policy::{Action, Policy, Resource};
use crate::ports::{Store, UnitOfWork};

pub use comments::{CommentCreatedPayload, CommentInput, CommentPayload};
pub use lookup::{require_comment, require_post, require_post_by_slug, require_tag, resolve_tags};
pub use posts::{DeletedPayload, FavoritePayload, PostInput, PostPayload};
pub use tags::{TagDeletedPayload, TagInput, TagPayload};

/// All write operations of the blog, bound to a store and a policy.
#[derive(Clone)]
pub struct BlogMutations {
    store: Arc<dyn Store>,
    policy: Policy,
}

impl BlogMutations {
    pub fn new(store: Arc<dyn Store>, policy: Policy) -> Self {
        Self { store, policy }
    }

    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError> {
        Ok(self.store.begin().await?)
    }

    fn authorize(
        &self,
        ctx: &RequestContext,
        action: Action,
        resource: Resource<'_>,
    ) -> Result<(), DomainError> {
        self.policy
            .authorize(&ctx.actor, action, resource)
            .inspect_err(|err| {
                tracing::warn!(
                    request_id = ctx.request_id(),
                    %action,
                    error = %err,
                    "Mutation denied"
                );
            })
    }
}

/// Roll `uow` back and return `err`.
async fn abort<T>(uow: Box<dyn UnitOfWork>, err: DomainError) -> Result<T, DomainError> {
    if let Err(rollback_err) = uow.rollback().await {
        tracing::error!(error = %rollback_err, "Rollback failed");
    }
    Err(err)
}
